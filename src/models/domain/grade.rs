use serde::{Deserialize, Serialize};

/// Scored result for a student on a named assignment within a course.
///
/// The assignment link is the title string, not a foreign key — renaming an
/// assignment decouples its grades, and deleting one leaves grades behind.
/// The grading ledger's lookup-before-write on
/// (student_id, course_id, assignment_name) is the only uniqueness
/// enforcement.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub assignment_name: String,
    pub score: f64,
    pub max_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub graded_date: String,
    pub graded_by_teacher_id: i64,
}

impl Grade {
    pub fn percentage(&self) -> f64 {
        if self.max_score > 0.0 {
            self.score / self.max_score * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
impl Grade {
    pub fn test_grade(student_id: i64, course_id: i64, assignment_name: &str, score: f64) -> Self {
        Grade {
            id: 0,
            student_id,
            course_id,
            assignment_name: assignment_name.to_string(),
            score,
            max_score: 100.0,
            letter: None,
            feedback: None,
            graded_date: "2024-01-15".to_string(),
            graded_by_teacher_id: 1,
        }
    }
}
