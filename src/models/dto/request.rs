use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAssignment {
    pub course_id: i64,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: String,

    #[validate(length(min = 1))]
    pub due_date: String,

    #[validate(range(min = 0.0))]
    pub max_score: f64,

    /// Blank means "use the configured default" (normally "active").
    pub status: String,

    pub created_by_teacher_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GradeInput {
    pub student_id: i64,

    pub course_id: i64,

    #[validate(length(min = 1, max = 200))]
    pub assignment_title: String,

    #[validate(range(min = 0.0))]
    pub score: f64,

    #[validate(range(min = 0.0))]
    pub max_score: f64,

    pub letter: Option<String>,

    pub feedback: Option<String>,

    pub graded_by_teacher_id: i64,
}
