use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: String,
    /// Calendar date kept as text ("%Y-%m-%d"). Days-remaining parses it
    /// leniently; an unparsable value is reported as 0 days, not an error.
    pub due_date: String,
    pub max_score: f64,
    pub status: String,
    pub created_date: String,
    pub created_by_teacher_id: i64,
}

impl Assignment {
    pub fn new(course_id: i64, title: &str, description: &str, due_date: &str) -> Self {
        Assignment {
            id: 0,
            course_id,
            title: title.to_string(),
            description: description.to_string(),
            due_date: due_date.to_string(),
            max_score: 100.0,
            status: "active".to_string(),
            created_date: String::new(),
            created_by_teacher_id: 0,
        }
    }
}
