use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    /// A course may be untaught; teacher deletion clears this instead of
    /// deleting the course.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
}

impl Course {
    pub fn new(code: &str, name: &str, teacher_id: Option<i64>) -> Self {
        Course {
            id: 0,
            code: code.to_string(),
            name: name.to_string(),
            schedule: None,
            teacher_id,
        }
    }

    pub fn with_schedule(mut self, schedule: &str) -> Self {
        self.schedule = Some(schedule.to_string());
        self
    }
}
