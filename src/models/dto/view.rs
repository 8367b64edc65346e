use serde::Serialize;

use crate::models::domain::{Course, Teacher};

/// Course row as presented in student-facing listings; carries the resolved
/// teacher name so filter and sort can match on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CourseView {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub schedule: Option<String>,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
}

impl CourseView {
    pub fn from_course(course: &Course, teacher: Option<&Teacher>) -> Self {
        CourseView {
            id: course.id,
            code: course.code.clone(),
            name: course.name.clone(),
            schedule: course.schedule.clone(),
            teacher_id: course.teacher_id,
            teacher_name: teacher.map(Teacher::full_name),
        }
    }
}
