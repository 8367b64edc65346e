use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Link record between a student and a course. At most one exists per
/// (student_id, course_id) pair; the enrollment service enforces that before
/// writing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrolled_date: NaiveDate,
}

impl Enrollment {
    pub fn new(student_id: i64, course_id: i64, enrolled_date: NaiveDate) -> Self {
        Enrollment {
            id: 0,
            student_id,
            course_id,
            enrolled_date,
        }
    }
}
