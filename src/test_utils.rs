#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Course, Student, Teacher};

    /// Creates a standard test student
    pub fn test_student(username: &str) -> Student {
        Student::new(
            username,
            "Test",
            "Student",
            &format!("{}@example.com", username),
        )
    }

    /// Creates a standard test teacher
    pub fn test_teacher(username: &str) -> Teacher {
        Teacher::new(
            username,
            "Test",
            "Teacher",
            &format!("{}@example.com", username),
        )
    }

    /// Creates a test course without an assigned teacher
    pub fn test_course(code: &str) -> Course {
        Course::new(code, &format!("Course {}", code), None)
    }
}
