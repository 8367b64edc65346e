use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Student {
    pub id: i64,
    pub username: String,
    /// Opaque to this core; hashing happens in the auth layer.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Student {
    pub fn new(username: &str, first_name: &str, last_name: &str, email: &str) -> Self {
        Student {
            id: 0,
            username: username.to_string(),
            password_hash: String::new(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
impl Student {
    pub fn test_student(username: &str) -> Self {
        Student::new(
            username,
            "Test",
            "Student",
            &format!("{}@example.com", username),
        )
    }
}
