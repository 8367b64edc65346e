use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Teacher {
    pub id: i64,
    pub username: String,
    /// Opaque to this core; hashing happens in the auth layer.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Teacher {
    pub fn new(username: &str, first_name: &str, last_name: &str, email: &str) -> Self {
        Teacher {
            id: 0,
            username: username.to_string(),
            password_hash: String::new(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }

    /// Full name as shown in course listings; the course filter matches
    /// against this.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
impl Teacher {
    pub fn test_teacher(username: &str) -> Self {
        Teacher::new(
            username,
            "Test",
            "Teacher",
            &format!("{}@example.com", username),
        )
    }
}
