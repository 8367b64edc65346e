use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Student,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Persists the student, assigning an identity when `id == 0`.
    async fn save(&self, student: Student) -> AppResult<Student>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Student>>;
    async fn find_all(&self) -> AppResult<Vec<Student>>;
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

pub struct InMemoryStudentRepository {
    rows: RwLock<HashMap<i64, Student>>,
    next_id: AtomicI64,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryStudentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn save(&self, mut student: Student) -> AppResult<Student> {
        let mut rows = self.rows.write().await;

        if student.id == 0 {
            student.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        } else if !rows.contains_key(&student.id) {
            return Err(AppError::NotFound(format!(
                "Student with id '{}' not found",
                student.id
            )));
        }

        rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Student>> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|s| s.username == username).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Student>> {
        let rows = self.rows.read().await;
        let mut students: Vec<_> = rows.values().cloned().collect();
        students.sort_by_key(|s| s.id);
        Ok(students)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.remove(&id).is_none() {
            return Err(AppError::NotFound(format!(
                "Student with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
