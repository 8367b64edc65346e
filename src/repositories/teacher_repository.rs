use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Teacher,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn save(&self, teacher: Teacher) -> AppResult<Teacher>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Teacher>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Teacher>>;
    async fn find_all(&self) -> AppResult<Vec<Teacher>>;
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

pub struct InMemoryTeacherRepository {
    rows: RwLock<HashMap<i64, Teacher>>,
    next_id: AtomicI64,
}

impl InMemoryTeacherRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryTeacherRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeacherRepository for InMemoryTeacherRepository {
    async fn save(&self, mut teacher: Teacher) -> AppResult<Teacher> {
        let mut rows = self.rows.write().await;

        if teacher.id == 0 {
            teacher.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        } else if !rows.contains_key(&teacher.id) {
            return Err(AppError::NotFound(format!(
                "Teacher with id '{}' not found",
                teacher.id
            )));
        }

        rows.insert(teacher.id, teacher.clone());
        Ok(teacher)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Teacher>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Teacher>> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|t| t.username == username).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Teacher>> {
        let rows = self.rows.read().await;
        let mut teachers: Vec<_> = rows.values().cloned().collect();
        teachers.sort_by_key(|t| t.id);
        Ok(teachers)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.remove(&id).is_none() {
            return Err(AppError::NotFound(format!(
                "Teacher with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
