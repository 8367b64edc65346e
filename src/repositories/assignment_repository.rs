use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Assignment,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn save(&self, assignment: Assignment) -> AppResult<Assignment>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Assignment>>;
    async fn find_by_course_id(&self, course_id: i64) -> AppResult<Vec<Assignment>>;
    async fn find_all(&self) -> AppResult<Vec<Assignment>>;
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

pub struct InMemoryAssignmentRepository {
    rows: RwLock<HashMap<i64, Assignment>>,
    next_id: AtomicI64,
}

impl InMemoryAssignmentRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryAssignmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn save(&self, mut assignment: Assignment) -> AppResult<Assignment> {
        let mut rows = self.rows.write().await;

        if assignment.id == 0 {
            assignment.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        } else if !rows.contains_key(&assignment.id) {
            return Err(AppError::NotFound(format!(
                "Assignment with id '{}' not found",
                assignment.id
            )));
        }

        rows.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Assignment>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_course_id(&self, course_id: i64) -> AppResult<Vec<Assignment>> {
        let rows = self.rows.read().await;
        let mut assignments: Vec<_> = rows
            .values()
            .filter(|a| a.course_id == course_id)
            .cloned()
            .collect();
        assignments.sort_by_key(|a| a.id);
        Ok(assignments)
    }

    async fn find_all(&self) -> AppResult<Vec<Assignment>> {
        let rows = self.rows.read().await;
        let mut assignments: Vec<_> = rows.values().cloned().collect();
        assignments.sort_by_key(|a| a.id);
        Ok(assignments)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.remove(&id).is_none() {
            return Err(AppError::NotFound(format!(
                "Assignment with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
