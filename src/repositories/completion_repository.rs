use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::AssignmentCompletion,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    async fn save(&self, completion: AssignmentCompletion) -> AppResult<AssignmentCompletion>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<AssignmentCompletion>>;
    async fn find_by_assignment_and_enrollment(
        &self,
        assignment_id: i64,
        enrollment_id: i64,
    ) -> AppResult<Option<AssignmentCompletion>>;
    async fn find_by_assignment_id(&self, assignment_id: i64)
        -> AppResult<Vec<AssignmentCompletion>>;
    async fn find_by_enrollment_id(&self, enrollment_id: i64)
        -> AppResult<Vec<AssignmentCompletion>>;
    async fn find_all(&self) -> AppResult<Vec<AssignmentCompletion>>;
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

pub struct InMemoryCompletionRepository {
    rows: RwLock<HashMap<i64, AssignmentCompletion>>,
    next_id: AtomicI64,
}

impl InMemoryCompletionRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryCompletionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionRepository for InMemoryCompletionRepository {
    async fn save(&self, mut completion: AssignmentCompletion) -> AppResult<AssignmentCompletion> {
        let mut rows = self.rows.write().await;

        if completion.id == 0 {
            completion.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        } else if !rows.contains_key(&completion.id) {
            return Err(AppError::NotFound(format!(
                "Assignment completion with id '{}' not found",
                completion.id
            )));
        }

        rows.insert(completion.id, completion.clone());
        Ok(completion)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<AssignmentCompletion>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_assignment_and_enrollment(
        &self,
        assignment_id: i64,
        enrollment_id: i64,
    ) -> AppResult<Option<AssignmentCompletion>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .find(|c| c.assignment_id == assignment_id && c.enrollment_id == enrollment_id)
            .cloned())
    }

    async fn find_by_assignment_id(
        &self,
        assignment_id: i64,
    ) -> AppResult<Vec<AssignmentCompletion>> {
        let rows = self.rows.read().await;
        let mut completions: Vec<_> = rows
            .values()
            .filter(|c| c.assignment_id == assignment_id)
            .cloned()
            .collect();
        completions.sort_by_key(|c| c.id);
        Ok(completions)
    }

    async fn find_by_enrollment_id(
        &self,
        enrollment_id: i64,
    ) -> AppResult<Vec<AssignmentCompletion>> {
        let rows = self.rows.read().await;
        let mut completions: Vec<_> = rows
            .values()
            .filter(|c| c.enrollment_id == enrollment_id)
            .cloned()
            .collect();
        completions.sort_by_key(|c| c.id);
        Ok(completions)
    }

    async fn find_all(&self) -> AppResult<Vec<AssignmentCompletion>> {
        let rows = self.rows.read().await;
        let mut completions: Vec<_> = rows.values().cloned().collect();
        completions.sort_by_key(|c| c.id);
        Ok(completions)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.remove(&id).is_none() {
            return Err(AppError::NotFound(format!(
                "Assignment completion with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
