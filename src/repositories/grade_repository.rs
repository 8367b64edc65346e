use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Grade,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GradeRepository: Send + Sync {
    /// Persists the grade, assigning an identity when `id == 0`. The store
    /// deliberately carries no uniqueness constraint on
    /// (student, course, assignment_name); the grading ledger's
    /// lookup-before-write is the only guard.
    async fn save(&self, grade: Grade) -> AppResult<Grade>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Grade>>;
    async fn find_by_student_and_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> AppResult<Vec<Grade>>;
    async fn find_all(&self) -> AppResult<Vec<Grade>>;
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

pub struct InMemoryGradeRepository {
    rows: RwLock<HashMap<i64, Grade>>,
    next_id: AtomicI64,
}

impl InMemoryGradeRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryGradeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GradeRepository for InMemoryGradeRepository {
    async fn save(&self, mut grade: Grade) -> AppResult<Grade> {
        let mut rows = self.rows.write().await;

        if grade.id == 0 {
            grade.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        } else if !rows.contains_key(&grade.id) {
            return Err(AppError::NotFound(format!(
                "Grade with id '{}' not found",
                grade.id
            )));
        }

        rows.insert(grade.id, grade.clone());
        Ok(grade)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Grade>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_student_and_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> AppResult<Vec<Grade>> {
        let rows = self.rows.read().await;
        let mut grades: Vec<_> = rows
            .values()
            .filter(|g| g.student_id == student_id && g.course_id == course_id)
            .cloned()
            .collect();
        grades.sort_by_key(|g| g.id);
        Ok(grades)
    }

    async fn find_all(&self) -> AppResult<Vec<Grade>> {
        let rows = self.rows.read().await;
        let mut grades: Vec<_> = rows.values().cloned().collect();
        grades.sort_by_key(|g| g.id);
        Ok(grades)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.remove(&id).is_none() {
            return Err(AppError::NotFound(format!(
                "Grade with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
