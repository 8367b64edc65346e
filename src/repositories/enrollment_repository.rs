use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Enrollment,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Persists the enrollment, assigning an identity when `id == 0`.
    /// Pair uniqueness is the enrollment service's job, not the store's.
    async fn save(&self, enrollment: Enrollment) -> AppResult<Enrollment>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Enrollment>>;
    async fn find_by_student_id(&self, student_id: i64) -> AppResult<Vec<Enrollment>>;
    async fn find_by_course_id(&self, course_id: i64) -> AppResult<Vec<Enrollment>>;
    async fn find_by_student_and_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> AppResult<Option<Enrollment>>;
    async fn find_all(&self) -> AppResult<Vec<Enrollment>>;
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

pub struct InMemoryEnrollmentRepository {
    rows: RwLock<HashMap<i64, Enrollment>>,
    next_id: AtomicI64,
}

impl InMemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryEnrollmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn save(&self, mut enrollment: Enrollment) -> AppResult<Enrollment> {
        let mut rows = self.rows.write().await;

        if enrollment.id == 0 {
            enrollment.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        } else if !rows.contains_key(&enrollment.id) {
            return Err(AppError::NotFound(format!(
                "Enrollment with id '{}' not found",
                enrollment.id
            )));
        }

        rows.insert(enrollment.id, enrollment.clone());
        Ok(enrollment)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Enrollment>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_student_id(&self, student_id: i64) -> AppResult<Vec<Enrollment>> {
        let rows = self.rows.read().await;
        let mut enrollments: Vec<_> = rows
            .values()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect();
        enrollments.sort_by_key(|e| e.id);
        Ok(enrollments)
    }

    async fn find_by_course_id(&self, course_id: i64) -> AppResult<Vec<Enrollment>> {
        let rows = self.rows.read().await;
        let mut enrollments: Vec<_> = rows
            .values()
            .filter(|e| e.course_id == course_id)
            .cloned()
            .collect();
        enrollments.sort_by_key(|e| e.id);
        Ok(enrollments)
    }

    async fn find_by_student_and_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> AppResult<Option<Enrollment>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Enrollment>> {
        let rows = self.rows.read().await;
        let mut enrollments: Vec<_> = rows.values().cloned().collect();
        enrollments.sort_by_key(|e| e.id);
        Ok(enrollments)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.remove(&id).is_none() {
            return Err(AppError::NotFound(format!(
                "Enrollment with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
