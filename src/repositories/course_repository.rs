use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Course,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn save(&self, course: Course) -> AppResult<Course>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>>;
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Course>>;
    async fn find_by_teacher_id(&self, teacher_id: i64) -> AppResult<Vec<Course>>;
    async fn find_all(&self) -> AppResult<Vec<Course>>;
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

pub struct InMemoryCourseRepository {
    rows: RwLock<HashMap<i64, Course>>,
    next_id: AtomicI64,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryCourseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn save(&self, mut course: Course) -> AppResult<Course> {
        let mut rows = self.rows.write().await;

        if course.id == 0 {
            course.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        } else if !rows.contains_key(&course.id) {
            return Err(AppError::NotFound(format!(
                "Course with id '{}' not found",
                course.id
            )));
        }

        rows.insert(course.id, course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Course>> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|c| c.code == code).cloned())
    }

    async fn find_by_teacher_id(&self, teacher_id: i64) -> AppResult<Vec<Course>> {
        let rows = self.rows.read().await;
        let mut courses: Vec<_> = rows
            .values()
            .filter(|c| c.teacher_id == Some(teacher_id))
            .cloned()
            .collect();
        courses.sort_by_key(|c| c.id);
        Ok(courses)
    }

    async fn find_all(&self) -> AppResult<Vec<Course>> {
        let rows = self.rows.read().await;
        let mut courses: Vec<_> = rows.values().cloned().collect();
        courses.sort_by_key(|c| c.id);
        Ok(courses)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.remove(&id).is_none() {
            return Err(AppError::NotFound(format!(
                "Course with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
