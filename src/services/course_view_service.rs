use std::cmp::Ordering;
use std::sync::Arc;

use log::warn;

use crate::{
    errors::{AppError, AppResult},
    models::dto::CourseView,
    repositories::{
        CourseRepository, EnrollmentRepository, StudentRepository, TeacherRepository,
    },
};

/// Student-facing course listing: resolves enrolled courses to views and
/// applies keyword filtering and field sorting on top.
pub struct CourseViewService {
    students: Arc<dyn StudentRepository>,
    teachers: Arc<dyn TeacherRepository>,
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl CourseViewService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        teachers: Arc<dyn TeacherRepository>,
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            students,
            teachers,
            courses,
            enrollments,
        }
    }

    /// Case-insensitive substring match on course code, course name, or
    /// teacher full name. A blank keyword returns the input unchanged.
    pub fn filter_courses(courses: Vec<CourseView>, keyword: &str) -> Vec<CourseView> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return courses;
        }

        courses
            .into_iter()
            .filter(|course| {
                course.code.to_lowercase().contains(&keyword)
                    || course.name.to_lowercase().contains(&keyword)
                    || course
                        .teacher_name
                        .as_ref()
                        .is_some_and(|name| name.to_lowercase().contains(&keyword))
            })
            .collect()
    }

    /// Sorts by one of name, code, teacher, or schedule. Teacher-less
    /// courses sort as the empty string under "teacher"; a missing schedule
    /// sorts last. An unknown field leaves the order untouched.
    pub fn sort_courses(mut courses: Vec<CourseView>, field: &str) -> Vec<CourseView> {
        match field.trim().to_lowercase().as_str() {
            "name" => courses.sort_by(|a, b| a.name.cmp(&b.name)),
            "code" => courses.sort_by(|a, b| a.code.cmp(&b.code)),
            "teacher" => courses.sort_by(|a, b| {
                a.teacher_name
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.teacher_name.as_deref().unwrap_or(""))
            }),
            "schedule" => courses.sort_by(|a, b| match (&a.schedule, &b.schedule) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }),
            other => {
                warn!("unknown course sort field '{}', returning list as-is", other);
            }
        }
        courses
    }

    /// Fetch → filter → sort pipeline behind the student course listing.
    pub async fn student_courses(
        &self,
        student_id: i64,
        keyword: Option<&str>,
        sort_field: Option<&str>,
    ) -> AppResult<Vec<CourseView>> {
        let student = self
            .students
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id '{}' not found", student_id)))?;

        let enrollments = self.enrollments.find_by_student_id(student.id).await?;
        let mut views = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let Some(course) = self.courses.find_by_id(enrollment.course_id).await? else {
                warn!(
                    "enrollment {} references missing course {}",
                    enrollment.id, enrollment.course_id
                );
                continue;
            };
            let teacher = match course.teacher_id {
                Some(teacher_id) => self.teachers.find_by_id(teacher_id).await?,
                None => None,
            };
            views.push(CourseView::from_course(&course, teacher.as_ref()));
        }

        if let Some(keyword) = keyword {
            if !keyword.trim().is_empty() {
                views = Self::filter_courses(views, keyword);
            }
        }
        if let Some(field) = sort_field {
            if !field.trim().is_empty() {
                views = Self::sort_courses(views, field);
            }
        }

        Ok(views)
    }
}
