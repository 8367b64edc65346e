use std::sync::Arc;

use log::{info, warn};

use crate::{
    clock::Clock,
    errors::{AppError, AppResult},
    models::domain::{Course, Enrollment, Student},
    repositories::{CourseRepository, EnrollmentRepository, StudentRepository},
    services::CascadeService,
};

/// Manages the student↔course link records.
pub struct EnrollmentService {
    students: Arc<dyn StudentRepository>,
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    cascade: Arc<CascadeService>,
    clock: Arc<dyn Clock>,
}

impl EnrollmentService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        cascade: Arc<CascadeService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            students,
            courses,
            enrollments,
            cascade,
            clock,
        }
    }

    /// Creates the enrollment for a (student, course) pair. Rejects a second
    /// enrollment for the same pair instead of silently upserting.
    pub async fn enroll(&self, student_id: i64, course_id: i64) -> AppResult<Enrollment> {
        let student = self
            .students
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id '{}' not found", student_id)))?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", course_id)))?;

        if self
            .enrollments
            .find_by_student_and_course(student.id, course.id)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateEnrollment(format!(
                "student {} already enrolled in course {}",
                student.id, course.id
            )));
        }

        let enrollment = self
            .enrollments
            .save(Enrollment::new(student.id, course.id, self.clock.today()))
            .await?;
        info!(
            "enrolled student {} in course {} (enrollment {})",
            student.id, course.id, enrollment.id
        );
        Ok(enrollment)
    }

    /// Removes the enrollment for the pair along with its dependent
    /// completion and grade rows. A pair that was never enrolled is a no-op.
    pub async fn unenroll(&self, student_id: i64, course_id: i64) -> AppResult<()> {
        match self
            .enrollments
            .find_by_student_and_course(student_id, course_id)
            .await?
        {
            Some(enrollment) => {
                self.cascade.purge_enrollment(&enrollment).await?;
                info!(
                    "unenrolled student {} from course {}",
                    student_id, course_id
                );
                Ok(())
            }
            None => Ok(()),
        }
    }

    pub async fn courses_for_student(&self, student_id: i64) -> AppResult<Vec<Course>> {
        let student = self
            .students
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id '{}' not found", student_id)))?;

        let enrollments = self.enrollments.find_by_student_id(student.id).await?;
        let mut courses = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            match self.courses.find_by_id(enrollment.course_id).await? {
                Some(course) => courses.push(course),
                None => warn!(
                    "enrollment {} references missing course {}",
                    enrollment.id, enrollment.course_id
                ),
            }
        }
        Ok(courses)
    }

    pub async fn students_for_course(&self, course_id: i64) -> AppResult<Vec<Student>> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", course_id)))?;

        let enrollments = self.enrollments.find_by_course_id(course.id).await?;
        let mut students = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            match self.students.find_by_id(enrollment.student_id).await? {
                Some(student) => students.push(student),
                None => warn!(
                    "enrollment {} references missing student {}",
                    enrollment.id, enrollment.student_id
                ),
            }
        }
        Ok(students)
    }
}
