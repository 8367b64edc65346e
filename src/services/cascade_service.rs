use std::sync::Arc;

use log::{info, warn};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Assignment, Enrollment},
    repositories::{
        AssignmentRepository, CompletionRepository, CourseRepository, EnrollmentRepository,
        GradeRepository, StudentRepository, TeacherRepository,
    },
};

/// Orchestrates multi-entity deletions so dependent enrollment, completion,
/// and grade rows do not outlive their owners.
///
/// Each deletion is an ordered script, not a transaction: a failed dependent
/// row is logged and skipped so the rest of the cascade still runs, while a
/// failure on the primary entity itself propagates to the caller.
pub struct CascadeService {
    students: Arc<dyn StudentRepository>,
    teachers: Arc<dyn TeacherRepository>,
    courses: Arc<dyn CourseRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    completions: Arc<dyn CompletionRepository>,
    grades: Arc<dyn GradeRepository>,
}

impl CascadeService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        students: Arc<dyn StudentRepository>,
        teachers: Arc<dyn TeacherRepository>,
        courses: Arc<dyn CourseRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        completions: Arc<dyn CompletionRepository>,
        grades: Arc<dyn GradeRepository>,
    ) -> Self {
        Self {
            students,
            teachers,
            courses,
            assignments,
            enrollments,
            completions,
            grades,
        }
    }

    /// Removes one enrollment together with its dependent rows: grades for
    /// the (student, course) pair, completions for the enrollment, then the
    /// enrollment row itself. The final delete propagates its error.
    pub async fn purge_enrollment(&self, enrollment: &Enrollment) -> AppResult<()> {
        let grades = self
            .grades
            .find_by_student_and_course(enrollment.student_id, enrollment.course_id)
            .await?;
        for grade in grades {
            if let Err(err) = self.grades.delete_by_id(grade.id).await {
                warn!(
                    "skipping grade {} while purging enrollment {}: {}",
                    grade.id, enrollment.id, err
                );
            }
        }

        let completions = self.completions.find_by_enrollment_id(enrollment.id).await?;
        for completion in completions {
            if let Err(err) = self.completions.delete_by_id(completion.id).await {
                warn!(
                    "skipping completion {} while purging enrollment {}: {}",
                    completion.id, enrollment.id, err
                );
            }
        }

        self.enrollments.delete_by_id(enrollment.id).await
    }

    /// Deletes a student and everything hanging off them: per enrollment,
    /// the pair's grades and completions, then the enrollment; finally the
    /// student record.
    pub async fn delete_student(&self, student_id: i64) -> AppResult<()> {
        let student = self
            .students
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id '{}' not found", student_id)))?;

        let enrollments = self.enrollments.find_by_student_id(student.id).await?;
        for enrollment in &enrollments {
            if let Err(err) = self.purge_enrollment(enrollment).await {
                warn!(
                    "skipping enrollment {} while deleting student {}: {}",
                    enrollment.id, student.id, err
                );
            }
        }

        self.students.delete_by_id(student.id).await?;
        info!(
            "deleted student {} and {} enrollment(s)",
            student.id,
            enrollments.len()
        );
        Ok(())
    }

    /// Deletes a teacher. Courses they taught survive with their teacher
    /// cleared; no course is ever deleted here.
    pub async fn delete_teacher(&self, teacher_id: i64) -> AppResult<()> {
        let teacher = self
            .teachers
            .find_by_id(teacher_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Teacher with id '{}' not found", teacher_id)))?;

        let courses = self.courses.find_by_teacher_id(teacher.id).await?;
        let unassigned = courses.len();
        for mut course in courses {
            let course_id = course.id;
            course.teacher_id = None;
            if let Err(err) = self.courses.save(course).await {
                warn!(
                    "could not unassign course {} while deleting teacher {}: {}",
                    course_id, teacher.id, err
                );
            }
        }

        self.teachers.delete_by_id(teacher.id).await?;
        info!(
            "deleted teacher {} and unassigned {} course(s)",
            teacher.id, unassigned
        );
        Ok(())
    }

    /// Deletes a course: every enrollment in it is purged (grades and
    /// completions included), its assignments and their completions go next,
    /// then the course record itself.
    pub async fn delete_course(&self, course_id: i64) -> AppResult<()> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", course_id)))?;

        let enrollments = self.enrollments.find_by_course_id(course.id).await?;
        for enrollment in &enrollments {
            if let Err(err) = self.purge_enrollment(enrollment).await {
                warn!(
                    "skipping enrollment {} while deleting course {}: {}",
                    enrollment.id, course.id, err
                );
            }
        }

        let assignments = self.assignments.find_by_course_id(course.id).await?;
        for assignment in &assignments {
            if let Err(err) = self.remove_assignment_rows(assignment).await {
                warn!(
                    "skipping assignment {} while deleting course {}: {}",
                    assignment.id, course.id, err
                );
            }
        }

        self.courses.delete_by_id(course.id).await?;
        info!(
            "deleted course {} with {} enrollment(s) and {} assignment(s)",
            course.id,
            enrollments.len(),
            assignments.len()
        );
        Ok(())
    }

    /// Deletes an assignment and its completion rows. Grades are keyed by
    /// assignment title, not id, and are left untouched.
    pub async fn delete_assignment(&self, assignment_id: i64) -> AppResult<()> {
        let assignment = self.assignments.find_by_id(assignment_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Assignment with id '{}' not found", assignment_id))
        })?;

        self.remove_assignment_rows(&assignment).await?;
        info!("deleted assignment {}", assignment.id);
        Ok(())
    }

    async fn remove_assignment_rows(&self, assignment: &Assignment) -> AppResult<()> {
        let completions = self
            .completions
            .find_by_assignment_id(assignment.id)
            .await?;
        for completion in completions {
            if let Err(err) = self.completions.delete_by_id(completion.id).await {
                warn!(
                    "skipping completion {} while deleting assignment {}: {}",
                    completion.id, assignment.id, err
                );
            }
        }

        self.assignments.delete_by_id(assignment.id).await
    }
}
