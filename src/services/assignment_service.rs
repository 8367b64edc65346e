use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use log::info;
use validator::Validate;

use crate::{
    clock::Clock,
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{Assignment, AssignmentCompletion},
        dto::NewAssignment,
    },
    repositories::{
        AssignmentRepository, CompletionRepository, CourseRepository, EnrollmentRepository,
    },
};

/// Per-enrollment completion state of one assignment, as surfaced to
/// teacher-facing views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionStatus {
    Completed,
    Incomplete,
    NotAssigned,
}

impl CompletionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::Completed => "completed",
            CompletionStatus::Incomplete => "incomplete",
            CompletionStatus::NotAssigned => "not assigned",
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates assignments, tracks per-enrollment completion, and computes
/// due-date urgency.
pub struct AssignmentService {
    assignments: Arc<dyn AssignmentRepository>,
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    completions: Arc<dyn CompletionRepository>,
    clock: Arc<dyn Clock>,
    date_format: String,
    default_status: String,
}

impl AssignmentService {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        completions: Arc<dyn CompletionRepository>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Self {
        Self {
            assignments,
            courses,
            enrollments,
            completions,
            clock,
            date_format: config.date_format.clone(),
            default_status: config.assignment_default_status.clone(),
        }
    }

    /// Persists a new assignment and rolls out one not-done completion
    /// record per enrollment currently in the course. The rollout is
    /// sequential; a failed write surfaces its error and earlier records are
    /// not rolled back.
    pub async fn create_assignment(&self, input: NewAssignment) -> AppResult<Assignment> {
        input.validate()?;

        let course = self.courses.find_by_id(input.course_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Course with id '{}' not found", input.course_id))
        })?;

        let status = if input.status.trim().is_empty() {
            self.default_status.clone()
        } else {
            input.status.clone()
        };

        let assignment = self
            .assignments
            .save(Assignment {
                id: 0,
                course_id: course.id,
                title: input.title,
                description: input.description,
                due_date: input.due_date,
                max_score: input.max_score,
                status,
                created_date: self.clock.today().format(&self.date_format).to_string(),
                created_by_teacher_id: input.created_by_teacher_id,
            })
            .await?;

        let enrollments = self.enrollments.find_by_course_id(course.id).await?;
        for enrollment in &enrollments {
            self.completions
                .save(AssignmentCompletion::new(assignment.id, enrollment.id))
                .await?;
        }

        info!(
            "created assignment {} in course {} with {} completion record(s)",
            assignment.id,
            course.id,
            enrollments.len()
        );
        Ok(assignment)
    }

    pub async fn assignments_for_course(&self, course_id: i64) -> AppResult<Vec<Assignment>> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", course_id)))?;
        self.assignments.find_by_course_id(course.id).await
    }

    /// Marks the assignment done for one enrollment. The completion record
    /// is created on demand when missing, so grading and admin flows can
    /// target assignments rolled out before the student enrolled.
    pub async fn mark_done(
        &self,
        assignment_id: i64,
        enrollment_id: i64,
    ) -> AppResult<AssignmentCompletion> {
        let enrollment = self.enrollments.find_by_id(enrollment_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Enrollment with id '{}' not found", enrollment_id))
        })?;

        let mut completion = self
            .completions
            .find_by_assignment_and_enrollment(assignment_id, enrollment.id)
            .await?
            .unwrap_or_else(|| AssignmentCompletion::new(assignment_id, enrollment.id));

        completion.done = true;
        self.completions.save(completion).await
    }

    /// Reports the completion state for one (assignment, enrollment) pair.
    /// An enrollment that does not exist, or that belongs to a different
    /// course than the assignment, reads as "not assigned".
    pub async fn status_for(
        &self,
        assignment_id: i64,
        enrollment_id: i64,
    ) -> AppResult<CompletionStatus> {
        let assignment = self.assignments.find_by_id(assignment_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Assignment with id '{}' not found", assignment_id))
        })?;

        let enrollment = match self.enrollments.find_by_id(enrollment_id).await? {
            Some(enrollment) if enrollment.course_id == assignment.course_id => enrollment,
            _ => return Ok(CompletionStatus::NotAssigned),
        };

        match self
            .completions
            .find_by_assignment_and_enrollment(assignment.id, enrollment.id)
            .await?
        {
            Some(completion) if completion.done => Ok(CompletionStatus::Completed),
            _ => Ok(CompletionStatus::Incomplete),
        }
    }

    /// Whole days from today to the assignment's due date; negative when
    /// overdue. A blank or unparsable due date reads as 0 rather than an
    /// error — callers render it as "due now", they do not branch on it.
    pub fn days_remaining(&self, assignment: &Assignment) -> i64 {
        let raw = assignment.due_date.trim();
        if raw.is_empty() {
            return 0;
        }
        match NaiveDate::parse_from_str(raw, &self.date_format) {
            Ok(due_date) => (due_date - self.clock.today()).num_days(),
            Err(_) => 0,
        }
    }
}
