use std::sync::Arc;

use crate::{
    clock::{Clock, SystemClock},
    config::Config,
    repositories::{
        AssignmentRepository, CompletionRepository, CourseRepository, EnrollmentRepository,
        GradeRepository, InMemoryAssignmentRepository, InMemoryCompletionRepository,
        InMemoryCourseRepository, InMemoryEnrollmentRepository, InMemoryGradeRepository,
        InMemoryStudentRepository, InMemoryTeacherRepository, StudentRepository,
        TeacherRepository,
    },
    services::{
        AdminService, AssignmentService, CascadeService, CourseViewService, EnrollmentService,
        GradeService,
    },
};

/// Composition root: wires the in-memory stores into the services the
/// surrounding application layers call.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub students: Arc<dyn StudentRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub completions: Arc<dyn CompletionRepository>,
    pub grades: Arc<dyn GradeRepository>,
    pub admin_service: Arc<AdminService>,
    pub enrollment_service: Arc<EnrollmentService>,
    pub assignment_service: Arc<AssignmentService>,
    pub grade_service: Arc<GradeService>,
    pub cascade_service: Arc<CascadeService>,
    pub course_view_service: Arc<CourseViewService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Same wiring with an injected clock, for deterministic date handling
    /// in tests.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        let students: Arc<dyn StudentRepository> = Arc::new(InMemoryStudentRepository::new());
        let teachers: Arc<dyn TeacherRepository> = Arc::new(InMemoryTeacherRepository::new());
        let courses: Arc<dyn CourseRepository> = Arc::new(InMemoryCourseRepository::new());
        let assignments: Arc<dyn AssignmentRepository> =
            Arc::new(InMemoryAssignmentRepository::new());
        let enrollments: Arc<dyn EnrollmentRepository> =
            Arc::new(InMemoryEnrollmentRepository::new());
        let completions: Arc<dyn CompletionRepository> =
            Arc::new(InMemoryCompletionRepository::new());
        let grades: Arc<dyn GradeRepository> = Arc::new(InMemoryGradeRepository::new());

        let cascade_service = Arc::new(CascadeService::new(
            students.clone(),
            teachers.clone(),
            courses.clone(),
            assignments.clone(),
            enrollments.clone(),
            completions.clone(),
            grades.clone(),
        ));
        let admin_service = Arc::new(AdminService::new(
            students.clone(),
            teachers.clone(),
            courses.clone(),
        ));
        let enrollment_service = Arc::new(EnrollmentService::new(
            students.clone(),
            courses.clone(),
            enrollments.clone(),
            cascade_service.clone(),
            clock.clone(),
        ));
        let assignment_service = Arc::new(AssignmentService::new(
            assignments.clone(),
            courses.clone(),
            enrollments.clone(),
            completions.clone(),
            clock.clone(),
            &config,
        ));
        let grade_service = Arc::new(GradeService::new(
            grades.clone(),
            students.clone(),
            courses.clone(),
            clock,
            &config,
        ));
        let course_view_service = Arc::new(CourseViewService::new(
            students.clone(),
            teachers.clone(),
            courses.clone(),
            enrollments.clone(),
        ));

        Self {
            config: Arc::new(config),
            students,
            teachers,
            courses,
            assignments,
            enrollments,
            completions,
            grades,
            admin_service,
            enrollment_service,
            assignment_service,
            grade_service,
            cascade_service,
            course_view_service,
        }
    }
}
