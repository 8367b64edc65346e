pub mod admin_service;
pub mod assignment_service;
pub mod cascade_service;
pub mod course_view_service;
pub mod enrollment_service;
pub mod grade_service;

pub use admin_service::AdminService;
pub use assignment_service::{AssignmentService, CompletionStatus};
pub use cascade_service::CascadeService;
pub use course_view_service::CourseViewService;
pub use enrollment_service::EnrollmentService;
pub use grade_service::GradeService;
