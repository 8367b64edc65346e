use serde::{Deserialize, Serialize};

/// Per-enrollment done/not-done flag for one assignment. Created with
/// `done = false` when an assignment is rolled out to a course's enrollments,
/// and must not outlive its enrollment or its assignment.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssignmentCompletion {
    pub id: i64,
    pub assignment_id: i64,
    pub enrollment_id: i64,
    pub done: bool,
}

impl AssignmentCompletion {
    pub fn new(assignment_id: i64, enrollment_id: i64) -> Self {
        AssignmentCompletion {
            id: 0,
            assignment_id,
            enrollment_id,
            done: false,
        }
    }
}
