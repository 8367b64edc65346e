use std::sync::Arc;

use chrono::NaiveDate;

use classtrack::{
    app_state::AppState,
    clock::FixedClock,
    config::Config,
    errors::AppError,
    models::{
        domain::{Course, Student, Teacher},
        dto::{GradeInput, NewAssignment},
    },
    services::CompletionStatus,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn app() -> AppState {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = Config {
        date_format: "%Y-%m-%d".to_string(),
        assignment_default_status: "active".to_string(),
    };
    AppState::with_clock(config, Arc::new(FixedClock::new(today())))
}

async fn seed_course_with_two_students(app: &AppState) -> (Teacher, Course, Student, Student) {
    let teacher = app
        .admin_service
        .create_teacher(Teacher::new("tgrey", "Tom", "Grey", "tom@example.com"))
        .await
        .expect("teacher should be created");
    let course = app
        .admin_service
        .save_course(Course::new("CS101", "Intro to Programming", Some(teacher.id)))
        .await
        .expect("course should be created");
    let s1 = app
        .admin_service
        .create_student(Student::new("ada", "Ada", "Lovelace", "ada@example.com"))
        .await
        .expect("student should be created");
    let s2 = app
        .admin_service
        .create_student(Student::new("alan", "Alan", "Turing", "alan@example.com"))
        .await
        .expect("student should be created");

    app.enrollment_service
        .enroll(s1.id, course.id)
        .await
        .expect("enroll should work");
    app.enrollment_service
        .enroll(s2.id, course.id)
        .await
        .expect("enroll should work");

    (teacher, course, s1, s2)
}

fn new_assignment(course_id: i64, teacher_id: i64, title: &str) -> NewAssignment {
    NewAssignment {
        course_id,
        title: title.to_string(),
        description: "Read the handout".to_string(),
        due_date: "2024-03-15".to_string(),
        max_score: 100.0,
        status: String::new(),
        created_by_teacher_id: teacher_id,
    }
}

fn grade_input(student_id: i64, course_id: i64, title: &str, score: f64, teacher_id: i64) -> GradeInput {
    GradeInput {
        student_id,
        course_id,
        assignment_title: title.to_string(),
        score,
        max_score: 100.0,
        letter: None,
        feedback: None,
        graded_by_teacher_id: teacher_id,
    }
}

#[tokio::test]
async fn enroll_rejects_duplicates_and_unknown_ids() {
    let app = app();
    let (_, course, s1, _) = seed_course_with_two_students(&app).await;

    let duplicate = app.enrollment_service.enroll(s1.id, course.id).await;
    assert!(matches!(duplicate, Err(AppError::DuplicateEnrollment(_))));

    let unknown_student = app.enrollment_service.enroll(999, course.id).await;
    assert!(matches!(unknown_student, Err(AppError::NotFound(_))));

    let unknown_course = app.enrollment_service.enroll(s1.id, 999).await;
    assert!(matches!(unknown_course, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn enroll_then_unenroll_leaves_no_rows_for_the_pair() {
    let app = app();
    let (teacher, course, s1, s2) = seed_course_with_two_students(&app).await;

    let assignment = app
        .assignment_service
        .create_assignment(new_assignment(course.id, teacher.id, "Homework 1"))
        .await
        .expect("assignment should be created");
    app.grade_service
        .upsert_grade(grade_input(s1.id, course.id, "Homework 1", 80.0, teacher.id))
        .await
        .expect("grade should be recorded");

    let enrollment = app
        .enrollments
        .find_by_student_and_course(s1.id, course.id)
        .await
        .expect("lookup should work")
        .expect("enrollment should exist");

    app.enrollment_service
        .unenroll(s1.id, course.id)
        .await
        .expect("unenroll should work");

    let pair = app
        .enrollments
        .find_by_student_and_course(s1.id, course.id)
        .await
        .expect("lookup should work");
    assert!(pair.is_none());

    let completions = app
        .completions
        .find_by_enrollment_id(enrollment.id)
        .await
        .expect("lookup should work");
    assert!(completions.is_empty());

    let grades = app
        .grade_service
        .grades_for(s1.id, course.id)
        .await
        .expect("lookup should work");
    assert!(grades.is_empty());

    // The other student's rows are untouched.
    let s2_enrollment = app
        .enrollments
        .find_by_student_and_course(s2.id, course.id)
        .await
        .expect("lookup should work")
        .expect("enrollment should exist");
    let s2_completions = app
        .completions
        .find_by_enrollment_id(s2_enrollment.id)
        .await
        .expect("lookup should work");
    assert_eq!(s2_completions.len(), 1);
    assert_eq!(s2_completions[0].assignment_id, assignment.id);

    // Unenrolling a pair that no longer exists is a quiet no-op.
    app.enrollment_service
        .unenroll(s1.id, course.id)
        .await
        .expect("second unenroll should be a no-op");
}

#[tokio::test]
async fn assignment_rollout_and_completion_statuses() {
    let app = app();
    let (teacher, course, s1, s2) = seed_course_with_two_students(&app).await;

    let assignment = app
        .assignment_service
        .create_assignment(new_assignment(course.id, teacher.id, "Homework 1"))
        .await
        .expect("assignment should be created");
    assert_eq!(assignment.status, "active");
    assert_eq!(assignment.created_date, "2024-03-10");

    let listed = app
        .assignment_service
        .assignments_for_course(course.id)
        .await
        .expect("listing should work");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Homework 1");

    // One not-done completion per existing enrollment.
    let completions = app
        .completions
        .find_by_assignment_id(assignment.id)
        .await
        .expect("lookup should work");
    assert_eq!(completions.len(), 2);
    assert!(completions.iter().all(|c| !c.done));

    let e1 = app
        .enrollments
        .find_by_student_and_course(s1.id, course.id)
        .await
        .expect("lookup should work")
        .expect("enrollment should exist");
    let e2 = app
        .enrollments
        .find_by_student_and_course(s2.id, course.id)
        .await
        .expect("lookup should work")
        .expect("enrollment should exist");

    app.assignment_service
        .mark_done(assignment.id, e1.id)
        .await
        .expect("mark done should work");

    let s1_status = app
        .assignment_service
        .status_for(assignment.id, e1.id)
        .await
        .expect("status should work");
    assert_eq!(s1_status, CompletionStatus::Completed);

    let s2_status = app
        .assignment_service
        .status_for(assignment.id, e2.id)
        .await
        .expect("status should work");
    assert_eq!(s2_status, CompletionStatus::Incomplete);

    app.cascade_service
        .delete_assignment(assignment.id)
        .await
        .expect("delete should work");

    let remaining = app
        .completions
        .find_by_assignment_id(assignment.id)
        .await
        .expect("lookup should work");
    assert!(remaining.is_empty());

    let gone = app.assignment_service.status_for(assignment.id, e1.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn mark_done_creates_the_completion_record_on_demand() {
    let app = app();
    let (teacher, course, _, _) = seed_course_with_two_students(&app).await;

    let assignment = app
        .assignment_service
        .create_assignment(new_assignment(course.id, teacher.id, "Homework 1"))
        .await
        .expect("assignment should be created");

    // A student who joins after the rollout has no completion row yet.
    let late = app
        .admin_service
        .create_student(Student::new("grace", "Grace", "Hopper", "grace@example.com"))
        .await
        .expect("student should be created");
    let enrollment = app
        .enrollment_service
        .enroll(late.id, course.id)
        .await
        .expect("enroll should work");

    let before = app
        .completions
        .find_by_enrollment_id(enrollment.id)
        .await
        .expect("lookup should work");
    assert!(before.is_empty());

    let completion = app
        .assignment_service
        .mark_done(assignment.id, enrollment.id)
        .await
        .expect("mark done should create on demand");
    assert!(completion.done);

    let status = app
        .assignment_service
        .status_for(assignment.id, enrollment.id)
        .await
        .expect("status should work");
    assert_eq!(status, CompletionStatus::Completed);
}

#[tokio::test]
async fn status_reads_not_assigned_without_a_matching_enrollment() {
    let app = app();
    let (teacher, course, s1, _) = seed_course_with_two_students(&app).await;

    let assignment = app
        .assignment_service
        .create_assignment(new_assignment(course.id, teacher.id, "Homework 1"))
        .await
        .expect("assignment should be created");

    // Enrollment id that does not exist at all.
    let status = app
        .assignment_service
        .status_for(assignment.id, 999)
        .await
        .expect("status should work");
    assert_eq!(status, CompletionStatus::NotAssigned);

    // Enrollment that belongs to a different course.
    let other = app
        .admin_service
        .save_course(Course::new("MA201", "Calculus", None))
        .await
        .expect("course should be created");
    let other_enrollment = app
        .enrollment_service
        .enroll(s1.id, other.id)
        .await
        .expect("enroll should work");

    let status = app
        .assignment_service
        .status_for(assignment.id, other_enrollment.id)
        .await
        .expect("status should work");
    assert_eq!(status, CompletionStatus::NotAssigned);

    // Marking an unknown enrollment done is rejected, not defaulted.
    let missing = app.assignment_service.mark_done(assignment.id, 999).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn deleting_a_student_removes_every_dependent_row() {
    let app = app();
    let (teacher, course, s1, _) = seed_course_with_two_students(&app).await;

    let second = app
        .admin_service
        .save_course(Course::new("MA201", "Calculus", Some(teacher.id)))
        .await
        .expect("course should be created");
    app.enrollment_service
        .enroll(s1.id, second.id)
        .await
        .expect("enroll should work");

    app.assignment_service
        .create_assignment(new_assignment(course.id, teacher.id, "Homework 1"))
        .await
        .expect("assignment should be created");
    app.grade_service
        .upsert_grade(grade_input(s1.id, course.id, "Homework 1", 75.0, teacher.id))
        .await
        .expect("grade should be recorded");
    app.grade_service
        .upsert_grade(grade_input(s1.id, second.id, "Quiz 1", 90.0, teacher.id))
        .await
        .expect("grade should be recorded");

    app.cascade_service
        .delete_student(s1.id)
        .await
        .expect("delete should work");

    assert!(app
        .students
        .find_by_id(s1.id)
        .await
        .expect("lookup should work")
        .is_none());
    assert!(app
        .enrollments
        .find_by_student_id(s1.id)
        .await
        .expect("lookup should work")
        .is_empty());
    assert!(app
        .grades
        .find_by_student_and_course(s1.id, course.id)
        .await
        .expect("lookup should work")
        .is_empty());
    assert!(app
        .grades
        .find_by_student_and_course(s1.id, second.id)
        .await
        .expect("lookup should work")
        .is_empty());

    let repeat = app.cascade_service.delete_student(s1.id).await;
    assert!(matches!(repeat, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn deleting_a_teacher_unassigns_courses_but_keeps_them() {
    let app = app();
    let (teacher, course, _, _) = seed_course_with_two_students(&app).await;

    let second = app
        .admin_service
        .save_course(Course::new("MA201", "Calculus", Some(teacher.id)))
        .await
        .expect("course should be created");

    app.cascade_service
        .delete_teacher(teacher.id)
        .await
        .expect("delete should work");

    assert!(app
        .teachers
        .find_by_id(teacher.id)
        .await
        .expect("lookup should work")
        .is_none());

    for course_id in [course.id, second.id] {
        let survivor = app
            .courses
            .find_by_id(course_id)
            .await
            .expect("lookup should work")
            .expect("course should survive teacher deletion");
        assert_eq!(survivor.teacher_id, None);
    }
}

#[tokio::test]
async fn deleting_a_course_removes_enrollments_grades_and_assignments() {
    let app = app();
    let (teacher, course, s1, s2) = seed_course_with_two_students(&app).await;

    let assignment = app
        .assignment_service
        .create_assignment(new_assignment(course.id, teacher.id, "Homework 1"))
        .await
        .expect("assignment should be created");
    app.grade_service
        .upsert_grade(grade_input(s1.id, course.id, "Homework 1", 65.0, teacher.id))
        .await
        .expect("grade should be recorded");

    app.cascade_service
        .delete_course(course.id)
        .await
        .expect("delete should work");

    assert!(app
        .courses
        .find_by_id(course.id)
        .await
        .expect("lookup should work")
        .is_none());
    assert!(app
        .enrollments
        .find_by_course_id(course.id)
        .await
        .expect("lookup should work")
        .is_empty());
    assert!(app
        .assignments
        .find_by_course_id(course.id)
        .await
        .expect("lookup should work")
        .is_empty());
    assert!(app
        .completions
        .find_by_assignment_id(assignment.id)
        .await
        .expect("lookup should work")
        .is_empty());
    assert!(app
        .grades
        .find_by_student_and_course(s1.id, course.id)
        .await
        .expect("lookup should work")
        .is_empty());

    // Students themselves are never part of the course cascade.
    for student_id in [s1.id, s2.id] {
        assert!(app
            .students
            .find_by_id(student_id)
            .await
            .expect("lookup should work")
            .is_some());
    }
}

#[tokio::test]
async fn deleting_an_assignment_leaves_title_linked_grades_behind() {
    let app = app();
    let (teacher, course, s1, _) = seed_course_with_two_students(&app).await;

    let assignment = app
        .assignment_service
        .create_assignment(new_assignment(course.id, teacher.id, "Homework 1"))
        .await
        .expect("assignment should be created");
    app.grade_service
        .upsert_grade(grade_input(s1.id, course.id, "Homework 1", 88.0, teacher.id))
        .await
        .expect("grade should be recorded");

    app.cascade_service
        .delete_assignment(assignment.id)
        .await
        .expect("delete should work");

    // Grades hang off the title string, so the row survives its assignment.
    let orphan = app
        .grade_service
        .grade_for_assignment(s1.id, course.id, "Homework 1")
        .await
        .expect("lookup should work");
    assert!(orphan.is_some());
}

#[tokio::test]
async fn upsert_grade_overwrites_in_place_for_the_same_key() {
    let app = app();
    let (teacher, course, s1, _) = seed_course_with_two_students(&app).await;

    let first = app
        .grade_service
        .upsert_grade(grade_input(s1.id, course.id, "Homework 1", 70.0, teacher.id))
        .await
        .expect("grade should be recorded");
    let second = app
        .grade_service
        .upsert_grade(grade_input(s1.id, course.id, "Homework 1", 95.0, teacher.id))
        .await
        .expect("grade should be recorded");

    assert_eq!(first.id, second.id);
    assert_eq!(second.graded_date, "2024-03-10");

    let grades = app
        .grade_service
        .grades_for(s1.id, course.id)
        .await
        .expect("lookup should work");
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].score, 95.0);
    assert_eq!(grades[0].percentage(), 95.0);

    // A different title is a different ledger key.
    app.grade_service
        .upsert_grade(grade_input(s1.id, course.id, "homework 1", 50.0, teacher.id))
        .await
        .expect("grade should be recorded");
    let grades = app
        .grade_service
        .grades_for(s1.id, course.id)
        .await
        .expect("lookup should work");
    assert_eq!(grades.len(), 2);
}

#[tokio::test]
async fn upsert_grade_rejects_bad_input_and_unknown_ids() {
    let app = app();
    let (teacher, course, s1, _) = seed_course_with_two_students(&app).await;

    let mut negative = grade_input(s1.id, course.id, "Homework 1", 50.0, teacher.id);
    negative.max_score = -10.0;
    let result = app.grade_service.upsert_grade(negative).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    let unknown = app
        .grade_service
        .upsert_grade(grade_input(999, course.id, "Homework 1", 50.0, teacher.id))
        .await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    // Nothing was written along the way.
    let grades = app
        .grade_service
        .grades_for(s1.id, course.id)
        .await
        .expect("lookup should work");
    assert!(grades.is_empty());
}

#[tokio::test]
async fn rosters_resolve_through_enrollments() {
    let app = app();
    let (_, course, s1, s2) = seed_course_with_two_students(&app).await;

    let courses = app
        .enrollment_service
        .courses_for_student(s1.id)
        .await
        .expect("lookup should work");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, course.id);

    let students = app
        .enrollment_service
        .students_for_course(course.id)
        .await
        .expect("lookup should work");
    let mut usernames: Vec<_> = students.iter().map(|s| s.username.clone()).collect();
    usernames.sort();
    assert_eq!(usernames, vec!["ada".to_string(), "alan".to_string()]);

    assert!(matches!(
        app.enrollment_service.courses_for_student(999).await,
        Err(AppError::NotFound(_))
    ));

    assert_eq!(s2.username, "alan");
}

#[tokio::test]
async fn student_course_views_filter_and_sort() {
    let app = app();
    let (teacher, _, s1, _) = seed_course_with_two_students(&app).await;

    let calculus = app
        .admin_service
        .save_course(
            Course::new("MA201", "Calculus", Some(teacher.id)).with_schedule("Tue 14:00"),
        )
        .await
        .expect("course should be created");
    app.enrollment_service
        .enroll(s1.id, calculus.id)
        .await
        .expect("enroll should work");

    let all = app
        .course_view_service
        .student_courses(s1.id, None, None)
        .await
        .expect("listing should work");
    assert_eq!(all.len(), 2);

    // A blank keyword leaves membership and order untouched.
    let unfiltered = app
        .course_view_service
        .student_courses(s1.id, Some("  "), None)
        .await
        .expect("listing should work");
    assert_eq!(unfiltered, all);

    let by_teacher = app
        .course_view_service
        .student_courses(s1.id, Some("grey"), None)
        .await
        .expect("listing should work");
    assert_eq!(by_teacher.len(), 2);
    assert!(by_teacher
        .iter()
        .all(|v| v.teacher_name.as_deref() == Some("Tom Grey")));

    let sorted = app
        .course_view_service
        .student_courses(s1.id, None, Some("name"))
        .await
        .expect("listing should work");
    assert_eq!(sorted[0].name, "Calculus");
    assert_eq!(sorted[1].name, "Intro to Programming");
}
