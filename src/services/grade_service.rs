use std::sync::Arc;

use log::info;
use validator::Validate;

use crate::{
    clock::Clock,
    config::Config,
    errors::{AppError, AppResult},
    models::{domain::Grade, dto::GradeInput},
    repositories::{CourseRepository, GradeRepository, StudentRepository},
};

/// The single point of truth for "has this assignment been graded for this
/// student": grades are keyed by (student, course, assignment title) through
/// a lookup-before-write, with no uniqueness constraint in the store behind
/// it.
pub struct GradeService {
    grades: Arc<dyn GradeRepository>,
    students: Arc<dyn StudentRepository>,
    courses: Arc<dyn CourseRepository>,
    clock: Arc<dyn Clock>,
    date_format: String,
}

impl GradeService {
    pub fn new(
        grades: Arc<dyn GradeRepository>,
        students: Arc<dyn StudentRepository>,
        courses: Arc<dyn CourseRepository>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Self {
        Self {
            grades,
            students,
            courses,
            clock,
            date_format: config.date_format.clone(),
        }
    }

    /// Creates or overwrites the grade for (student, course, assignment
    /// title). The title match is exact and case-sensitive; an existing row
    /// keeps its identity and has score, max score, letter, feedback, grader
    /// and graded date overwritten.
    pub async fn upsert_grade(&self, input: GradeInput) -> AppResult<Grade> {
        input.validate()?;

        let student = self.students.find_by_id(input.student_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Student with id '{}' not found", input.student_id))
        })?;
        let course = self.courses.find_by_id(input.course_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Course with id '{}' not found", input.course_id))
        })?;

        let existing = self
            .grades
            .find_by_student_and_course(student.id, course.id)
            .await?
            .into_iter()
            .find(|g| g.assignment_name == input.assignment_title);

        let grade = self
            .grades
            .save(Grade {
                id: existing.map(|g| g.id).unwrap_or(0),
                student_id: student.id,
                course_id: course.id,
                assignment_name: input.assignment_title,
                score: input.score,
                max_score: input.max_score,
                letter: input.letter,
                feedback: input.feedback,
                graded_date: self.clock.today().format(&self.date_format).to_string(),
                graded_by_teacher_id: input.graded_by_teacher_id,
            })
            .await?;

        info!(
            "graded '{}' for student {} in course {} ({}/{})",
            grade.assignment_name, grade.student_id, grade.course_id, grade.score, grade.max_score
        );
        Ok(grade)
    }

    pub async fn grades_for(&self, student_id: i64, course_id: i64) -> AppResult<Vec<Grade>> {
        self.grades
            .find_by_student_and_course(student_id, course_id)
            .await
    }

    /// Looks up the grade recorded under one assignment title, if any.
    pub async fn grade_for_assignment(
        &self,
        student_id: i64,
        course_id: i64,
        assignment_title: &str,
    ) -> AppResult<Option<Grade>> {
        let grades = self
            .grades
            .find_by_student_and_course(student_id, course_id)
            .await?;
        Ok(grades
            .into_iter()
            .find(|g| g.assignment_name == assignment_title))
    }
}
