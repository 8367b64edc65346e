use std::sync::Arc;

use log::info;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Course, Student, Teacher},
    repositories::{CourseRepository, StudentRepository, TeacherRepository},
};

/// Admin-side CRUD on the people and course directory. Enrollment, grading,
/// and deletion cascades live in their own services.
pub struct AdminService {
    students: Arc<dyn StudentRepository>,
    teachers: Arc<dyn TeacherRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl AdminService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        teachers: Arc<dyn TeacherRepository>,
        courses: Arc<dyn CourseRepository>,
    ) -> Self {
        Self {
            students,
            teachers,
            courses,
        }
    }

    pub async fn create_student(&self, student: Student) -> AppResult<Student> {
        if student.username.trim().is_empty() {
            return Err(AppError::ValidationError(
                "student username must not be blank".to_string(),
            ));
        }
        if self
            .students
            .find_by_username(&student.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "student with username '{}'",
                student.username
            )));
        }

        let student = self.students.save(student).await?;
        info!("created student {} ('{}')", student.id, student.username);
        Ok(student)
    }

    pub async fn update_student(&self, student: Student) -> AppResult<Student> {
        self.students
            .find_by_id(student.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id '{}' not found", student.id)))?;
        self.students.save(student).await
    }

    pub async fn create_teacher(&self, teacher: Teacher) -> AppResult<Teacher> {
        if teacher.username.trim().is_empty() {
            return Err(AppError::ValidationError(
                "teacher username must not be blank".to_string(),
            ));
        }
        if self
            .teachers
            .find_by_username(&teacher.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "teacher with username '{}'",
                teacher.username
            )));
        }

        let teacher = self.teachers.save(teacher).await?;
        info!("created teacher {} ('{}')", teacher.id, teacher.username);
        Ok(teacher)
    }

    pub async fn update_teacher(&self, teacher: Teacher) -> AppResult<Teacher> {
        self.teachers
            .find_by_id(teacher.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Teacher with id '{}' not found", teacher.id)))?;
        self.teachers.save(teacher).await
    }

    /// Creates or updates a course. A new course must not reuse an existing
    /// code, and an assigned teacher must exist.
    pub async fn save_course(&self, course: Course) -> AppResult<Course> {
        if course.code.trim().is_empty() {
            return Err(AppError::ValidationError(
                "course code must not be blank".to_string(),
            ));
        }

        if let Some(existing) = self.courses.find_by_code(&course.code).await? {
            if existing.id != course.id {
                return Err(AppError::AlreadyExists(format!(
                    "course with code '{}'",
                    course.code
                )));
            }
        }

        if let Some(teacher_id) = course.teacher_id {
            self.teachers
                .find_by_id(teacher_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Teacher with id '{}' not found", teacher_id))
                })?;
        }

        self.courses.save(course).await
    }

    /// Re-points a course at another teacher, or clears the assignment with
    /// `None`.
    pub async fn assign_teacher(
        &self,
        course_id: i64,
        teacher_id: Option<i64>,
    ) -> AppResult<Course> {
        let mut course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", course_id)))?;

        if let Some(teacher_id) = teacher_id {
            self.teachers
                .find_by_id(teacher_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Teacher with id '{}' not found", teacher_id))
                })?;
        }

        course.teacher_id = teacher_id;
        self.courses.save(course).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        course_repository::MockCourseRepository, student_repository::MockStudentRepository,
        teacher_repository::MockTeacherRepository,
    };

    #[tokio::test]
    async fn create_student_rejects_duplicate_username() {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_by_username()
            .returning(|username| Ok(Some(Student::test_student(username))));

        let service = AdminService::new(
            Arc::new(students),
            Arc::new(MockTeacherRepository::new()),
            Arc::new(MockCourseRepository::new()),
        );

        let result = service.create_student(Student::test_student("jdoe")).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn create_student_rejects_blank_username_before_any_lookup() {
        let service = AdminService::new(
            Arc::new(MockStudentRepository::new()),
            Arc::new(MockTeacherRepository::new()),
            Arc::new(MockCourseRepository::new()),
        );

        let mut student = Student::test_student("jdoe");
        student.username = "  ".to_string();

        let result = service.create_student(student).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn create_teacher_rejects_duplicate_username() {
        let mut teachers = MockTeacherRepository::new();
        teachers
            .expect_find_by_username()
            .returning(|username| Ok(Some(Teacher::test_teacher(username))));

        let service = AdminService::new(
            Arc::new(MockStudentRepository::new()),
            Arc::new(teachers),
            Arc::new(MockCourseRepository::new()),
        );

        let result = service.create_teacher(Teacher::test_teacher("asmith")).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn save_course_requires_existing_teacher() {
        let mut teachers = MockTeacherRepository::new();
        teachers.expect_find_by_id().returning(|_| Ok(None));
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_code().returning(|_| Ok(None));

        let service = AdminService::new(
            Arc::new(MockStudentRepository::new()),
            Arc::new(teachers),
            Arc::new(courses),
        );

        let result = service
            .save_course(Course::new("CS101", "Intro", Some(42)))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
