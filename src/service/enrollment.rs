//! Course enrollment manager.
//!
//! Maintains unique, validated enrollment sets on the student-course junction.
//! Each edge is a pure existence indicator with two states: enrolling an
//! already-present pair is a conflict, unenrolling an absent pair is an
//! invalid state transition. Validation of the entire batch precedes any
//! mutation, so a failed call never applies part of a batch.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;

use crate::data::{CourseRepository, EnrollmentRepository, StudentRepository};
use crate::error::{DomainError, EntityKind};
use crate::model::course::Course;
use crate::model::student::Student;

/// Stateless service enforcing the no-duplicate-enrollment invariant.
pub struct CourseEnrollmentService<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CourseEnrollmentService<'a, C> {
    /// Creates a new CourseEnrollmentService instance.
    ///
    /// # Arguments
    /// - `conn` - Connection or transaction handle
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Resolves course ids, failing on any missing id.
    ///
    /// # Arguments
    /// - `course_ids` - IDs to resolve (duplicates allowed)
    ///
    /// # Returns
    /// - `Ok(Vec<Course>)` - Every distinct requested course
    /// - `Err(DomainError::NotFound)` - Lists each missing id
    /// - `Err(DomainError::Db)` - Database error during query
    pub async fn resolve_course_ids(&self, course_ids: &[i32]) -> Result<Vec<Course>, DomainError> {
        let lookup = CourseRepository::new(self.conn).get_by_ids(course_ids).await?;

        if !lookup.missing.is_empty() {
            return Err(DomainError::NotFound {
                kind: EntityKind::Course,
                ids: lookup.missing,
            });
        }
        Ok(lookup.found)
    }

    /// Resolves student ids, failing on any missing id.
    ///
    /// # Arguments
    /// - `student_ids` - IDs to resolve (duplicates allowed)
    ///
    /// # Returns
    /// - `Ok(Vec<Student>)` - Every distinct requested student
    /// - `Err(DomainError::NotFound)` - Lists each missing id
    /// - `Err(DomainError::Db)` - Database error during query
    pub async fn resolve_student_ids(
        &self,
        student_ids: &[i32],
    ) -> Result<Vec<Student>, DomainError> {
        let lookup = StudentRepository::new(self.conn).get_by_ids(student_ids).await?;

        if !lookup.missing.is_empty() {
            return Err(DomainError::NotFound {
                kind: EntityKind::Student,
                ids: lookup.missing,
            });
        }
        Ok(lookup.found)
    }

    /// Enrolls a student in a batch of courses.
    ///
    /// Every course must exist and every pair must be absent before any edge
    /// is inserted.
    ///
    /// # Arguments
    /// - `student_id` - Student to enroll
    /// - `course_ids` - Courses to add (duplicates collapse to one edge)
    ///
    /// # Returns
    /// - `Ok(())` - All edges inserted
    /// - `Err(DomainError::NotFound)` - A course id does not exist
    /// - `Err(DomainError::AlreadyEnrolled)` - Names the offending pair
    /// - `Err(DomainError::Db)` - Database error
    pub async fn enroll_student(
        &self,
        student_id: i32,
        course_ids: &[i32],
    ) -> Result<(), DomainError> {
        let courses = self.resolve_course_ids(course_ids).await?;

        let edges = EnrollmentRepository::new(self.conn);
        let current: HashSet<i32> = edges
            .course_ids_for_student(student_id)
            .await?
            .into_iter()
            .collect();

        for course in &courses {
            if current.contains(&course.id) {
                return Err(DomainError::AlreadyEnrolled {
                    student_id,
                    course_id: course.id,
                });
            }
        }

        let pairs: Vec<(i32, i32)> = courses.iter().map(|c| (student_id, c.id)).collect();
        edges.insert_many(&pairs).await?;
        tracing::debug!(student_id, count = pairs.len(), "student enrolled in courses");
        Ok(())
    }

    /// Unenrolls a student from a batch of courses.
    ///
    /// Every course must exist and every pair must be present before any edge
    /// is deleted.
    ///
    /// # Arguments
    /// - `student_id` - Student to unenroll
    /// - `course_ids` - Courses to remove
    ///
    /// # Returns
    /// - `Ok(())` - All edges removed
    /// - `Err(DomainError::NotFound)` - A course id does not exist
    /// - `Err(DomainError::NotEnrolled)` - Names the offending pair
    /// - `Err(DomainError::Db)` - Database error
    pub async fn unenroll_student(
        &self,
        student_id: i32,
        course_ids: &[i32],
    ) -> Result<(), DomainError> {
        let courses = self.resolve_course_ids(course_ids).await?;

        let edges = EnrollmentRepository::new(self.conn);
        let current: HashSet<i32> = edges
            .course_ids_for_student(student_id)
            .await?
            .into_iter()
            .collect();

        for course in &courses {
            if !current.contains(&course.id) {
                return Err(DomainError::NotEnrolled {
                    student_id,
                    course_id: course.id,
                });
            }
        }

        let pairs: Vec<(i32, i32)> = courses.iter().map(|c| (student_id, c.id)).collect();
        edges.delete_many(&pairs).await?;
        tracing::debug!(student_id, count = pairs.len(), "student unenrolled from courses");
        Ok(())
    }

    /// Enrolls a batch of students in a course.
    ///
    /// Mirror of `enroll_student` from the course side.
    ///
    /// # Arguments
    /// - `course_id` - Course to enroll into
    /// - `student_ids` - Students to add (duplicates collapse to one edge)
    ///
    /// # Returns
    /// - `Ok(())` - All edges inserted
    /// - `Err(DomainError::NotFound)` - A student id does not exist
    /// - `Err(DomainError::AlreadyEnrolled)` - Names the offending pair
    /// - `Err(DomainError::Db)` - Database error
    pub async fn enroll_course(
        &self,
        course_id: i32,
        student_ids: &[i32],
    ) -> Result<(), DomainError> {
        let students = self.resolve_student_ids(student_ids).await?;

        let edges = EnrollmentRepository::new(self.conn);
        let current: HashSet<i32> = edges
            .student_ids_for_course(course_id)
            .await?
            .into_iter()
            .collect();

        for student in &students {
            if current.contains(&student.id) {
                return Err(DomainError::AlreadyEnrolled {
                    student_id: student.id,
                    course_id,
                });
            }
        }

        let pairs: Vec<(i32, i32)> = students.iter().map(|s| (s.id, course_id)).collect();
        edges.insert_many(&pairs).await?;
        tracing::debug!(course_id, count = pairs.len(), "students enrolled in course");
        Ok(())
    }

    /// Unenrolls a batch of students from a course.
    ///
    /// Mirror of `unenroll_student` from the course side.
    ///
    /// # Arguments
    /// - `course_id` - Course to unenroll from
    /// - `student_ids` - Students to remove
    ///
    /// # Returns
    /// - `Ok(())` - All edges removed
    /// - `Err(DomainError::NotFound)` - A student id does not exist
    /// - `Err(DomainError::NotEnrolled)` - Names the offending pair
    /// - `Err(DomainError::Db)` - Database error
    pub async fn unenroll_course(
        &self,
        course_id: i32,
        student_ids: &[i32],
    ) -> Result<(), DomainError> {
        let students = self.resolve_student_ids(student_ids).await?;

        let edges = EnrollmentRepository::new(self.conn);
        let current: HashSet<i32> = edges
            .student_ids_for_course(course_id)
            .await?
            .into_iter()
            .collect();

        for student in &students {
            if !current.contains(&student.id) {
                return Err(DomainError::NotEnrolled {
                    student_id: student.id,
                    course_id,
                });
            }
        }

        let pairs: Vec<(i32, i32)> = students.iter().map(|s| (s.id, course_id)).collect();
        edges.delete_many(&pairs).await?;
        tracing::debug!(course_id, count = pairs.len(), "students unenrolled from course");
        Ok(())
    }

    /// Replaces a student's course set with exactly the requested courses.
    ///
    /// Used by full-replacement (put): the existing edges are cleared, then
    /// the validated requested set is inserted, so the student ends up with
    /// exactly the distinct requested courses regardless of prior state.
    ///
    /// # Arguments
    /// - `student_id` - Student whose set is replaced
    /// - `course_ids` - Full replacement course list
    ///
    /// # Returns
    /// - `Ok(())` - Set replaced
    /// - `Err(DomainError::NotFound)` - A course id does not exist (nothing cleared)
    /// - `Err(DomainError::Db)` - Database error
    pub async fn replace_student_courses(
        &self,
        student_id: i32,
        course_ids: &[i32],
    ) -> Result<(), DomainError> {
        let courses = self.resolve_course_ids(course_ids).await?;

        let edges = EnrollmentRepository::new(self.conn);
        edges.delete_by_student(student_id).await?;

        let pairs: Vec<(i32, i32)> = courses.iter().map(|c| (student_id, c.id)).collect();
        edges.insert_many(&pairs).await?;
        tracing::debug!(student_id, count = pairs.len(), "student course set replaced");
        Ok(())
    }

    /// Replaces a course's student set with exactly the requested students.
    ///
    /// Mirror of `replace_student_courses` from the course side.
    ///
    /// # Arguments
    /// - `course_id` - Course whose set is replaced
    /// - `student_ids` - Full replacement student list
    ///
    /// # Returns
    /// - `Ok(())` - Set replaced
    /// - `Err(DomainError::NotFound)` - A student id does not exist (nothing cleared)
    /// - `Err(DomainError::Db)` - Database error
    pub async fn replace_course_students(
        &self,
        course_id: i32,
        student_ids: &[i32],
    ) -> Result<(), DomainError> {
        let students = self.resolve_student_ids(student_ids).await?;

        let edges = EnrollmentRepository::new(self.conn);
        edges.delete_by_course(course_id).await?;

        let pairs: Vec<(i32, i32)> = students.iter().map(|s| (s.id, course_id)).collect();
        edges.insert_many(&pairs).await?;
        tracing::debug!(course_id, count = pairs.len(), "course student set replaced");
        Ok(())
    }
}
