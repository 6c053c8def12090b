//! Enrollment edge repository for database operations.
//!
//! This module provides the `EnrollmentRepository` for the `student_course`
//! junction table. An edge is a pure existence indicator for a
//! (student, course) pair; the composite primary key is the uniqueness
//! guarantee. All validation lives in the service layer — these methods only
//! move edges.

use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Repository for student-course enrollment edges.
pub struct EnrollmentRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> EnrollmentRepository<'a, C> {
    /// Creates a new EnrollmentRepository instance.
    ///
    /// # Arguments
    /// - `conn` - Connection or transaction handle for executing queries
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Lists the course ids a student is enrolled in.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student endpoint
    ///
    /// # Returns
    /// - `Ok(Vec<i32>)` - Course ids in ascending order
    /// - `Err(DbErr)` - Database error during query
    pub async fn course_ids_for_student(&self, student_id: i32) -> Result<Vec<i32>, DbErr> {
        let edges = entity::prelude::StudentCourse::find()
            .filter(entity::student_course::Column::StudentId.eq(student_id))
            .order_by_asc(entity::student_course::Column::CourseId)
            .all(self.conn)
            .await?;

        Ok(edges.into_iter().map(|e| e.course_id).collect())
    }

    /// Lists the student ids enrolled in a course.
    ///
    /// # Arguments
    /// - `course_id` - ID of the course endpoint
    ///
    /// # Returns
    /// - `Ok(Vec<i32>)` - Student ids in ascending order
    /// - `Err(DbErr)` - Database error during query
    pub async fn student_ids_for_course(&self, course_id: i32) -> Result<Vec<i32>, DbErr> {
        let edges = entity::prelude::StudentCourse::find()
            .filter(entity::student_course::Column::CourseId.eq(course_id))
            .order_by_asc(entity::student_course::Column::StudentId)
            .all(self.conn)
            .await?;

        Ok(edges.into_iter().map(|e| e.student_id).collect())
    }

    /// Checks whether an enrollment edge exists.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student endpoint
    /// - `course_id` - ID of the course endpoint
    ///
    /// # Returns
    /// - `Ok(true)` - The pair is enrolled
    /// - `Ok(false)` - No such edge
    /// - `Err(DbErr)` - Database error during query
    pub async fn exists(&self, student_id: i32, course_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::StudentCourse::find()
            .filter(entity::student_course::Column::StudentId.eq(student_id))
            .filter(entity::student_course::Column::CourseId.eq(course_id))
            .count(self.conn)
            .await?;

        Ok(count > 0)
    }

    /// Inserts enrollment edges for a batch of pairs.
    ///
    /// The caller must have validated that no pair already exists; a duplicate
    /// surfaces as a primary key violation from the driver.
    ///
    /// # Arguments
    /// - `pairs` - (student_id, course_id) pairs to insert
    ///
    /// # Returns
    /// - `Ok(())` - All edges inserted (returns early if the slice is empty)
    /// - `Err(DbErr)` - Database error during insert
    pub async fn insert_many(&self, pairs: &[(i32, i32)]) -> Result<(), DbErr> {
        if pairs.is_empty() {
            return Ok(());
        }

        let models = pairs
            .iter()
            .map(|&(student_id, course_id)| entity::student_course::ActiveModel {
                student_id: ActiveValue::Set(student_id),
                course_id: ActiveValue::Set(course_id),
            });

        entity::prelude::StudentCourse::insert_many(models)
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Deletes enrollment edges for a batch of pairs.
    ///
    /// Pairs with no matching edge are silently skipped; the caller validates
    /// presence beforehand when that matters.
    ///
    /// # Arguments
    /// - `pairs` - (student_id, course_id) pairs to delete
    ///
    /// # Returns
    /// - `Ok(())` - Matching edges removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_many(&self, pairs: &[(i32, i32)]) -> Result<(), DbErr> {
        for &(student_id, course_id) in pairs {
            entity::prelude::StudentCourse::delete_many()
                .filter(entity::student_course::Column::StudentId.eq(student_id))
                .filter(entity::student_course::Column::CourseId.eq(course_id))
                .exec(self.conn)
                .await?;
        }
        Ok(())
    }

    /// Deletes every enrollment edge of a student.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student endpoint
    ///
    /// # Returns
    /// - `Ok(())` - All edges removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_student(&self, student_id: i32) -> Result<(), DbErr> {
        entity::prelude::StudentCourse::delete_many()
            .filter(entity::student_course::Column::StudentId.eq(student_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Deletes every enrollment edge of a course.
    ///
    /// # Arguments
    /// - `course_id` - ID of the course endpoint
    ///
    /// # Returns
    /// - `Ok(())` - All edges removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_course(&self, course_id: i32) -> Result<(), DbErr> {
        entity::prelude::StudentCourse::delete_many()
            .filter(entity::student_course::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }
}
