//! Course orchestrator service.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::data::{CourseRepository, CourseWithStudents};
use crate::error::{DomainError, EntityKind};
use crate::model::course::{Course, CourseDetail, CourseRequest, CourseSummary};
use crate::model::AssociationAction;
use crate::service::CourseEnrollmentService;

/// Orchestrates course CRUD and the course's side of enrollment.
pub struct CourseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourseService<'a> {
    /// Creates a new CourseService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a course, optionally enrolling a batch of students in one call.
    ///
    /// # Arguments
    /// - `request` - Payload; `name` and `description` are required,
    ///   `student_ids` is optional
    ///
    /// # Returns
    /// - `Ok(CourseDetail)` - The persisted course with its student list
    /// - `Err(DomainError::Validation)` - A required field is missing
    /// - `Err(DomainError::NotFound)` - A student id does not exist
    /// - `Err(DomainError::Db)` - Database error (e.g. duplicate name)
    pub async fn create(&self, request: &CourseRequest) -> Result<CourseDetail, DomainError> {
        let txn = self.db.begin().await?;
        match self.create_in(&txn, request).await {
            Ok(detail) => {
                txn.commit().await?;
                tracing::info!(course_id = detail.id, "course created");
                Ok(detail)
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn create_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        request: &CourseRequest,
    ) -> Result<CourseDetail, DomainError> {
        let name = request
            .name
            .as_deref()
            .ok_or_else(|| DomainError::Validation("name must be provided".to_string()))?;
        let description = request
            .description
            .as_deref()
            .ok_or_else(|| DomainError::Validation("description must be provided".to_string()))?;

        let course = CourseRepository::new(conn).insert(name, description).await?;

        if let Some(student_ids) = &request.student_ids {
            CourseEnrollmentService::new(conn)
                .enroll_course(course.id, student_ids)
                .await?;
        }

        self.fetch_detail_in(conn, course.id).await
    }

    /// Fetches a course with its enrolled student list loaded.
    ///
    /// # Arguments
    /// - `course_id` - ID of the course
    ///
    /// # Returns
    /// - `Ok(CourseDetail)` - Course found
    /// - `Err(DomainError::NotFound)` - No course with that id
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_one(&self, course_id: i32) -> Result<CourseDetail, DomainError> {
        self.fetch_detail_in(self.db, course_id).await
    }

    /// Lists all courses with their student lists loaded, ordered by id.
    ///
    /// # Returns
    /// - `Ok(Vec<CourseDetail>)` - All courses
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_all(&self) -> Result<Vec<CourseDetail>, DomainError> {
        let rows = CourseRepository::new(self.db).get_all_with_students().await?;

        Ok(rows.into_iter().map(Self::into_detail).collect())
    }

    /// Lists all courses without loading student lists, ordered by id.
    ///
    /// # Returns
    /// - `Ok(Vec<CourseSummary>)` - All courses as bare views
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_all_summaries(&self) -> Result<Vec<CourseSummary>, DomainError> {
        let courses = CourseRepository::new(self.db).get_all().await?;

        Ok(courses.into_iter().map(Into::into).collect())
    }

    /// Finds a course by its unique name.
    ///
    /// # Arguments
    /// - `name` - Course name to match exactly
    ///
    /// # Returns
    /// - `Ok(Some(CourseDetail))` - Matching course with its student list
    /// - `Ok(None)` - No course with that name
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_by_name(&self, name: &str) -> Result<Option<CourseDetail>, DomainError> {
        let Some(course) = CourseRepository::new(self.db).get_by_name(name).await? else {
            return Ok(None);
        };

        self.fetch_detail_in(self.db, course.id).await.map(Some)
    }

    /// Applies a partial update to a course.
    ///
    /// The `action` discriminator selects whether the provided student batch
    /// is enrolled or unenrolled; absent fields are untouched.
    ///
    /// # Arguments
    /// - `course_id` - ID of the course to update
    /// - `request` - Fields to change; `None` fields are left as they are
    /// - `action` - Whether provided students are appended or removed
    ///
    /// # Returns
    /// - `Ok(CourseDetail)` - Post-update state with the student list loaded
    /// - `Err(DomainError::NotFound)` - Course or a student id missing
    /// - `Err(DomainError::AlreadyEnrolled)` - Append of a present pair
    /// - `Err(DomainError::NotEnrolled)` - Remove of an absent pair
    /// - `Err(DomainError::Db)` - Database error
    pub async fn patch(
        &self,
        course_id: i32,
        request: &CourseRequest,
        action: AssociationAction,
    ) -> Result<CourseDetail, DomainError> {
        let txn = self.db.begin().await?;
        match self.patch_in(&txn, course_id, request, action).await {
            Ok(detail) => {
                txn.commit().await?;
                tracing::info!(course_id, ?action, "course patched");
                Ok(detail)
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn patch_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        course_id: i32,
        request: &CourseRequest,
        action: AssociationAction,
    ) -> Result<CourseDetail, DomainError> {
        let course = self.resolve_course(conn, course_id).await?;

        let course = CourseRepository::new(conn)
            .apply_scalars(&course, &request.scalar_update())
            .await?;

        if let Some(student_ids) = &request.student_ids {
            let enrollment = CourseEnrollmentService::new(conn);
            match action {
                AssociationAction::Append => {
                    enrollment.enroll_course(course.id, student_ids).await?
                }
                AssociationAction::Remove => {
                    enrollment.unenroll_course(course.id, student_ids).await?
                }
            }
        }

        self.fetch_detail_in(conn, course.id).await
    }

    /// Replaces a course's scalar fields and student set wholesale.
    ///
    /// The enrolled set ends up as exactly the distinct requested students.
    ///
    /// # Arguments
    /// - `course_id` - ID of the course to replace
    /// - `request` - Complete replacement payload
    ///
    /// # Returns
    /// - `Ok(CourseDetail)` - Post-replacement state with the student list
    /// - `Err(DomainError::Validation)` - A required field is missing
    /// - `Err(DomainError::NotFound)` - Course or a student id missing
    /// - `Err(DomainError::Db)` - Database error
    pub async fn put(
        &self,
        course_id: i32,
        request: &CourseRequest,
    ) -> Result<CourseDetail, DomainError> {
        request.require_complete()?;

        let txn = self.db.begin().await?;
        match self.put_in(&txn, course_id, request).await {
            Ok(detail) => {
                txn.commit().await?;
                tracing::info!(course_id, "course replaced");
                Ok(detail)
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn put_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        course_id: i32,
        request: &CourseRequest,
    ) -> Result<CourseDetail, DomainError> {
        let course = self.resolve_course(conn, course_id).await?;

        let course = CourseRepository::new(conn)
            .apply_scalars(&course, &request.scalar_update())
            .await?;

        if let Some(student_ids) = &request.student_ids {
            CourseEnrollmentService::new(conn)
                .replace_course_students(course.id, student_ids)
                .await?;
        }

        self.fetch_detail_in(conn, course.id).await
    }

    /// Deletes a course and its enrollment edges.
    ///
    /// Unlike groups, a course with enrolled students can be deleted; the
    /// edges are pure existence indicators and go with it.
    ///
    /// # Arguments
    /// - `course_id` - ID of the course to delete
    ///
    /// # Returns
    /// - `Ok(())` - Course removed
    /// - `Err(DomainError::NotFound)` - No course with that id
    /// - `Err(DomainError::Db)` - Database error
    pub async fn delete(&self, course_id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;
        let result = async {
            self.resolve_course(&txn, course_id).await?;
            CourseRepository::new(&txn).delete(course_id).await?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                txn.commit().await?;
                tracing::info!(course_id, "course deleted");
                Ok(())
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn resolve_course<C: ConnectionTrait>(
        &self,
        conn: &C,
        course_id: i32,
    ) -> Result<Course, DomainError> {
        CourseRepository::new(conn)
            .get_by_id(course_id)
            .await?
            .ok_or(DomainError::NotFound {
                kind: EntityKind::Course,
                ids: vec![course_id],
            })
    }

    async fn fetch_detail_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        course_id: i32,
    ) -> Result<CourseDetail, DomainError> {
        CourseRepository::new(conn)
            .get_with_students(course_id)
            .await?
            .map(Self::into_detail)
            .ok_or(DomainError::NotFound {
                kind: EntityKind::Course,
                ids: vec![course_id],
            })
    }

    fn into_detail((course, students): CourseWithStudents) -> CourseDetail {
        CourseDetail {
            id: course.id,
            name: course.name,
            description: course.description,
            students: students.into_iter().map(Into::into).collect(),
        }
    }
}
