//! Student orchestrator service.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::data::{GroupRepository, StudentRepository, StudentWithRelations};
use crate::error::{DomainError, EntityKind};
use crate::model::group::Group;
use crate::model::student::{Student, StudentDetail, StudentRequest};
use crate::model::AssociationAction;
use crate::service::{CourseEnrollmentService, GroupMembershipService};

/// Orchestrates student CRUD and the student's side of both associations.
///
/// Every mutating operation opens one transaction, applies scalar fields,
/// then the group link, then the course set, and commits only when every
/// step succeeded.
pub struct StudentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StudentService<'a> {
    /// Creates a new StudentService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a student, optionally assigned and enrolled in one call.
    ///
    /// # Arguments
    /// - `request` - Payload; `first_name` and `last_name` are required,
    ///   `group_id` and `course_ids` are optional
    ///
    /// # Returns
    /// - `Ok(StudentDetail)` - The persisted student with relations loaded
    /// - `Err(DomainError::Validation)` - A required field is missing
    /// - `Err(DomainError::NotFound)` - The group or a course id does not exist
    /// - `Err(DomainError::Db)` - Database error
    pub async fn create(&self, request: &StudentRequest) -> Result<StudentDetail, DomainError> {
        let txn = self.db.begin().await?;
        match self.create_in(&txn, request).await {
            Ok(detail) => {
                txn.commit().await?;
                tracing::info!(student_id = detail.id, "student created");
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
        request: &StudentRequest,
    ) -> Result<StudentDetail, DomainError> {
        let first_name = request
            .first_name
            .as_deref()
            .ok_or_else(|| DomainError::Validation("first_name must be provided".to_string()))?;
        let last_name = request
            .last_name
            .as_deref()
            .ok_or_else(|| DomainError::Validation("last_name must be provided".to_string()))?;

        if let Some(group_id) = request.group_id {
            self.resolve_group(conn, group_id).await?;
        }

        let student = StudentRepository::new(conn)
            .insert(first_name, last_name, request.group_id)
            .await?;

        if let Some(course_ids) = &request.course_ids {
            CourseEnrollmentService::new(conn)
                .enroll_student(student.id, course_ids)
                .await?;
        }

        self.fetch_detail_in(conn, student.id).await
    }

    /// Fetches a student with its group and course set loaded.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student
    ///
    /// # Returns
    /// - `Ok(StudentDetail)` - Student found
    /// - `Err(DomainError::NotFound)` - No student with that id
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_one(&self, student_id: i32) -> Result<StudentDetail, DomainError> {
        self.fetch_detail_in(self.db, student_id).await
    }

    /// Lists all students with their relations loaded, ordered by id.
    ///
    /// # Returns
    /// - `Ok(Vec<StudentDetail>)` - All students
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_all(&self) -> Result<Vec<StudentDetail>, DomainError> {
        let rows = StudentRepository::new(self.db).get_all_with_relations().await?;

        Ok(rows.into_iter().map(Self::into_detail).collect())
    }

    /// Finds a student by exact first and last name.
    ///
    /// When several students share the name, the one with the lowest id wins.
    ///
    /// # Arguments
    /// - `first_name` - First name to match exactly
    /// - `last_name` - Last name to match exactly
    ///
    /// # Returns
    /// - `Ok(Some(StudentDetail))` - Matching student with relations loaded
    /// - `Ok(None)` - No student with that name
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<StudentDetail>, DomainError> {
        let Some(student) = StudentRepository::new(self.db)
            .get_by_name(first_name, last_name)
            .await?
        else {
            return Ok(None);
        };

        self.fetch_detail_in(self.db, student.id).await.map(Some)
    }

    /// Applies a partial update to a student.
    ///
    /// Order within the transaction: scalar fields, then the group link, then
    /// the course set. The `action` discriminator selects whether provided
    /// associations are added or removed; absent fields are untouched.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student to update
    /// - `request` - Fields to change; `None` fields are left as they are
    /// - `action` - Whether provided associations are appended or removed
    ///
    /// # Returns
    /// - `Ok(StudentDetail)` - Post-update state with relations loaded
    /// - `Err(DomainError::NotFound)` - Student, group or a course id missing
    /// - `Err(DomainError::AlreadyAssigned)` - Append to an assigned student
    /// - `Err(DomainError::NotAssigned)` - Remove from the wrong group
    /// - `Err(DomainError::AlreadyEnrolled)` - Append of a present pair
    /// - `Err(DomainError::NotEnrolled)` - Remove of an absent pair
    /// - `Err(DomainError::Db)` - Database error
    pub async fn patch(
        &self,
        student_id: i32,
        request: &StudentRequest,
        action: AssociationAction,
    ) -> Result<StudentDetail, DomainError> {
        let txn = self.db.begin().await?;
        match self.patch_in(&txn, student_id, request, action).await {
            Ok(detail) => {
                txn.commit().await?;
                tracing::info!(student_id, ?action, "student patched");
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
        student_id: i32,
        request: &StudentRequest,
        action: AssociationAction,
    ) -> Result<StudentDetail, DomainError> {
        let students = StudentRepository::new(conn);
        let student = self.resolve_student(conn, student_id).await?;

        let student = students.apply_scalars(&student, &request.scalar_update()).await?;

        if let Some(group_id) = request.group_id {
            let group = self.resolve_group(conn, group_id).await?;
            let membership = GroupMembershipService::new(conn);
            match action {
                AssociationAction::Append => membership.assign(&student, &group).await?,
                AssociationAction::Remove => membership.unassign(&student, group.id).await?,
            }
        }

        if let Some(course_ids) = &request.course_ids {
            let enrollment = CourseEnrollmentService::new(conn);
            match action {
                AssociationAction::Append => {
                    enrollment.enroll_student(student.id, course_ids).await?
                }
                AssociationAction::Remove => {
                    enrollment.unenroll_student(student.id, course_ids).await?
                }
            }
        }

        self.fetch_detail_in(conn, student.id).await
    }

    /// Replaces a student's scalar fields and associations wholesale.
    ///
    /// Every field except `group_id` must be provided. `group_id` is a single
    /// nullable link, so `Some` replaces the current group outright and `None`
    /// clears it. The course set ends up as exactly the distinct requested
    /// courses.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student to replace
    /// - `request` - Complete replacement payload
    ///
    /// # Returns
    /// - `Ok(StudentDetail)` - Post-replacement state with relations loaded
    /// - `Err(DomainError::Validation)` - A required field is missing
    /// - `Err(DomainError::NotFound)` - Student, group or a course id missing
    /// - `Err(DomainError::Db)` - Database error
    pub async fn put(
        &self,
        student_id: i32,
        request: &StudentRequest,
    ) -> Result<StudentDetail, DomainError> {
        request.require_complete()?;

        let txn = self.db.begin().await?;
        match self.put_in(&txn, student_id, request).await {
            Ok(detail) => {
                txn.commit().await?;
                tracing::info!(student_id, "student replaced");
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
        student_id: i32,
        request: &StudentRequest,
    ) -> Result<StudentDetail, DomainError> {
        let students = StudentRepository::new(conn);
        let student = self.resolve_student(conn, student_id).await?;

        let student = students.apply_scalars(&student, &request.scalar_update()).await?;

        if let Some(group_id) = request.group_id {
            self.resolve_group(conn, group_id).await?;
        }
        students.set_group(student.id, request.group_id).await?;

        if let Some(course_ids) = &request.course_ids {
            CourseEnrollmentService::new(conn)
                .replace_student_courses(student.id, course_ids)
                .await?;
        }

        self.fetch_detail_in(conn, student.id).await
    }

    /// Deletes a student and its enrollment edges.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student to delete
    ///
    /// # Returns
    /// - `Ok(())` - Student removed
    /// - `Err(DomainError::NotFound)` - No student with that id
    /// - `Err(DomainError::Db)` - Database error
    pub async fn delete(&self, student_id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;
        let result = async {
            self.resolve_student(&txn, student_id).await?;
            StudentRepository::new(&txn).delete(student_id).await?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                txn.commit().await?;
                tracing::info!(student_id, "student deleted");
                Ok(())
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn resolve_student<C: ConnectionTrait>(
        &self,
        conn: &C,
        student_id: i32,
    ) -> Result<Student, DomainError> {
        StudentRepository::new(conn)
            .get_by_id(student_id)
            .await?
            .ok_or(DomainError::NotFound {
                kind: EntityKind::Student,
                ids: vec![student_id],
            })
    }

    async fn resolve_group<C: ConnectionTrait>(
        &self,
        conn: &C,
        group_id: i32,
    ) -> Result<Group, DomainError> {
        GroupRepository::new(conn)
            .get_by_id(group_id)
            .await?
            .ok_or(DomainError::NotFound {
                kind: EntityKind::Group,
                ids: vec![group_id],
            })
    }

    async fn fetch_detail_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        student_id: i32,
    ) -> Result<StudentDetail, DomainError> {
        StudentRepository::new(conn)
            .get_with_relations(student_id)
            .await?
            .map(Self::into_detail)
            .ok_or(DomainError::NotFound {
                kind: EntityKind::Student,
                ids: vec![student_id],
            })
    }

    fn into_detail((student, group, courses): StudentWithRelations) -> StudentDetail {
        StudentDetail {
            id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            group: group.map(Into::into),
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }
}
