//! Group orchestrator service.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::data::{GroupRepository, GroupWithStudents, StudentRepository};
use crate::error::{DomainError, EntityKind};
use crate::model::group::{Group, GroupDetail, GroupRequest, GroupSummary};
use crate::model::student::{MembershipFilter, StudentSummary};
use crate::model::AssociationAction;
use crate::service::GroupMembershipService;

/// Orchestrates group CRUD and the group's side of membership.
///
/// The member list is always derived from the student rows, so batch
/// membership changes here delegate to the membership manager rather than
/// writing any group-side state.
pub struct GroupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupService<'a> {
    /// Creates a new GroupService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a group, optionally pulling a batch of students in.
    ///
    /// Requested students must all exist and be unassigned; otherwise the
    /// whole call rolls back, including the group row.
    ///
    /// # Arguments
    /// - `request` - Payload; `name` is required, `student_ids` is optional
    ///
    /// # Returns
    /// - `Ok(GroupDetail)` - The persisted group with its member list
    /// - `Err(DomainError::Validation)` - `name` is missing
    /// - `Err(DomainError::NotFound)` - A student id is missing or ineligible
    /// - `Err(DomainError::Db)` - Database error (e.g. duplicate name)
    pub async fn create(&self, request: &GroupRequest) -> Result<GroupDetail, DomainError> {
        let txn = self.db.begin().await?;
        match self.create_in(&txn, request).await {
            Ok(detail) => {
                txn.commit().await?;
                tracing::info!(group_id = detail.id, "group created");
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
        request: &GroupRequest,
    ) -> Result<GroupDetail, DomainError> {
        let name = request
            .name
            .as_deref()
            .ok_or_else(|| DomainError::Validation("name must be provided".to_string()))?;

        let group = GroupRepository::new(conn).insert(name).await?;

        if let Some(student_ids) = &request.student_ids {
            GroupMembershipService::new(conn)
                .assign_members(&group, student_ids)
                .await?;
        }

        self.fetch_detail_in(conn, group.id).await
    }

    /// Fetches a group with its member list loaded.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group
    ///
    /// # Returns
    /// - `Ok(GroupDetail)` - Group found
    /// - `Err(DomainError::NotFound)` - No group with that id
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_one(&self, group_id: i32) -> Result<GroupDetail, DomainError> {
        self.fetch_detail_in(self.db, group_id).await
    }

    /// Lists all groups with their member lists loaded, ordered by id.
    ///
    /// # Returns
    /// - `Ok(Vec<GroupDetail>)` - All groups
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_all(&self) -> Result<Vec<GroupDetail>, DomainError> {
        let rows = GroupRepository::new(self.db).get_all_with_students().await?;

        Ok(rows.into_iter().map(Self::into_detail).collect())
    }

    /// Lists all groups without loading members, ordered by id.
    ///
    /// # Returns
    /// - `Ok(Vec<GroupSummary>)` - All groups as bare views
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_all_summaries(&self) -> Result<Vec<GroupSummary>, DomainError> {
        let groups = GroupRepository::new(self.db).get_all().await?;

        Ok(groups.into_iter().map(Into::into).collect())
    }

    /// Lists the members of a group as bare student views.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group
    ///
    /// # Returns
    /// - `Ok(Vec<StudentSummary>)` - Members in ascending id order
    /// - `Err(DomainError::NotFound)` - No group with that id
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_members(&self, group_id: i32) -> Result<Vec<StudentSummary>, DomainError> {
        self.resolve_group(self.db, group_id).await?;

        let students = StudentRepository::new(self.db).get_by_group(group_id).await?;

        Ok(students.into_iter().map(Into::into).collect())
    }

    /// Finds a group by its unique name.
    ///
    /// # Arguments
    /// - `name` - Group name to match exactly
    ///
    /// # Returns
    /// - `Ok(Some(GroupDetail))` - Matching group with its member list
    /// - `Ok(None)` - No group with that name
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_by_name(&self, name: &str) -> Result<Option<GroupDetail>, DomainError> {
        let Some(group) = GroupRepository::new(self.db).get_by_name(name).await? else {
            return Ok(None);
        };

        self.fetch_detail_in(self.db, group.id).await.map(Some)
    }

    /// Lists groups whose member count is between one and `max_students`.
    ///
    /// Empty groups are excluded: the bound is about how full a group is, and
    /// a group with no members is not a candidate. The count filter runs in
    /// the database rather than over loaded member lists.
    ///
    /// # Arguments
    /// - `max_students` - Inclusive upper bound on the member count
    ///
    /// # Returns
    /// - `Ok(Vec<GroupDetail>)` - Matching groups in ascending id order
    /// - `Err(DomainError::Db)` - Database error
    pub async fn fetch_by_max_students(
        &self,
        max_students: u64,
    ) -> Result<Vec<GroupDetail>, DomainError> {
        let rows = GroupRepository::new(self.db)
            .get_by_max_students(max_students)
            .await?;

        Ok(rows.into_iter().map(Self::into_detail).collect())
    }

    /// Applies a partial update to a group.
    ///
    /// The `action` discriminator selects whether the provided student batch
    /// is pulled into the group or removed from it; absent fields are
    /// untouched.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group to update
    /// - `request` - Fields to change; `None` fields are left as they are
    /// - `action` - Whether provided students are appended or removed
    ///
    /// # Returns
    /// - `Ok(GroupDetail)` - Post-update state with the member list loaded
    /// - `Err(DomainError::NotFound)` - Group missing, or a student id
    ///   missing or ineligible for the action
    /// - `Err(DomainError::Db)` - Database error
    pub async fn patch(
        &self,
        group_id: i32,
        request: &GroupRequest,
        action: AssociationAction,
    ) -> Result<GroupDetail, DomainError> {
        let txn = self.db.begin().await?;
        match self.patch_in(&txn, group_id, request, action).await {
            Ok(detail) => {
                txn.commit().await?;
                tracing::info!(group_id, ?action, "group patched");
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
        group_id: i32,
        request: &GroupRequest,
        action: AssociationAction,
    ) -> Result<GroupDetail, DomainError> {
        let group = self.resolve_group(conn, group_id).await?;

        let group = GroupRepository::new(conn)
            .apply_scalars(&group, request.name.as_deref())
            .await?;

        if let Some(student_ids) = &request.student_ids {
            let membership = GroupMembershipService::new(conn);
            match action {
                AssociationAction::Append => {
                    membership.assign_members(&group, student_ids).await?;
                }
                AssociationAction::Remove => {
                    membership.unassign_members(&group, student_ids).await?;
                }
            }
        }

        self.fetch_detail_in(conn, group.id).await
    }

    /// Replaces a group's name and member list wholesale.
    ///
    /// Current members are released first, then the requested batch is pulled
    /// in, so the group ends up with exactly the distinct requested students.
    /// A requested student who belongs to a *different* group still fails the
    /// batch.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group to replace
    /// - `request` - Complete replacement payload
    ///
    /// # Returns
    /// - `Ok(GroupDetail)` - Post-replacement state with the member list
    /// - `Err(DomainError::Validation)` - A required field is missing
    /// - `Err(DomainError::NotFound)` - Group missing, or a student id
    ///   missing or in another group
    /// - `Err(DomainError::Db)` - Database error
    pub async fn put(
        &self,
        group_id: i32,
        request: &GroupRequest,
    ) -> Result<GroupDetail, DomainError> {
        request.require_complete()?;

        let txn = self.db.begin().await?;
        match self.put_in(&txn, group_id, request).await {
            Ok(detail) => {
                txn.commit().await?;
                tracing::info!(group_id, "group replaced");
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
        group_id: i32,
        request: &GroupRequest,
    ) -> Result<GroupDetail, DomainError> {
        let group = self.resolve_group(conn, group_id).await?;

        let group = GroupRepository::new(conn)
            .apply_scalars(&group, request.name.as_deref())
            .await?;

        if let Some(student_ids) = &request.student_ids {
            let students = StudentRepository::new(conn);
            students.clear_group_members(group.id).await?;

            let membership = GroupMembershipService::new(conn);
            let members = membership
                .resolve_members(student_ids, MembershipFilter::Unassigned)
                .await?;
            let ids: Vec<i32> = members.iter().map(|s| s.id).collect();
            students.set_group_many(&ids, Some(group.id)).await?;
        }

        self.fetch_detail_in(conn, group.id).await
    }

    /// Deletes a group.
    ///
    /// A group that still has members cannot be deleted; the caller must
    /// move or release them first. This mirrors the restrictive foreign key
    /// on `students.group_id` with a domain-level error instead of a driver
    /// error.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group to delete
    ///
    /// # Returns
    /// - `Ok(())` - Group removed
    /// - `Err(DomainError::NotFound)` - No group with that id
    /// - `Err(DomainError::GroupNotEmpty)` - Members remain
    /// - `Err(DomainError::Db)` - Database error
    pub async fn delete(&self, group_id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;
        let result = async {
            self.resolve_group(&txn, group_id).await?;

            let student_count = StudentRepository::new(&txn).count_in_group(group_id).await?;
            if student_count > 0 {
                return Err(DomainError::GroupNotEmpty {
                    group_id,
                    student_count,
                });
            }

            GroupRepository::new(&txn).delete(group_id).await?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                txn.commit().await?;
                tracing::info!(group_id, "group deleted");
                Ok(())
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
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
        group_id: i32,
    ) -> Result<GroupDetail, DomainError> {
        GroupRepository::new(conn)
            .get_with_students(group_id)
            .await?
            .map(Self::into_detail)
            .ok_or(DomainError::NotFound {
                kind: EntityKind::Group,
                ids: vec![group_id],
            })
    }

    fn into_detail((group, students): GroupWithStudents) -> GroupDetail {
        GroupDetail {
            id: group.id,
            name: group.name,
            students: students.into_iter().map(Into::into).collect(),
        }
    }
}
