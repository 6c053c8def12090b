//! Group membership manager.
//!
//! Maintains the one-group-per-student invariant. The student row owns the
//! link, so every mutation here goes through the student repository; the
//! group's member list is always derived and can never disagree with it.

use sea_orm::ConnectionTrait;

use crate::data::StudentRepository;
use crate::error::{DomainError, EntityKind};
use crate::model::group::Group;
use crate::model::student::{MembershipFilter, Student};

/// Stateless service enforcing the at-most-one-group invariant.
///
/// Operates entirely on the connection handle it is given, which is the
/// enclosing request's transaction in every mutating path.
pub struct GroupMembershipService<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> GroupMembershipService<'a, C> {
    /// Creates a new GroupMembershipService instance.
    ///
    /// # Arguments
    /// - `conn` - Connection or transaction handle
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Assigns a student to a group.
    ///
    /// A student already belonging to *any* group is a conflict, even when
    /// the target is the same group; callers must unassign first. The error
    /// names the student's current group so the caller can do so.
    ///
    /// # Arguments
    /// - `student` - Current student state
    /// - `group` - Group to assign
    ///
    /// # Returns
    /// - `Ok(())` - Link set
    /// - `Err(DomainError::AlreadyAssigned)` - Student already has a group
    /// - `Err(DomainError::Db)` - Database error during update
    pub async fn assign(&self, student: &Student, group: &Group) -> Result<(), DomainError> {
        if let Some(current) = student.group_id {
            return Err(DomainError::AlreadyAssigned {
                student_id: student.id,
                group_id: current,
            });
        }

        StudentRepository::new(self.conn)
            .set_group(student.id, Some(group.id))
            .await?;
        tracing::debug!(student_id = student.id, group_id = group.id, "student assigned to group");
        Ok(())
    }

    /// Clears a student's group link, checking the caller's assumption.
    ///
    /// The caller asserts which group it believes the student is in; a stale
    /// assertion (different group, or no group at all) is an invalid state
    /// transition, not a silent no-op.
    ///
    /// # Arguments
    /// - `student` - Current student state
    /// - `expected_group_id` - Group the caller asserts the student is in
    ///
    /// # Returns
    /// - `Ok(())` - Link cleared
    /// - `Err(DomainError::NotAssigned)` - Assertion does not hold
    /// - `Err(DomainError::Db)` - Database error during update
    pub async fn unassign(
        &self,
        student: &Student,
        expected_group_id: i32,
    ) -> Result<(), DomainError> {
        if student.group_id != Some(expected_group_id) {
            return Err(DomainError::NotAssigned {
                student_id: student.id,
                group_id: expected_group_id,
            });
        }

        StudentRepository::new(self.conn)
            .set_group(student.id, None)
            .await?;
        tracing::debug!(
            student_id = student.id,
            group_id = expected_group_id,
            "student unassigned from group"
        );
        Ok(())
    }

    /// Resolves a batch of student ids against a membership predicate.
    ///
    /// All-or-nothing: when any distinct requested id is missing or fails the
    /// predicate, the whole call fails with the exact ineligible ids and
    /// nothing may be applied by the caller.
    ///
    /// # Arguments
    /// - `student_ids` - Candidate student ids (duplicates allowed)
    /// - `filter` - Eligibility predicate on the current group link
    ///
    /// # Returns
    /// - `Ok(Vec<Student>)` - Every distinct requested student, all eligible
    /// - `Err(DomainError::NotFound)` - Lists each missing or ineligible id
    /// - `Err(DomainError::Db)` - Database error during query
    pub async fn resolve_members(
        &self,
        student_ids: &[i32],
        filter: MembershipFilter,
    ) -> Result<Vec<Student>, DomainError> {
        let mut requested = student_ids.to_vec();
        requested.sort_unstable();
        requested.dedup();

        let eligible = StudentRepository::new(self.conn)
            .get_filtered_by_ids(&requested, filter)
            .await?;

        if eligible.len() != requested.len() {
            let eligible_ids: Vec<i32> = eligible.iter().map(|s| s.id).collect();
            let ineligible = requested
                .into_iter()
                .filter(|id| !eligible_ids.contains(id))
                .collect();
            return Err(DomainError::NotFound {
                kind: EntityKind::Student,
                ids: ineligible,
            });
        }

        Ok(eligible)
    }

    /// Assigns a batch of students to a group.
    ///
    /// Every candidate must exist and be unassigned; otherwise the whole
    /// batch is rejected and no link changes.
    ///
    /// # Arguments
    /// - `group` - Group to assign into
    /// - `student_ids` - Candidate student ids
    ///
    /// # Returns
    /// - `Ok(Vec<Student>)` - The assigned students (pre-assignment state)
    /// - `Err(DomainError::NotFound)` - Missing or already-assigned ids
    /// - `Err(DomainError::Db)` - Database error during update
    pub async fn assign_members(
        &self,
        group: &Group,
        student_ids: &[i32],
    ) -> Result<Vec<Student>, DomainError> {
        let students = self
            .resolve_members(student_ids, MembershipFilter::Unassigned)
            .await?;

        let ids: Vec<i32> = students.iter().map(|s| s.id).collect();
        StudentRepository::new(self.conn)
            .set_group_many(&ids, Some(group.id))
            .await?;
        tracing::debug!(group_id = group.id, count = ids.len(), "students assigned to group");
        Ok(students)
    }

    /// Removes a batch of students from a group.
    ///
    /// Every candidate must exist and currently belong to the group;
    /// otherwise the whole batch is rejected and no link changes.
    ///
    /// # Arguments
    /// - `group` - Group to remove from
    /// - `student_ids` - Candidate student ids
    ///
    /// # Returns
    /// - `Ok(Vec<Student>)` - The removed students (pre-removal state)
    /// - `Err(DomainError::NotFound)` - Missing or non-member ids
    /// - `Err(DomainError::Db)` - Database error during update
    pub async fn unassign_members(
        &self,
        group: &Group,
        student_ids: &[i32],
    ) -> Result<Vec<Student>, DomainError> {
        let students = self
            .resolve_members(student_ids, MembershipFilter::InGroup(group.id))
            .await?;

        let ids: Vec<i32> = students.iter().map(|s| s.id).collect();
        StudentRepository::new(self.conn)
            .set_group_many(&ids, None)
            .await?;
        tracing::debug!(group_id = group.id, count = ids.len(), "students unassigned from group");
        Ok(students)
    }
}
