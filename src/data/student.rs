//! Student repository for database operations.
//!
//! This module provides the `StudentRepository` for managing student records and the
//! student side of the group link. It handles lookups with and without association
//! loading, scalar-field updates, group foreign-key changes, and deletion with
//! explicit removal of the student's enrollment edges.

use std::collections::{HashMap, HashSet};

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::data::BulkLookup;
use crate::model::course::Course;
use crate::model::group::Group;
use crate::model::student::{MembershipFilter, Student, StudentScalarUpdate};

/// A student together with its loaded associations.
pub type StudentWithRelations = (Student, Option<Group>, Vec<Course>);

/// Repository providing database operations for student records.
///
/// Generic over the connection handle so the same methods run on a pooled
/// connection or inside the caller's transaction.
pub struct StudentRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    /// Creates a new StudentRepository instance.
    ///
    /// # Arguments
    /// - `conn` - Connection or transaction handle for executing queries
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Finds a student by id.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student to look up
    ///
    /// # Returns
    /// - `Ok(Some(Student))` - Student found
    /// - `Ok(None)` - No student with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_id(&self, student_id: i32) -> Result<Option<Student>, DbErr> {
        let entity = entity::prelude::Student::find_by_id(student_id)
            .one(self.conn)
            .await?;

        Ok(entity.map(Student::from_entity))
    }

    /// Finds students by a set of ids, reporting which ids have no row.
    ///
    /// Requested ids are de-duplicated before the query. The result is never
    /// partial-silent: every distinct requested id appears either in `found`
    /// or in `missing`.
    ///
    /// # Arguments
    /// - `student_ids` - IDs to look up (duplicates allowed)
    ///
    /// # Returns
    /// - `Ok(BulkLookup<Student>)` - Found students plus the missing id set
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_ids(&self, student_ids: &[i32]) -> Result<BulkLookup<Student>, DbErr> {
        let mut requested = student_ids.to_vec();
        requested.sort_unstable();
        requested.dedup();

        let entities = entity::prelude::Student::find()
            .filter(entity::student::Column::Id.is_in(requested.clone()))
            .order_by_asc(entity::student::Column::Id)
            .all(self.conn)
            .await?;

        let found_ids: HashSet<i32> = entities.iter().map(|e| e.id).collect();
        let missing = requested
            .into_iter()
            .filter(|id| !found_ids.contains(id))
            .collect();

        Ok(BulkLookup {
            found: entities.into_iter().map(Student::from_entity).collect(),
            missing,
        })
    }

    /// Finds a student by first and last name.
    ///
    /// Names are not unique in the schema; when several students share the
    /// pair, the one with the lowest id is returned.
    ///
    /// # Arguments
    /// - `first_name` - First name to match exactly
    /// - `last_name` - Last name to match exactly
    ///
    /// # Returns
    /// - `Ok(Some(Student))` - A matching student
    /// - `Ok(None)` - No student with that name pair
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Student>, DbErr> {
        let entity = entity::prelude::Student::find()
            .filter(entity::student::Column::FirstName.eq(first_name))
            .filter(entity::student::Column::LastName.eq(last_name))
            .order_by_asc(entity::student::Column::Id)
            .one(self.conn)
            .await?;

        Ok(entity.map(Student::from_entity))
    }

    /// Finds a student by id with its group and course set loaded.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student to look up
    ///
    /// # Returns
    /// - `Ok(Some((student, group, courses)))` - Student with associations,
    ///   courses in ascending id order
    /// - `Ok(None)` - No student with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_with_relations(
        &self,
        student_id: i32,
    ) -> Result<Option<StudentWithRelations>, DbErr> {
        let rows = entity::prelude::Student::find_by_id(student_id)
            .find_with_related(entity::prelude::Course)
            .all(self.conn)
            .await?;

        let Some((student, mut courses)) = rows.into_iter().next() else {
            return Ok(None);
        };
        courses.sort_by_key(|c| c.id);

        let group = match student.group_id {
            Some(group_id) => entity::prelude::Group::find_by_id(group_id)
                .one(self.conn)
                .await?
                .map(Group::from_entity),
            None => None,
        };

        Ok(Some((
            Student::from_entity(student),
            group,
            courses.into_iter().map(Course::from_entity).collect(),
        )))
    }

    /// Lists all students with their groups and course sets loaded.
    ///
    /// # Returns
    /// - `Ok(Vec<StudentWithRelations>)` - All students in ascending id order
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all_with_relations(&self) -> Result<Vec<StudentWithRelations>, DbErr> {
        let rows = entity::prelude::Student::find()
            .find_with_related(entity::prelude::Course)
            .all(self.conn)
            .await?;

        let group_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(student, _)| student.group_id)
            .collect();
        let groups: HashMap<i32, Group> = entity::prelude::Group::find()
            .filter(entity::group::Column::Id.is_in(group_ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|g| (g.id, Group::from_entity(g)))
            .collect();

        Ok(rows
            .into_iter()
            .map(|(student, mut courses)| {
                courses.sort_by_key(|c| c.id);
                let group = student.group_id.and_then(|id| groups.get(&id).cloned());
                (
                    Student::from_entity(student),
                    group,
                    courses.into_iter().map(Course::from_entity).collect(),
                )
            })
            .collect())
    }

    /// Finds students among `student_ids` that satisfy a membership predicate.
    ///
    /// Used by the bulk membership path: the caller compares the result size
    /// against the distinct requested count to enforce all-or-nothing
    /// semantics.
    ///
    /// # Arguments
    /// - `student_ids` - Candidate student ids (duplicates allowed)
    /// - `filter` - Eligibility predicate on the current group link
    ///
    /// # Returns
    /// - `Ok(Vec<Student>)` - Matching students in ascending id order
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_filtered_by_ids(
        &self,
        student_ids: &[i32],
        filter: MembershipFilter,
    ) -> Result<Vec<Student>, DbErr> {
        let mut requested = student_ids.to_vec();
        requested.sort_unstable();
        requested.dedup();

        let mut query = entity::prelude::Student::find()
            .filter(entity::student::Column::Id.is_in(requested))
            .order_by_asc(entity::student::Column::Id);

        query = match filter {
            MembershipFilter::Unassigned => {
                query.filter(entity::student::Column::GroupId.is_null())
            }
            MembershipFilter::InGroup(group_id) => {
                query.filter(entity::student::Column::GroupId.eq(group_id))
            }
        };

        let entities = query.all(self.conn).await?;
        Ok(entities.into_iter().map(Student::from_entity).collect())
    }

    /// Lists the students belonging to a group.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group
    ///
    /// # Returns
    /// - `Ok(Vec<Student>)` - Members in ascending id order
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_group(&self, group_id: i32) -> Result<Vec<Student>, DbErr> {
        let entities = entity::prelude::Student::find()
            .filter(entity::student::Column::GroupId.eq(group_id))
            .order_by_asc(entity::student::Column::Id)
            .all(self.conn)
            .await?;

        Ok(entities.into_iter().map(Student::from_entity).collect())
    }

    /// Counts the students belonging to a group.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of assigned students
    /// - `Err(DbErr)` - Database error during count query
    pub async fn count_in_group(&self, group_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Student::find()
            .filter(entity::student::Column::GroupId.eq(group_id))
            .count(self.conn)
            .await
    }

    /// Inserts a new student.
    ///
    /// # Arguments
    /// - `first_name` - First name
    /// - `last_name` - Last name
    /// - `group_id` - Initial group link, `None` for unassigned
    ///
    /// # Returns
    /// - `Ok(Student)` - The persisted student with its assigned id
    /// - `Err(DbErr)` - Database error during insert
    pub async fn insert(
        &self,
        first_name: &str,
        last_name: &str,
        group_id: Option<i32>,
    ) -> Result<Student, DbErr> {
        let entity = entity::student::ActiveModel {
            first_name: ActiveValue::Set(first_name.to_string()),
            last_name: ActiveValue::Set(last_name.to_string()),
            group_id: ActiveValue::Set(group_id),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        Ok(Student::from_entity(entity))
    }

    /// Applies the supplied scalar fields to a student.
    ///
    /// Only `Some` fields are written; the group link is never touched here.
    /// A no-op update (all fields `None`) skips the query entirely.
    ///
    /// # Arguments
    /// - `student` - Current student state
    /// - `update` - Scalar fields to apply
    ///
    /// # Returns
    /// - `Ok(Student)` - The student after the merge
    /// - `Err(DbErr)` - Database error during update
    pub async fn apply_scalars(
        &self,
        student: &Student,
        update: &StudentScalarUpdate,
    ) -> Result<Student, DbErr> {
        let mut active = entity::student::ActiveModel {
            id: ActiveValue::Unchanged(student.id),
            ..Default::default()
        };

        if let Some(first_name) = &update.first_name {
            active.first_name = ActiveValue::Set(first_name.clone());
        }
        if let Some(last_name) = &update.last_name {
            active.last_name = ActiveValue::Set(last_name.clone());
        }

        if !active.is_changed() {
            return Ok(student.clone());
        }

        let entity = active.update(self.conn).await?;
        Ok(Student::from_entity(entity))
    }

    /// Sets or clears the group link of a single student.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student
    /// - `group_id` - New group link, `None` to clear
    ///
    /// # Returns
    /// - `Ok(())` - Link updated (or no matching student)
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_group(&self, student_id: i32, group_id: Option<i32>) -> Result<(), DbErr> {
        entity::prelude::Student::update_many()
            .filter(entity::student::Column::Id.eq(student_id))
            .col_expr(entity::student::Column::GroupId, Expr::value(group_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Sets or clears the group link of multiple students at once.
    ///
    /// # Arguments
    /// - `student_ids` - IDs of the students to update
    /// - `group_id` - New group link, `None` to clear
    ///
    /// # Returns
    /// - `Ok(())` - Links updated (returns early if the slice is empty)
    /// - `Err(DbErr)` - Database error during batch update
    pub async fn set_group_many(
        &self,
        student_ids: &[i32],
        group_id: Option<i32>,
    ) -> Result<(), DbErr> {
        if student_ids.is_empty() {
            return Ok(());
        }

        entity::prelude::Student::update_many()
            .filter(entity::student::Column::Id.is_in(student_ids.to_vec()))
            .col_expr(entity::student::Column::GroupId, Expr::value(group_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Clears the group link of every student in a group.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group to empty
    ///
    /// # Returns
    /// - `Ok(())` - All member links cleared
    /// - `Err(DbErr)` - Database error during update
    pub async fn clear_group_members(&self, group_id: i32) -> Result<(), DbErr> {
        entity::prelude::Student::update_many()
            .filter(entity::student::Column::GroupId.eq(group_id))
            .col_expr(
                entity::student::Column::GroupId,
                Expr::value(None::<i32>),
            )
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Deletes a student and its enrollment edges.
    ///
    /// Edges go first so removal never depends on driver-level foreign key
    /// enforcement; the group link disappears with the row itself.
    ///
    /// # Arguments
    /// - `student_id` - ID of the student to delete
    ///
    /// # Returns
    /// - `Ok(())` - Student and edges removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, student_id: i32) -> Result<(), DbErr> {
        entity::prelude::StudentCourse::delete_many()
            .filter(entity::student_course::Column::StudentId.eq(student_id))
            .exec(self.conn)
            .await?;

        entity::prelude::Student::delete_by_id(student_id)
            .exec(self.conn)
            .await?;
        Ok(())
    }
}
