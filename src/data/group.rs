//! Group repository for database operations.
//!
//! This module provides the `GroupRepository` for managing group records. The
//! membership side lives on the student rows, so member loading here is always
//! derived from `students.group_id` rather than stored on the group.

use sea_orm::sea_query::ExprTrait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::model::group::Group;
use crate::model::student::Student;

/// A group together with its membership-derived student list.
pub type GroupWithStudents = (Group, Vec<Student>);

/// Repository providing database operations for group records.
pub struct GroupRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> GroupRepository<'a, C> {
    /// Creates a new GroupRepository instance.
    ///
    /// # Arguments
    /// - `conn` - Connection or transaction handle for executing queries
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Finds a group by id.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group to look up
    ///
    /// # Returns
    /// - `Ok(Some(Group))` - Group found
    /// - `Ok(None)` - No group with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_id(&self, group_id: i32) -> Result<Option<Group>, DbErr> {
        let entity = entity::prelude::Group::find_by_id(group_id)
            .one(self.conn)
            .await?;

        Ok(entity.map(Group::from_entity))
    }

    /// Finds a group by its unique name.
    ///
    /// # Arguments
    /// - `name` - Group name to match exactly
    ///
    /// # Returns
    /// - `Ok(Some(Group))` - Group found
    /// - `Ok(None)` - No group with that name
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Group>, DbErr> {
        let entity = entity::prelude::Group::find()
            .filter(entity::group::Column::Name.eq(name))
            .one(self.conn)
            .await?;

        Ok(entity.map(Group::from_entity))
    }

    /// Lists all groups without loading members.
    ///
    /// # Returns
    /// - `Ok(Vec<Group>)` - All groups in ascending id order
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all(&self) -> Result<Vec<Group>, DbErr> {
        let entities = entity::prelude::Group::find()
            .order_by_asc(entity::group::Column::Id)
            .all(self.conn)
            .await?;

        Ok(entities.into_iter().map(Group::from_entity).collect())
    }

    /// Finds a group by id with its student list loaded.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group to look up
    ///
    /// # Returns
    /// - `Ok(Some((group, students)))` - Group with members in ascending id order
    /// - `Ok(None)` - No group with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_with_students(
        &self,
        group_id: i32,
    ) -> Result<Option<GroupWithStudents>, DbErr> {
        let rows = entity::prelude::Group::find_by_id(group_id)
            .find_with_related(entity::prelude::Student)
            .all(self.conn)
            .await?;

        Ok(rows.into_iter().next().map(|(group, mut students)| {
            students.sort_by_key(|s| s.id);
            (
                Group::from_entity(group),
                students.into_iter().map(Student::from_entity).collect(),
            )
        }))
    }

    /// Lists all groups with their student lists loaded.
    ///
    /// # Returns
    /// - `Ok(Vec<GroupWithStudents>)` - All groups in ascending id order
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all_with_students(&self) -> Result<Vec<GroupWithStudents>, DbErr> {
        let rows = entity::prelude::Group::find()
            .find_with_related(entity::prelude::Student)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(group, mut students)| {
                students.sort_by_key(|s| s.id);
                (
                    Group::from_entity(group),
                    students.into_iter().map(Student::from_entity).collect(),
                )
            })
            .collect())
    }

    /// Lists groups holding between one and `max_students` members, with
    /// their student lists loaded.
    ///
    /// The bound is evaluated in the database: an inner join onto the student
    /// rows grouped per group id, so empty groups never qualify.
    ///
    /// # Arguments
    /// - `max_students` - Inclusive upper bound on the member count
    ///
    /// # Returns
    /// - `Ok(Vec<GroupWithStudents>)` - Matching groups in ascending id order
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_max_students(
        &self,
        max_students: u64,
    ) -> Result<Vec<GroupWithStudents>, DbErr> {
        let ids: Vec<i32> = entity::prelude::Group::find()
            .select_only()
            .column(entity::group::Column::Id)
            .inner_join(entity::prelude::Student)
            .group_by(entity::group::Column::Id)
            .having(entity::student::Column::Id.count().lte(max_students))
            .into_tuple()
            .all(self.conn)
            .await?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = entity::prelude::Group::find()
            .filter(entity::group::Column::Id.is_in(ids))
            .order_by_asc(entity::group::Column::Id)
            .find_with_related(entity::prelude::Student)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(group, mut students)| {
                students.sort_by_key(|s| s.id);
                (
                    Group::from_entity(group),
                    students.into_iter().map(Student::from_entity).collect(),
                )
            })
            .collect())
    }

    /// Inserts a new group.
    ///
    /// # Arguments
    /// - `name` - Unique group name
    ///
    /// # Returns
    /// - `Ok(Group)` - The persisted group with its assigned id
    /// - `Err(DbErr)` - Database error during insert (e.g. duplicate name)
    pub async fn insert(&self, name: &str) -> Result<Group, DbErr> {
        let entity = entity::group::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        Ok(Group::from_entity(entity))
    }

    /// Renames a group when a new name is supplied.
    ///
    /// # Arguments
    /// - `group` - Current group state
    /// - `name` - New name, `None` to leave unchanged
    ///
    /// # Returns
    /// - `Ok(Group)` - The group after the merge
    /// - `Err(DbErr)` - Database error during update
    pub async fn apply_scalars(&self, group: &Group, name: Option<&str>) -> Result<Group, DbErr> {
        let Some(name) = name else {
            return Ok(group.clone());
        };

        let entity = entity::group::ActiveModel {
            id: ActiveValue::Unchanged(group.id),
            name: ActiveValue::Set(name.to_string()),
        }
        .update(self.conn)
        .await?;

        Ok(Group::from_entity(entity))
    }

    /// Deletes a group row.
    ///
    /// The caller is responsible for the membership policy; the schema
    /// restricts deletion while students still reference the group.
    ///
    /// # Arguments
    /// - `group_id` - ID of the group to delete
    ///
    /// # Returns
    /// - `Ok(())` - Group removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, group_id: i32) -> Result<(), DbErr> {
        entity::prelude::Group::delete_by_id(group_id)
            .exec(self.conn)
            .await?;
        Ok(())
    }
}
