//! Course repository for database operations.
//!
//! This module provides the `CourseRepository` for managing course records and
//! loading their enrolled student sets through the junction table.

use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::data::BulkLookup;
use crate::model::course::{Course, CourseScalarUpdate};
use crate::model::student::Student;

/// A course together with its enrolled student list.
pub type CourseWithStudents = (Course, Vec<Student>);

/// Repository providing database operations for course records.
pub struct CourseRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CourseRepository<'a, C> {
    /// Creates a new CourseRepository instance.
    ///
    /// # Arguments
    /// - `conn` - Connection or transaction handle for executing queries
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Finds a course by id.
    ///
    /// # Arguments
    /// - `course_id` - ID of the course to look up
    ///
    /// # Returns
    /// - `Ok(Some(Course))` - Course found
    /// - `Ok(None)` - No course with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_id(&self, course_id: i32) -> Result<Option<Course>, DbErr> {
        let entity = entity::prelude::Course::find_by_id(course_id)
            .one(self.conn)
            .await?;

        Ok(entity.map(Course::from_entity))
    }

    /// Finds courses by a set of ids, reporting which ids have no row.
    ///
    /// Requested ids are de-duplicated before the query. The result is never
    /// partial-silent: every distinct requested id appears either in `found`
    /// or in `missing`.
    ///
    /// # Arguments
    /// - `course_ids` - IDs to look up (duplicates allowed)
    ///
    /// # Returns
    /// - `Ok(BulkLookup<Course>)` - Found courses plus the missing id set
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_ids(&self, course_ids: &[i32]) -> Result<BulkLookup<Course>, DbErr> {
        let mut requested = course_ids.to_vec();
        requested.sort_unstable();
        requested.dedup();

        let entities = entity::prelude::Course::find()
            .filter(entity::course::Column::Id.is_in(requested.clone()))
            .order_by_asc(entity::course::Column::Id)
            .all(self.conn)
            .await?;

        let found_ids: HashSet<i32> = entities.iter().map(|e| e.id).collect();
        let missing = requested
            .into_iter()
            .filter(|id| !found_ids.contains(id))
            .collect();

        Ok(BulkLookup {
            found: entities.into_iter().map(Course::from_entity).collect(),
            missing,
        })
    }

    /// Finds a course by its unique name.
    ///
    /// # Arguments
    /// - `name` - Course name to match exactly
    ///
    /// # Returns
    /// - `Ok(Some(Course))` - Course found
    /// - `Ok(None)` - No course with that name
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Course>, DbErr> {
        let entity = entity::prelude::Course::find()
            .filter(entity::course::Column::Name.eq(name))
            .one(self.conn)
            .await?;

        Ok(entity.map(Course::from_entity))
    }

    /// Lists all courses without loading students.
    ///
    /// # Returns
    /// - `Ok(Vec<Course>)` - All courses in ascending id order
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all(&self) -> Result<Vec<Course>, DbErr> {
        let entities = entity::prelude::Course::find()
            .order_by_asc(entity::course::Column::Id)
            .all(self.conn)
            .await?;

        Ok(entities.into_iter().map(Course::from_entity).collect())
    }

    /// Finds a course by id with its enrolled student list loaded.
    ///
    /// # Arguments
    /// - `course_id` - ID of the course to look up
    ///
    /// # Returns
    /// - `Ok(Some((course, students)))` - Course with students in ascending id order
    /// - `Ok(None)` - No course with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_with_students(
        &self,
        course_id: i32,
    ) -> Result<Option<CourseWithStudents>, DbErr> {
        let rows = entity::prelude::Course::find_by_id(course_id)
            .find_with_related(entity::prelude::Student)
            .all(self.conn)
            .await?;

        Ok(rows.into_iter().next().map(|(course, mut students)| {
            students.sort_by_key(|s| s.id);
            (
                Course::from_entity(course),
                students.into_iter().map(Student::from_entity).collect(),
            )
        }))
    }

    /// Lists all courses with their enrolled student lists loaded.
    ///
    /// # Returns
    /// - `Ok(Vec<CourseWithStudents>)` - All courses in ascending id order
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all_with_students(&self) -> Result<Vec<CourseWithStudents>, DbErr> {
        let rows = entity::prelude::Course::find()
            .find_with_related(entity::prelude::Student)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(course, mut students)| {
                students.sort_by_key(|s| s.id);
                (
                    Course::from_entity(course),
                    students.into_iter().map(Student::from_entity).collect(),
                )
            })
            .collect())
    }

    /// Inserts a new course.
    ///
    /// # Arguments
    /// - `name` - Unique course name
    /// - `description` - Course description
    ///
    /// # Returns
    /// - `Ok(Course)` - The persisted course with its assigned id
    /// - `Err(DbErr)` - Database error during insert (e.g. duplicate name)
    pub async fn insert(&self, name: &str, description: &str) -> Result<Course, DbErr> {
        let entity = entity::course::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(description.to_string()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        Ok(Course::from_entity(entity))
    }

    /// Applies the supplied scalar fields to a course.
    ///
    /// Only `Some` fields are written. A no-op update (all fields `None`)
    /// skips the query entirely.
    ///
    /// # Arguments
    /// - `course` - Current course state
    /// - `update` - Scalar fields to apply
    ///
    /// # Returns
    /// - `Ok(Course)` - The course after the merge
    /// - `Err(DbErr)` - Database error during update
    pub async fn apply_scalars(
        &self,
        course: &Course,
        update: &CourseScalarUpdate,
    ) -> Result<Course, DbErr> {
        let mut active = entity::course::ActiveModel {
            id: ActiveValue::Unchanged(course.id),
            ..Default::default()
        };

        if let Some(name) = &update.name {
            active.name = ActiveValue::Set(name.clone());
        }
        if let Some(description) = &update.description {
            active.description = ActiveValue::Set(description.clone());
        }

        if !active.is_changed() {
            return Ok(course.clone());
        }

        let entity = active.update(self.conn).await?;
        Ok(Course::from_entity(entity))
    }

    /// Deletes a course and its enrollment edges.
    ///
    /// Edges go first so removal never depends on driver-level foreign key
    /// enforcement.
    ///
    /// # Arguments
    /// - `course_id` - ID of the course to delete
    ///
    /// # Returns
    /// - `Ok(())` - Course and edges removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, course_id: i32) -> Result<(), DbErr> {
        entity::prelude::StudentCourse::delete_many()
            .filter(entity::student_course::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;

        entity::prelude::Course::delete_by_id(course_id)
            .exec(self.conn)
            .await?;
        Ok(())
    }
}
