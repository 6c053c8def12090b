//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their relationships already in place.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// This function provides monotonically increasing values for use in
/// generating unique test identifiers across all factories.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a student already assigned to the given group.
///
/// Convenience wrapper over `StudentFactory` for tests exercising group
/// membership. The group must exist before calling.
///
/// # Arguments
/// - `db` - Database connection
/// - `group_id` - ID of the group to assign the student to
///
/// # Returns
/// - `Ok(Model)` - The created student with `group_id` set
/// - `Err(DbErr)` - Database error during creation
pub async fn create_student_in_group(
    db: &DatabaseConnection,
    group_id: i32,
) -> Result<entity::student::Model, DbErr> {
    crate::factory::student::StudentFactory::new(db)
        .group_id(group_id)
        .build()
        .await
}

/// Inserts a raw enrollment edge between a student and a course.
///
/// Bypasses any validation logic so tests can arrange arbitrary prior state.
/// Both endpoints must exist before calling.
///
/// # Arguments
/// - `db` - Database connection
/// - `student_id` - ID of the student endpoint
/// - `course_id` - ID of the course endpoint
///
/// # Returns
/// - `Ok(Model)` - The created junction row
/// - `Err(DbErr)` - Database error during insert (e.g. duplicate pair)
pub async fn enroll(
    db: &DatabaseConnection,
    student_id: i32,
    course_id: i32,
) -> Result<entity::student_course::Model, DbErr> {
    entity::student_course::ActiveModel {
        student_id: ActiveValue::Set(student_id),
        course_id: ActiveValue::Set(course_id),
    }
    .insert(db)
    .await
}
