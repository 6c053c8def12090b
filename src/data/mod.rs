//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! entity kind. Repositories use SeaORM entity models internally and return domain models
//! to keep database-specific structures out of the service layer. Every repository holds
//! an explicit connection handle — a pooled connection or the enclosing request's
//! transaction — passed in by the caller; no operation commits on its own.

pub mod course;
pub mod enrollment;
pub mod group;
pub mod student;

pub use course::{CourseRepository, CourseWithStudents};
pub use enrollment::EnrollmentRepository;
pub use group::{GroupRepository, GroupWithStudents};
pub use student::{StudentRepository, StudentWithRelations};


/// Result of a bulk lookup by ids.
///
/// Never partial-silent: callers must inspect `missing` before using `found`.
/// Requested ids are de-duplicated, so `found.len() + missing.len()` equals
/// the number of distinct requested ids.
#[derive(Debug, Clone)]
pub struct BulkLookup<T> {
    /// Entities that exist, in ascending id order.
    pub found: Vec<T>,
    /// Distinct requested ids with no matching row.
    pub missing: Vec<i32>,
}
