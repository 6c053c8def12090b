//! Domain error types for the relationship-consistency core.
//!
//! This module provides the error taxonomy surfaced to the calling boundary.
//! Every multi-step operation is all-or-nothing: the services raise these
//! errors and the enclosing transaction rolls back, so no error here ever
//! describes a partially applied change. Each variant names the exact
//! identifiers that caused the failure so the caller can correct and resubmit.

use std::fmt;

use thiserror::Error;

/// The three persisted entity kinds, used to qualify lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Group,
    Course,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Group => write!(f, "group"),
            Self::Course => write!(f, "course"),
        }
    }
}

/// Taxonomy class of a domain error.
///
/// The HTTP collaborator maps classes to status codes (404, 409, etc.)
/// without matching on every concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Referenced entity id(s) do not exist.
    NotFound,
    /// An append/assign/enroll would violate an association invariant.
    Conflict,
    /// A remove/unassign/unenroll targets a relation that does not hold.
    InvalidState,
    /// Malformed or incomplete request payload.
    Validation,
    /// Infrastructure failure (database driver).
    Internal,
}

/// Top-level domain error type.
///
/// Raised by the relationship managers and orchestrators and propagated
/// unhandled to the calling boundary. Variants carry the offending ids rather
/// than pre-rendered messages so callers can react programmatically.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Database operation error from SeaORM.
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),

    /// Referenced entity id(s) do not exist.
    ///
    /// Raised by single lookups and by bulk lookups with a non-empty missing
    /// set. `ids` always lists every missing or ineligible identifier.
    #[error("{kind} not found: {ids:?}")]
    NotFound { kind: EntityKind, ids: Vec<i32> },

    /// The student already belongs to a group.
    ///
    /// `group_id` names the current conflicting group, which may differ from
    /// the group the caller tried to assign. Re-assignment requires an
    /// explicit unassign first.
    #[error("student {student_id} already belongs to group {group_id}")]
    AlreadyAssigned { student_id: i32, group_id: i32 },

    /// The student is already enrolled in the course.
    #[error("student {student_id} is already enrolled in course {course_id}")]
    AlreadyEnrolled { student_id: i32, course_id: i32 },

    /// An unassign asserted a group link that does not currently hold.
    ///
    /// `group_id` is the group the caller asserted, not the student's actual
    /// group (if any).
    #[error("student {student_id} is not assigned to group {group_id}")]
    NotAssigned { student_id: i32, group_id: i32 },

    /// An unenroll targeted a course the student does not have.
    #[error("student {student_id} is not enrolled in course {course_id}")]
    NotEnrolled { student_id: i32, course_id: i32 },

    /// Group deletion refused while students remain assigned.
    ///
    /// Mirrors the schema's `ON DELETE RESTRICT` policy on
    /// `students.group_id` as a named domain error.
    #[error("group {group_id} still has {student_count} assigned students")]
    GroupNotEmpty { group_id: i32, student_count: u64 },

    /// Malformed or incomplete request payload.
    ///
    /// Raised before any state is touched, e.g. a missing required field on
    /// create or a missing field on full-replace.
    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    /// Returns the taxonomy class of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Db(_) => ErrorClass::Internal,
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::AlreadyAssigned { .. }
            | Self::AlreadyEnrolled { .. }
            | Self::GroupNotEmpty { .. } => ErrorClass::Conflict,
            Self::NotAssigned { .. } | Self::NotEnrolled { .. } => ErrorClass::InvalidState,
            Self::Validation(_) => ErrorClass::Validation,
        }
    }
}

/// Configuration error during startup or environment variable loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
}
