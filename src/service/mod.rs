//! Business logic layer: relationship managers and update orchestrators.
//!
//! Two stateless managers guard the association invariants:
//!
//! - `GroupMembershipService` - one group per student
//! - `CourseEnrollmentService` - duplicate-free, validated enrollment sets
//!
//! Both validate an entire batch against current state before mutating
//! anything, so a failed call never applies part of a batch.
//!
//! One orchestrator per entity kind (`StudentService`, `GroupService`,
//! `CourseService`) translates request payloads into store and manager calls.
//! Every mutating orchestrator operation runs in a single transaction:
//! scalar fields first, then the group link, then the course set, with the
//! whole call rolled back on any error.

pub mod course;
pub mod enrollment;
pub mod group;
pub mod membership;
pub mod student;

pub use course::CourseService;
pub use enrollment::CourseEnrollmentService;
pub use group::GroupService;
pub use membership::GroupMembershipService;
pub use student::StudentService;
