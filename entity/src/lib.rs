//! SeaORM entity definitions for the university schema.
//!
//! Three base tables (`students`, `groups`, `courses`) plus the
//! `student_course` junction table. Relations carry the schema's foreign key
//! actions so tables generated from these entities in tests match the
//! migrations.

pub mod course;
pub mod group;
pub mod prelude;
pub mod student;
pub mod student_course;
