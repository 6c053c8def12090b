//! Domain models, request DTOs, and response views.
//!
//! Each entity kind has three shapes: a domain model converted from the SeaORM
//! entity at the repository boundary (`from_entity`), a serde request DTO with
//! all-optional fields (partial-update semantics: absent means "no change"),
//! and explicit response view structs — a summary without associations and a
//! detail with them — chosen by the caller instead of runtime field-exclusion
//! sets.

pub mod action;
pub mod course;
pub mod group;
pub mod student;

pub use action::AssociationAction;
