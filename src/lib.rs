//! Relationship-consistency core for a university CRUD backend.
//!
//! This crate manages three entity kinds — students, groups, courses — and the
//! invariants governing their associations: a student belongs to at most one
//! group, and a student's course set never contains duplicates. The HTTP
//! surface, schema validation, and connection pooling live in the embedding
//! application; this crate exposes entity-shaped request/response types and
//! per-entity services it can call.
//!
//! # Architecture
//!
//! The crate follows a layered architecture with clear separation of concerns:
//!
//! - **Service Layer** (`service/`) - Relationship managers and the per-entity
//!   update orchestrators (create/patch/put/delete), each mutating call
//!   enclosed in a single transaction
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model
//!   conversion
//! - **Model Layer** (`model/`) - Domain models, request DTOs, and response
//!   view structs
//! - **Error Layer** (`error`) - Domain error taxonomy surfaced to the caller
//!
//! Supporting modules provide infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based configuration
//! - **Database** (`db`) - Connection setup and migration application
//!
//! # Request Flow
//!
//! A typical mutating call flows through these layers:
//!
//! 1. The caller builds a request DTO and invokes a service operation
//! 2. The **service** validates scalar fields, opens a transaction, and
//!    dispatches association changes to the relationship managers
//! 3. The **managers** validate the full batch against current state, then
//!    mutate through the data layer
//! 4. The **data layer** executes queries on the explicit transaction handle
//! 5. The service commits on success or rolls back the whole call on any
//!    error, then returns a response view

pub mod config;
pub mod data;
pub mod db;
pub mod error;
pub mod model;
pub mod service;
