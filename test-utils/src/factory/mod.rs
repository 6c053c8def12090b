//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories automatically handle foreign key relationships,
//! making tests more concise and maintainable.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let group = factory::create_group(&db).await?;
//!     let student = factory::create_student(&db).await?;
//!     let course = factory::create_course(&db).await?;
//!
//!     // Create with relationships in place
//!     let member = factory::create_student_in_group(&db, group.id).await?;
//!     factory::enroll(&db, student.id, course.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! Use the factory builders for custom values:
//!
//! ```rust,ignore
//! let student = factory::student::StudentFactory::new(&db)
//!     .first_name("Ada")
//!     .last_name("Lovelace")
//!     .group_id(group.id)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `student` - Create student entities
//! - `group` - Create group entities
//! - `course` - Create course entities
//! - `helpers` - Junction-row helpers and ID generation

pub mod course;
pub mod group;
pub mod helpers;
pub mod student;

// Re-export commonly used factory functions for concise usage
pub use course::create_course;
pub use group::create_group;
pub use helpers::{create_student_in_group, enroll};
pub use student::create_student;
