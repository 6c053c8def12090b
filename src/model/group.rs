//! Domain models and DTOs for group data operations.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::student::StudentSummary;

/// Group domain model.
///
/// The student set is not stored here; it is always derived from
/// `students.group_id` so the two sides cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Unique identifier for the group.
    pub id: i32,
    /// Unique short code, e.g. `"TT-31"`.
    pub name: String,
}

impl Group {
    /// Converts an entity model to a group domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Group` - The converted group domain model
    pub fn from_entity(entity: entity::group::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

/// Group view without associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub id: i32,
    pub name: String,
}

impl From<Group> for GroupSummary {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
        }
    }
}

/// Group view with the membership-derived student list loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDetail {
    pub id: i32,
    pub name: String,
    /// Students whose `group_id` points at this group.
    pub students: Vec<StudentSummary>,
}

/// Request payload for group create/patch/put operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupRequest {
    pub name: Option<String>,
    pub student_ids: Option<Vec<i32>>,
}

impl GroupRequest {
    /// Checks that every field a full replacement needs is present.
    ///
    /// # Returns
    /// - `Ok(())` - Request is complete for a put
    /// - `Err(DomainError::Validation)` - Names the first missing field
    pub fn require_complete(&self) -> Result<(), DomainError> {
        for (field, missing) in [
            ("name", self.name.is_none()),
            ("student_ids", self.student_ids.is_none()),
        ] {
            if missing {
                return Err(DomainError::Validation(format!(
                    "{field} must be provided on full replacement"
                )));
            }
        }
        Ok(())
    }
}
