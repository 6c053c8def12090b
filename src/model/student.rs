//! Domain models and DTOs for student data operations.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::course::CourseSummary;
use crate::model::group::GroupSummary;

/// Student domain model.
///
/// Carries the owned side of the student-group relation: `group_id` is `None`
/// while the student is unassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Unique identifier for the student.
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// ID of the group the student belongs to, if any.
    pub group_id: Option<i32>,
}

impl Student {
    /// Converts an entity model to a student domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Student` - The converted student domain model
    pub fn from_entity(entity: entity::student::Model) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            group_id: entity.group_id,
        }
    }
}

/// Student view without associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<Student> for StudentSummary {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
        }
    }
}

/// Student view with the group link and course set loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentDetail {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// The student's group, `None` while unassigned.
    pub group: Option<GroupSummary>,
    /// Courses the student is enrolled in, ordered by course id.
    pub courses: Vec<CourseSummary>,
}

/// Request payload for student create/patch/put operations.
///
/// All fields are optional: on patch, absent fields are untouched; on create
/// and put the services check the required fields up front. Unknown fields in
/// the source JSON are ignored during deserialization (lenient merge).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub group_id: Option<i32>,
    pub course_ids: Option<Vec<i32>>,
}

impl StudentRequest {
    /// Extracts the scalar fields for a partial update.
    pub fn scalar_update(&self) -> StudentScalarUpdate {
        StudentScalarUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    /// Checks that every field a full replacement needs is present.
    ///
    /// The group link is exempt: it is a single nullable association, so on
    /// put `None` means "no group" rather than "not provided".
    ///
    /// # Returns
    /// - `Ok(())` - Request is complete for a put
    /// - `Err(DomainError::Validation)` - Names the first missing field
    pub fn require_complete(&self) -> Result<(), DomainError> {
        for (field, missing) in [
            ("first_name", self.first_name.is_none()),
            ("last_name", self.last_name.is_none()),
            ("course_ids", self.course_ids.is_none()),
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

/// Scalar fields of a student update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct StudentScalarUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Eligibility predicate for bulk membership resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipFilter {
    /// Only students that currently belong to no group.
    Unassigned,
    /// Only students that currently belong to the given group.
    InGroup(i32),
}
