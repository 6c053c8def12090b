//! Domain models and DTOs for course data operations.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::student::StudentSummary;

/// Course domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Unique identifier for the course.
    pub id: i32,
    /// Unique course name.
    pub name: String,
    pub description: String,
}

impl Course {
    /// Converts an entity model to a course domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Course` - The converted course domain model
    pub fn from_entity(entity: entity::course::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
        }
    }
}

/// Course view without associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<Course> for CourseSummary {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            description: course.description,
        }
    }
}

/// Course view with the enrolled student list loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Students enrolled in this course, ordered by student id.
    pub students: Vec<StudentSummary>,
}

/// Request payload for course create/patch/put operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub student_ids: Option<Vec<i32>>,
}

impl CourseRequest {
    /// Extracts the scalar fields for a partial update.
    pub fn scalar_update(&self) -> CourseScalarUpdate {
        CourseScalarUpdate {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    /// Checks that every field a full replacement needs is present.
    ///
    /// # Returns
    /// - `Ok(())` - Request is complete for a put
    /// - `Err(DomainError::Validation)` - Names the first missing field
    pub fn require_complete(&self) -> Result<(), DomainError> {
        for (field, missing) in [
            ("name", self.name.is_none()),
            ("description", self.description.is_none()),
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

/// Scalar fields of a course update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CourseScalarUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
