//! HTTP DTOs for school endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::school::School;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a school. `created_by` falls back to the caller's `x-user-id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchoolRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSchoolRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Target status as its wire name, e.g. `"SUSPENDED"`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeSchoolStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSchoolsParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchoolByNameParams {
    pub name: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct SchoolResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub created_by: String,
    pub accepts_enrollments: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&School> for SchoolResponse {
    fn from(school: &School) -> Self {
        Self {
            id: school.id().to_string(),
            name: school.name().to_string(),
            description: school.description().to_string(),
            status: school.status().as_str().to_string(),
            created_by: school.created_by().to_string(),
            accepts_enrollments: school.can_accept_enrollments(),
            created_at: *school.created_at(),
            updated_at: *school.updated_at(),
        }
    }
}
