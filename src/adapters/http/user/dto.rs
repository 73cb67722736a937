//! HTTP DTOs for user endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::user::User;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignSystemRoleRequest {
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignSchoolRoleRequest {
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserByEmailParams {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UsersBySchoolParams {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub system_role: String,
    /// School id to role name; ordered so responses are stable.
    pub school_roles: BTreeMap<String, String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().as_str().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            full_name: user.full_name(),
            system_role: user.system_role().as_str().to_string(),
            school_roles: user
                .school_roles()
                .iter()
                .map(|(school_id, role)| (school_id.to_string(), role.as_str().to_string()))
                .collect(),
            active: user.is_active(),
            created_at: *user.created_at(),
            updated_at: *user.updated_at(),
        }
    }
}
