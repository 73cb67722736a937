//! HTTP DTOs for learning path endpoints.
//!
//! Paths are always returned with their full activity and resource tree.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::learning_path::{Activity, LearningPath, Resource};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePathRequest {
    pub school_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePathRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// `activity_type` uses the wire names (`VIDEO`, `READING`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct AddActivityRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub activity_type: String,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub estimated_minutes: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateActivityRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub estimated_minutes: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddResourceRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub resource_type: String,
    pub url: String,
    #[serde(default)]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResourceRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsBySchoolParams {
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub status: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ResourceResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub resource_type: String,
    pub url: String,
    pub display_order: i32,
}

impl From<&Resource> for ResourceResponse {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id().to_string(),
            title: resource.title().to_string(),
            description: resource.description().to_string(),
            resource_type: resource.resource_type().as_str().to_string(),
            url: resource.url().to_string(),
            display_order: resource.display_order(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub activity_type: String,
    pub display_order: i32,
    pub estimated_minutes: i32,
    pub resources: Vec<ResourceResponse>,
}

impl From<&Activity> for ActivityResponse {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id().to_string(),
            title: activity.title().to_string(),
            description: activity.description().to_string(),
            activity_type: activity.activity_type().as_str().to_string(),
            display_order: activity.display_order(),
            estimated_minutes: activity.estimated_minutes(),
            resources: activity.resources().iter().map(ResourceResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningPathResponse {
    pub id: String,
    pub school_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_by: String,
    pub total_estimated_minutes: i64,
    pub activities: Vec<ActivityResponse>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<Timestamp>,
}

impl From<&LearningPath> for LearningPathResponse {
    fn from(path: &LearningPath) -> Self {
        Self {
            id: path.id().to_string(),
            school_id: path.school_id().to_string(),
            title: path.title().to_string(),
            description: path.description().to_string(),
            status: path.status().as_str().to_string(),
            created_by: path.created_by().to_string(),
            total_estimated_minutes: path.total_estimated_minutes(),
            activities: path.activities().iter().map(ActivityResponse::from).collect(),
            created_at: *path.created_at(),
            updated_at: *path.updated_at(),
            published_at: path.published_at().copied(),
        }
    }
}
