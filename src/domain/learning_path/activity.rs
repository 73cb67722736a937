//! Activity entity: one learning unit inside a path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::resource::Resource;
use crate::domain::foundation::text::{optional_text, required_text, MAX_TITLE_LEN};
use crate::domain::foundation::{ActivityId, DomainError, ResourceId, ValidationError};

/// Maximum length for an activity description.
pub const MAX_ACTIVITY_DESCRIPTION_LENGTH: usize = 2000;

/// Minutes assumed when no positive estimate is given.
pub const DEFAULT_ESTIMATED_MINUTES: i32 = 30;

/// Kind of learning activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Video,
    Reading,
    Quiz,
    Exercise,
    Project,
    Lecture,
    Discussion,
}

impl ActivityType {
    pub const ALL: [ActivityType; 7] = [
        ActivityType::Video,
        ActivityType::Reading,
        ActivityType::Quiz,
        ActivityType::Exercise,
        ActivityType::Project,
        ActivityType::Lecture,
        ActivityType::Discussion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Video => "VIDEO",
            ActivityType::Reading => "READING",
            ActivityType::Quiz => "QUIZ",
            ActivityType::Exercise => "EXERCISE",
            ActivityType::Project => "PROJECT",
            ActivityType::Lecture => "LECTURE",
            ActivityType::Discussion => "DISCUSSION",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("type", format!("unknown activity type '{}'", s))
            })
    }
}

/// Absent or non-positive estimates fall back to the default.
pub fn normalize_estimated_minutes(minutes: Option<i32>) -> i32 {
    match minutes {
        Some(m) if m > 0 => m,
        _ => DEFAULT_ESTIMATED_MINUTES,
    }
}

/// A learning unit owned by a path, owning its resources in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique within the owning path
    id: ActivityId,

    title: String,

    /// Empty when not given
    description: String,

    /// Kind of work the learner does
    activity_type: ActivityType,

    /// Caller-chosen sort key; storage order is insertion order
    display_order: i32,

    /// Always positive
    estimated_minutes: i32,

    /// Attached materials in insertion order
    resources: Vec<Resource>,
}

impl Activity {
    /// Create an activity with a fresh id and no resources.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a blank or overlong title, or overlong description
    pub fn create(
        title: &str,
        description: Option<&str>,
        activity_type: ActivityType,
        display_order: Option<i32>,
        estimated_minutes: Option<i32>,
    ) -> Result<Self, DomainError> {
        let title = required_text("title", title, MAX_TITLE_LEN)?;
        let description =
            optional_text("description", description, MAX_ACTIVITY_DESCRIPTION_LENGTH)?;

        Ok(Self {
            id: ActivityId::new(),
            title,
            description,
            activity_type,
            display_order: display_order.unwrap_or(0),
            estimated_minutes: normalize_estimated_minutes(estimated_minutes),
            resources: Vec::new(),
        })
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ActivityId,
        title: String,
        description: String,
        activity_type: ActivityType,
        display_order: i32,
        estimated_minutes: i32,
        resources: Vec<Resource>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            activity_type,
            display_order,
            estimated_minutes,
            resources,
        }
    }

    pub fn id(&self) -> &ActivityId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn display_order(&self) -> i32 {
        self.display_order
    }

    pub fn estimated_minutes(&self) -> i32 {
        self.estimated_minutes
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Replace the editable fields, normalizing order and minutes.
    pub fn update(
        &mut self,
        title: &str,
        description: Option<&str>,
        display_order: Option<i32>,
        estimated_minutes: Option<i32>,
    ) -> Result<(), DomainError> {
        let title = required_text("title", title, MAX_TITLE_LEN)?;
        let description =
            optional_text("description", description, MAX_ACTIVITY_DESCRIPTION_LENGTH)?;

        self.title = title;
        self.description = description;
        self.display_order = display_order.unwrap_or(0);
        self.estimated_minutes = normalize_estimated_minutes(estimated_minutes);
        Ok(())
    }

    /// Append a resource at the end.
    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Remove the resource with this id, if present.
    pub fn remove_resource(&mut self, resource_id: &ResourceId) -> Option<Resource> {
        let index = self.resources.iter().position(|r| r.id() == resource_id)?;
        Some(self.resources.remove(index))
    }

    pub(crate) fn resource_mut(&mut self, resource_id: &ResourceId) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|r| r.id() == resource_id)
    }
}
