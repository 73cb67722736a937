//! LearningPath aggregate.
//!
//! A path is an ordered list of activities published by a school. The path
//! owns its activities and, through them, their resources: every change to
//! that tree goes through the path so the editing guard is always applied.

use serde::{Deserialize, Serialize};

use super::activity::Activity;
use super::resource::Resource;
use super::status::PathStatus;
use crate::domain::foundation::text::{optional_text, required_text, MAX_TITLE_LEN};
use crate::domain::foundation::{
    ActivityId, DomainError, ErrorCode, PathId, ResourceId, SchoolId, StateMachine, Timestamp,
    UserId, Version,
};

/// Maximum length for a path description.
pub const MAX_PATH_DESCRIPTION_LENGTH: usize = 2000;

/// LearningPath aggregate.
///
/// # Invariants
///
/// - `title` is 1-200 characters after trimming, `description` at most 2000
/// - `school_id`, `created_by` and `created_at` never change
/// - Activities and resources change only while Draft or Review
/// - Review and Published are reached only with at least one activity
/// - `published_at` is set on the first publish and never overwritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    /// Unique identifier
    id: PathId,

    /// School that owns the path
    school_id: SchoolId,

    /// Display title
    title: String,

    /// Free text, empty when not given
    description: String,

    /// Lifecycle status
    status: PathStatus,

    /// Author of the path
    created_by: UserId,

    /// Activities in insertion order
    activities: Vec<Activity>,

    /// When the path was created
    created_at: Timestamp,

    /// Last change to the path or anything below it
    updated_at: Timestamp,

    /// First publication, kept through later archiving
    published_at: Option<Timestamp>,

    /// Stored version, for optimistic locking
    version: Version,
}

impl LearningPath {
    /// Create a new draft path with no activities.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title is blank or too long, or description is too long
    pub fn create(
        school_id: SchoolId,
        title: &str,
        description: Option<&str>,
        created_by: UserId,
    ) -> Result<Self, DomainError> {
        let title = required_text("title", title, MAX_TITLE_LEN)?;
        let description = optional_text("description", description, MAX_PATH_DESCRIPTION_LENGTH)?;

        let now = Timestamp::now();
        Ok(Self {
            id: PathId::new(),
            school_id,
            title,
            description,
            status: PathStatus::Draft,
            created_by,
            activities: Vec::new(),
            created_at: now,
            updated_at: now,
            published_at: None,
            version: Version::initial(),
        })
    }

    /// Reconstitute a path from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PathId,
        school_id: SchoolId,
        title: String,
        description: String,
        status: PathStatus,
        created_by: UserId,
        activities: Vec<Activity>,
        created_at: Timestamp,
        updated_at: Timestamp,
        published_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            school_id,
            title,
            description,
            status,
            created_by,
            activities,
            created_at,
            updated_at,
            published_at,
            version: Version::initial(),
        }
    }

    /// Sets the version read from storage.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PathId {
        &self.id
    }

    pub fn school_id(&self) -> &SchoolId {
        &self.school_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> PathStatus {
        self.status
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn activity(&self, activity_id: &ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id() == activity_id)
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn published_at(&self) -> Option<&Timestamp> {
        self.published_at.as_ref()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Advances the version after a successful repository update.
    pub fn mark_saved(&mut self) {
        self.version = self.version.next();
    }

    /// Sum of the activities' estimated minutes, computed on every call.
    pub fn total_estimated_minutes(&self) -> i64 {
        self.activities
            .iter()
            .map(|a| i64::from(a.estimated_minutes()))
            .sum()
    }

    pub fn can_accept_enrollments(&self) -> bool {
        self.status.allows_enrollments()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing (Draft or Review only)
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace title and description.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the path is published or archived
    /// - `ValidationFailed` if either field breaks its rule; nothing is written
    pub fn update_info(&mut self, title: &str, description: Option<&str>) -> Result<(), DomainError> {
        self.ensure_editable()?;
        let title = required_text("title", title, MAX_TITLE_LEN)?;
        let description = optional_text("description", description, MAX_PATH_DESCRIPTION_LENGTH)?;

        self.title = title;
        self.description = description;
        self.touch();
        Ok(())
    }

    /// Append an activity at the end of the path.
    pub fn add_activity(&mut self, activity: Activity) -> Result<(), DomainError> {
        self.ensure_editable()?;
        self.activities.push(activity);
        self.touch();
        Ok(())
    }

    /// Remove an activity by id. Returns `None` (and changes nothing) if absent.
    pub fn remove_activity(
        &mut self,
        activity_id: &ActivityId,
    ) -> Result<Option<Activity>, DomainError> {
        self.ensure_editable()?;
        let Some(index) = self.activities.iter().position(|a| a.id() == activity_id) else {
            return Ok(None);
        };
        let removed = self.activities.remove(index);
        self.touch();
        Ok(Some(removed))
    }

    /// Replace an activity's editable fields.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the path is not editable
    /// - `ActivityNotFound` if no activity has this id
    /// - `ValidationFailed` from the activity rules
    pub fn update_activity(
        &mut self,
        activity_id: &ActivityId,
        title: &str,
        description: Option<&str>,
        display_order: Option<i32>,
        estimated_minutes: Option<i32>,
    ) -> Result<(), DomainError> {
        self.ensure_editable()?;
        self.activity_mut(activity_id)?
            .update(title, description, display_order, estimated_minutes)?;
        self.touch();
        Ok(())
    }

    /// Append a resource to one of the path's activities.
    pub fn add_resource(
        &mut self,
        activity_id: &ActivityId,
        resource: Resource,
    ) -> Result<(), DomainError> {
        self.ensure_editable()?;
        self.activity_mut(activity_id)?.add_resource(resource);
        self.touch();
        Ok(())
    }

    /// Replace a resource's editable fields.
    pub fn update_resource(
        &mut self,
        activity_id: &ActivityId,
        resource_id: &ResourceId,
        title: &str,
        description: Option<&str>,
        url: &str,
        display_order: Option<i32>,
    ) -> Result<(), DomainError> {
        self.ensure_editable()?;
        let resource = self
            .activity_mut(activity_id)?
            .resource_mut(resource_id)
            .ok_or_else(|| resource_not_found(resource_id))?;
        resource.update(title, description, url, display_order)?;
        self.touch();
        Ok(())
    }

    /// Remove a resource from an activity. Returns `None` if the resource is absent.
    pub fn remove_resource(
        &mut self,
        activity_id: &ActivityId,
        resource_id: &ResourceId,
    ) -> Result<Option<Resource>, DomainError> {
        self.ensure_editable()?;
        let removed = self.activity_mut(activity_id)?.remove_resource(resource_id);
        if removed.is_some() {
            self.touch();
        }
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Draft -> Review.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless Draft with at least one activity
    pub fn submit_for_review(&mut self) -> Result<(), DomainError> {
        if self.status != PathStatus::Draft {
            return Err(DomainError::invalid_transition(
                "Can only submit draft paths for review",
            ));
        }
        self.ensure_has_activities("Cannot submit a path without activities")?;
        self.move_to(PathStatus::Review, "Can only submit draft paths for review")
    }

    /// Draft or Review -> Published. Sets `published_at` on the first publish.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless Draft/Review with at least one activity
    pub fn publish(&mut self) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&PathStatus::Published) {
            return Err(DomainError::invalid_transition(
                "Can only publish draft or review paths",
            ));
        }
        self.ensure_has_activities("Cannot publish a path without activities")?;
        self.move_to(PathStatus::Published, "Can only publish draft or review paths")?;
        if self.published_at.is_none() {
            self.published_at = Some(self.updated_at);
        }
        Ok(())
    }

    /// Any live status -> Archived.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already archived
    pub fn archive(&mut self) -> Result<(), DomainError> {
        self.move_to(PathStatus::Archived, "Path is already archived")
    }

    /// Review -> Draft.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the path is in review
    pub fn return_to_draft(&mut self) -> Result<(), DomainError> {
        self.move_to(PathStatus::Draft, "Can only return paths in review to draft")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.status.allows_editing() {
            Ok(())
        } else {
            Err(DomainError::invalid_transition(format!(
                "Cannot modify a path in {} status",
                self.status
            )))
        }
    }

    fn ensure_has_activities(&self, message: &str) -> Result<(), DomainError> {
        if self.activities.is_empty() {
            Err(DomainError::invalid_transition(message))
        } else {
            Ok(())
        }
    }

    fn move_to(&mut self, target: PathStatus, message: &str) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| DomainError::invalid_transition(message))?;
        self.touch();
        Ok(())
    }

    fn activity_mut(&mut self, activity_id: &ActivityId) -> Result<&mut Activity, DomainError> {
        self.activities
            .iter_mut()
            .find(|a| a.id() == activity_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ActivityNotFound,
                    format!("Activity not found: {}", activity_id),
                )
                .with_detail("id", activity_id.to_string())
            })
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

fn resource_not_found(resource_id: &ResourceId) -> DomainError {
    DomainError::new(
        ErrorCode::ResourceNotFound,
        format!("Resource not found: {}", resource_id),
    )
    .with_detail("id", resource_id.to_string())
}
