//! Learning path domain events.
//!
//! - `PathCreated` - New draft path created for a school
//! - `PathUpdated` - Info, activities or resources changed
//! - `PathStatusChanged` - Lifecycle status moved
//! - `PathPublished` - Path became available to learners

use serde::{Deserialize, Serialize};

use super::aggregate::LearningPath;
use super::status::PathStatus;
use crate::domain::foundation::{domain_event, EventId, PathId, SchoolId, Timestamp, UserId};

// ════════════════════════════════════════════════════════════════════════════
// PathCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a learning path is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathCreated {
    pub event_id: EventId,
    pub path_id: PathId,
    pub school_id: SchoolId,
    pub title: String,
    pub created_by: UserId,
    pub occurred_at: Timestamp,
}

impl PathCreated {
    pub fn from_path(path: &LearningPath) -> Self {
        Self {
            event_id: EventId::new(),
            path_id: *path.id(),
            school_id: *path.school_id(),
            title: path.title().to_string(),
            created_by: *path.created_by(),
            occurred_at: *path.created_at(),
        }
    }
}

domain_event!(PathCreated, "learning_path.created.v1", LearningPath(path_id), at = occurred_at);

// ════════════════════════════════════════════════════════════════════════════
// PathUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published after any edit to a path's info or structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathUpdated {
    pub event_id: EventId,
    pub path_id: PathId,
    pub school_id: SchoolId,
    pub title: String,
    pub activity_count: usize,
    pub total_estimated_minutes: i64,
    pub occurred_at: Timestamp,
}

impl PathUpdated {
    pub fn from_path(path: &LearningPath) -> Self {
        Self {
            event_id: EventId::new(),
            path_id: *path.id(),
            school_id: *path.school_id(),
            title: path.title().to_string(),
            activity_count: path.activities().len(),
            total_estimated_minutes: path.total_estimated_minutes(),
            occurred_at: *path.updated_at(),
        }
    }
}

domain_event!(PathUpdated, "learning_path.updated.v1", LearningPath(path_id), at = occurred_at);

// ════════════════════════════════════════════════════════════════════════════
// PathStatusChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published on every successful lifecycle transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathStatusChanged {
    pub event_id: EventId,
    pub path_id: PathId,
    pub school_id: SchoolId,
    pub previous_status: PathStatus,
    pub new_status: PathStatus,
    pub occurred_at: Timestamp,
}

domain_event!(PathStatusChanged, "learning_path.status_changed.v1", LearningPath(path_id), at = occurred_at);

// ════════════════════════════════════════════════════════════════════════════
// PathPublished
// ════════════════════════════════════════════════════════════════════════════

/// Published when a path reaches Published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathPublished {
    pub event_id: EventId,
    pub path_id: PathId,
    pub school_id: SchoolId,
    pub title: String,
    pub total_estimated_minutes: i64,
    pub published_at: Timestamp,
}

impl PathPublished {
    /// Builds the event from a path that has just been published.
    pub fn from_path(path: &LearningPath) -> Self {
        Self {
            event_id: EventId::new(),
            path_id: *path.id(),
            school_id: *path.school_id(),
            title: path.title().to_string(),
            total_estimated_minutes: path.total_estimated_minutes(),
            published_at: path.published_at().copied().unwrap_or(*path.updated_at()),
        }
    }
}

domain_event!(PathPublished, "learning_path.published.v1", LearningPath(path_id), at = published_at);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;
    use crate::domain::learning_path::{Activity, ActivityType};

    #[test]
    fn published_event_carries_total_minutes() {
        let mut path =
            LearningPath::create(SchoolId::new(), "Intro", None, UserId::new()).unwrap();
        path.add_activity(
            Activity::create("Watch", None, ActivityType::Video, None, Some(12)).unwrap(),
        )
        .unwrap();
        path.publish().unwrap();

        let envelope = PathPublished::from_path(&path).to_envelope();

        assert_eq!(envelope.event_type, "learning_path.published.v1");
        assert_eq!(envelope.aggregate_id, path.id().to_string());
        assert_eq!(envelope.payload["total_estimated_minutes"], 12);
        assert_eq!(&envelope.occurred_at, path.published_at().unwrap());
    }

    #[test]
    fn created_event_uses_creation_time() {
        let path = LearningPath::create(SchoolId::new(), "Intro", None, UserId::new()).unwrap();
        let event = PathCreated::from_path(&path);
        assert_eq!(&event.occurred_at, path.created_at());
        assert_eq!(event.school_id, *path.school_id());
    }
}
