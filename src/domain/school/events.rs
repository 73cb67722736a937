//! School domain events.
//!
//! - `SchoolCreated` - New school registered
//! - `SchoolUpdated` - Name or description replaced
//! - `SchoolStatusChanged` - Lifecycle status moved

use serde::{Deserialize, Serialize};

use super::aggregate::School;
use super::status::SchoolStatus;
use crate::domain::foundation::{domain_event, EventId, SchoolId, Timestamp, UserId};

// ════════════════════════════════════════════════════════════════════════════
// SchoolCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new school is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolCreated {
    pub event_id: EventId,
    pub school_id: SchoolId,
    pub name: String,
    pub created_by: UserId,
    pub occurred_at: Timestamp,
}

impl SchoolCreated {
    pub fn from_school(school: &School) -> Self {
        Self {
            event_id: EventId::new(),
            school_id: *school.id(),
            name: school.name().to_string(),
            created_by: *school.created_by(),
            occurred_at: *school.created_at(),
        }
    }
}

domain_event!(SchoolCreated, "school.created.v1", School(school_id), at = occurred_at);

// ════════════════════════════════════════════════════════════════════════════
// SchoolUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a school's name or description is replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolUpdated {
    pub event_id: EventId,
    pub school_id: SchoolId,
    pub name: String,
    pub description: String,
    pub occurred_at: Timestamp,
}

impl SchoolUpdated {
    pub fn from_school(school: &School) -> Self {
        Self {
            event_id: EventId::new(),
            school_id: *school.id(),
            name: school.name().to_string(),
            description: school.description().to_string(),
            occurred_at: *school.updated_at(),
        }
    }
}

domain_event!(SchoolUpdated, "school.updated.v1", School(school_id), at = occurred_at);

// ════════════════════════════════════════════════════════════════════════════
// SchoolStatusChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published when a school moves between lifecycle statuses.
///
/// Only raised when the status actually changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolStatusChanged {
    pub event_id: EventId,
    pub school_id: SchoolId,
    pub previous_status: SchoolStatus,
    pub new_status: SchoolStatus,
    pub occurred_at: Timestamp,
}

domain_event!(SchoolStatusChanged, "school.status_changed.v1", School(school_id), at = occurred_at);
