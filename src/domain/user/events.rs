//! User domain events.

use serde::{Deserialize, Serialize};

use super::aggregate::User;
use super::roles::{SchoolRole, SystemRole};
use crate::domain::foundation::{domain_event, Email, EventId, SchoolId, Timestamp, UserId};

// ════════════════════════════════════════════════════════════════════════════
// UserRegistered
// ════════════════════════════════════════════════════════════════════════════

/// Published when a user registers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: EventId,
    pub user_id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub system_role: SystemRole,
    pub occurred_at: Timestamp,
}

impl UserRegistered {
    pub fn from_user(user: &User) -> Self {
        Self {
            event_id: EventId::new(),
            user_id: *user.id(),
            email: user.email().clone(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            system_role: user.system_role(),
            occurred_at: *user.created_at(),
        }
    }
}

domain_event!(UserRegistered, "user.registered.v1", User(user_id), at = occurred_at);

// ════════════════════════════════════════════════════════════════════════════
// UserRoleChanged
// ════════════════════════════════════════════════════════════════════════════

/// What kind of role change happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleChange {
    SystemRoleChanged {
        previous: SystemRole,
        current: SystemRole,
    },
    SchoolRoleAssigned {
        school_id: SchoolId,
        previous: Option<SchoolRole>,
        current: SchoolRole,
    },
    SchoolRoleRemoved {
        school_id: SchoolId,
        removed: SchoolRole,
    },
}

/// Published when a user's system or school role changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRoleChanged {
    pub event_id: EventId,
    pub user_id: UserId,
    pub change: RoleChange,
    pub occurred_at: Timestamp,
}

impl UserRoleChanged {
    pub fn new(user: &User, change: RoleChange) -> Self {
        Self {
            event_id: EventId::new(),
            user_id: *user.id(),
            change,
            occurred_at: *user.updated_at(),
        }
    }
}

domain_event!(UserRoleChanged, "user.role_changed.v1", User(user_id), at = occurred_at);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn role_change_payload_is_tagged() {
        let user = User::create("t@t.io", "T", "T").unwrap();
        let school_id = SchoolId::new();
        let event = UserRoleChanged::new(
            &user,
            RoleChange::SchoolRoleRemoved {
                school_id,
                removed: SchoolRole::Tutor,
            },
        );
        let envelope = event.to_envelope();

        assert_eq!(envelope.event_type, "user.role_changed.v1");
        assert_eq!(envelope.payload["change"]["kind"], "school_role_removed");
        assert_eq!(envelope.payload["change"]["removed"], "TUTOR");
    }

    #[test]
    fn registered_event_copies_profile() {
        let user = User::create("t@t.io", "Tess", "Ting").unwrap();
        let event = UserRegistered::from_user(&user);
        assert_eq!(event.email.as_str(), "t@t.io");
        assert_eq!(event.system_role, SystemRole::User);
    }
}
