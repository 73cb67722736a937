//! SchoolStatus enum and its decision table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchoolStatus {
    #[default]
    Draft,
    Active,
    Suspended,
    Archived,
}

/// Only active schools take enrollments.
pub fn allows_enrollments(status: SchoolStatus) -> bool {
    matches!(status, SchoolStatus::Active)
}

/// Content may be authored while the school is being set up or running.
pub fn allows_content_creation(status: SchoolStatus) -> bool {
    matches!(status, SchoolStatus::Draft | SchoolStatus::Active)
}

pub fn is_operational(status: SchoolStatus) -> bool {
    matches!(status, SchoolStatus::Active)
}

impl SchoolStatus {
    pub const ALL: [SchoolStatus; 4] = [
        SchoolStatus::Draft,
        SchoolStatus::Active,
        SchoolStatus::Suspended,
        SchoolStatus::Archived,
    ];

    pub fn allows_enrollments(&self) -> bool {
        allows_enrollments(*self)
    }

    pub fn allows_content_creation(&self) -> bool {
        allows_content_creation(*self)
    }

    pub fn is_operational(&self) -> bool {
        is_operational(*self)
    }

    /// Stable storage/wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolStatus::Draft => "DRAFT",
            SchoolStatus::Active => "ACTIVE",
            SchoolStatus::Suspended => "SUSPENDED",
            SchoolStatus::Archived => "ARCHIVED",
        }
    }
}

impl StateMachine for SchoolStatus {
    /// Re-activating an active school is allowed and changes nothing.
    fn valid_transitions(&self) -> &'static [Self] {
        use SchoolStatus::*;
        match self {
            Draft => &[Active, Archived],
            Active => &[Active, Suspended, Archived],
            Suspended => &[Active, Archived],
            Archived => &[],
        }
    }
}

impl fmt::Display for SchoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchoolStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchoolStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown school status '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_draft() {
        assert_eq!(SchoolStatus::default(), SchoolStatus::Draft);
    }

    #[test]
    fn only_active_allows_enrollments() {
        for status in SchoolStatus::ALL {
            assert_eq!(allows_enrollments(status), status == SchoolStatus::Active);
        }
    }

    #[test]
    fn draft_and_active_allow_content_creation() {
        assert!(SchoolStatus::Draft.allows_content_creation());
        assert!(SchoolStatus::Active.allows_content_creation());
        assert!(!SchoolStatus::Suspended.allows_content_creation());
        assert!(!SchoolStatus::Archived.allows_content_creation());
    }

    #[test]
    fn only_active_is_operational() {
        assert!(is_operational(SchoolStatus::Active));
        assert!(!is_operational(SchoolStatus::Suspended));
    }

    #[test]
    fn archived_is_terminal() {
        assert!(SchoolStatus::Archived.is_terminal());
        assert!(!SchoolStatus::Suspended.is_terminal());
    }

    #[test]
    fn only_active_can_be_suspended() {
        assert!(SchoolStatus::Active.can_transition_to(&SchoolStatus::Suspended));
        assert!(!SchoolStatus::Draft.can_transition_to(&SchoolStatus::Suspended));
        assert!(!SchoolStatus::Suspended.can_transition_to(&SchoolStatus::Suspended));
    }

    #[test]
    fn every_live_status_can_be_archived() {
        for from in SchoolStatus::ALL {
            let expected = from != SchoolStatus::Archived;
            assert_eq!(from.can_transition_to(&SchoolStatus::Archived), expected, "{}", from);
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("suspended".parse::<SchoolStatus>().unwrap(), SchoolStatus::Suspended);
        assert_eq!("ACTIVE".parse::<SchoolStatus>().unwrap(), SchoolStatus::Active);
        assert!("closed".parse::<SchoolStatus>().is_err());
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&SchoolStatus::Suspended).unwrap();
        assert_eq!(json, "\"SUSPENDED\"");
    }
}
