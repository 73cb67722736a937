//! PathStatus enum and its decision table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Publication status of a learning path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathStatus {
    #[default]
    Draft,
    Review,
    Published,
    Archived,
}

/// Structure and info may change only before publication.
pub fn allows_editing(status: PathStatus) -> bool {
    matches!(status, PathStatus::Draft | PathStatus::Review)
}

pub fn allows_enrollments(status: PathStatus) -> bool {
    matches!(status, PathStatus::Published)
}

impl PathStatus {
    pub const ALL: [PathStatus; 4] = [
        PathStatus::Draft,
        PathStatus::Review,
        PathStatus::Published,
        PathStatus::Archived,
    ];

    pub fn allows_editing(&self) -> bool {
        allows_editing(*self)
    }

    pub fn allows_enrollments(&self) -> bool {
        allows_enrollments(*self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PathStatus::Draft => "DRAFT",
            PathStatus::Review => "REVIEW",
            PathStatus::Published => "PUBLISHED",
            PathStatus::Archived => "ARCHIVED",
        }
    }
}

impl StateMachine for PathStatus {
    fn valid_transitions(&self) -> &'static [Self] {
        use PathStatus::*;
        match self {
            Draft => &[Review, Published, Archived],
            Review => &[Draft, Published, Archived],
            Published => &[Archived],
            Archived => &[],
        }
    }
}

impl fmt::Display for PathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown path status '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_draft() {
        assert_eq!(PathStatus::default(), PathStatus::Draft);
    }

    #[test]
    fn editing_allowed_only_before_publication() {
        assert!(allows_editing(PathStatus::Draft));
        assert!(allows_editing(PathStatus::Review));
        assert!(!allows_editing(PathStatus::Published));
        assert!(!allows_editing(PathStatus::Archived));
    }

    #[test]
    fn only_published_allows_enrollments() {
        for status in PathStatus::ALL {
            assert_eq!(status.allows_enrollments(), status == PathStatus::Published);
        }
    }

    #[test]
    fn published_cannot_return_to_review_or_draft() {
        assert!(!PathStatus::Published.can_transition_to(&PathStatus::Draft));
        assert!(!PathStatus::Published.can_transition_to(&PathStatus::Review));
    }

    #[test]
    fn every_live_status_can_be_archived() {
        for from in PathStatus::ALL {
            let expected = from != PathStatus::Archived;
            assert_eq!(from.can_transition_to(&PathStatus::Archived), expected, "{}", from);
        }
    }

    #[test]
    fn archived_is_terminal() {
        assert!(PathStatus::Archived.is_terminal());
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!("review".parse::<PathStatus>().unwrap(), PathStatus::Review);
        assert!("live".parse::<PathStatus>().is_err());
    }
}
