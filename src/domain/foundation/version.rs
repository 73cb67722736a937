//! Optimistic concurrency version carried by every aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Number of successful writes an aggregate has seen, starting at 1.
///
/// Repositories only accept an update whose version matches the stored
/// one, then store the next version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u32);

impl Version {
    pub fn initial() -> Self {
        Self(1)
    }

    pub fn from_u32(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::invalid_format("version", "must be at least 1"));
        }
        Ok(Self(value))
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_and_counts_up() {
        let v = Version::initial();
        assert_eq!(v.as_u32(), 1);
        assert_eq!(v.next().next().as_u32(), 3);
    }

    #[test]
    fn zero_is_rejected() {
        assert!(Version::from_u32(0).is_err());
        assert_eq!(Version::from_u32(7).unwrap().as_u32(), 7);
    }
}
