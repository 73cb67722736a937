//! Platform-wide and per-school roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Role a user holds across the whole platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemRole {
    Admin,
    PlatformManager,
    #[default]
    User,
}

impl SystemRole {
    pub const ALL: [SystemRole; 3] = [
        SystemRole::Admin,
        SystemRole::PlatformManager,
        SystemRole::User,
    ];

    pub fn is_admin(&self) -> bool {
        matches!(self, SystemRole::Admin)
    }

    /// Admins and platform managers run the platform.
    pub fn can_manage_platform(&self) -> bool {
        matches!(self, SystemRole::Admin | SystemRole::PlatformManager)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemRole::Admin => "ADMIN",
            SystemRole::PlatformManager => "PLATFORM_MANAGER",
            SystemRole::User => "USER",
        }
    }
}

impl fmt::Display for SystemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SystemRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("system_role", format!("unknown role '{}'", s))
            })
    }
}

/// Role a user holds inside one school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchoolRole {
    SchoolAdmin,
    Manager,
    Tutor,
    Student,
}

impl SchoolRole {
    pub const ALL: [SchoolRole; 4] = [
        SchoolRole::SchoolAdmin,
        SchoolRole::Manager,
        SchoolRole::Tutor,
        SchoolRole::Student,
    ];

    pub fn is_school_admin(&self) -> bool {
        matches!(self, SchoolRole::SchoolAdmin)
    }

    pub fn can_manage_content(&self) -> bool {
        matches!(
            self,
            SchoolRole::SchoolAdmin | SchoolRole::Manager | SchoolRole::Tutor
        )
    }

    pub fn can_create_paths(&self) -> bool {
        matches!(self, SchoolRole::SchoolAdmin | SchoolRole::Tutor)
    }

    pub fn can_manage_enrollments(&self) -> bool {
        matches!(self, SchoolRole::SchoolAdmin | SchoolRole::Manager)
    }

    pub fn is_student(&self) -> bool {
        matches!(self, SchoolRole::Student)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolRole::SchoolAdmin => "SCHOOL_ADMIN",
            SchoolRole::Manager => "MANAGER",
            SchoolRole::Tutor => "TUTOR",
            SchoolRole::Student => "STUDENT",
        }
    }
}

impl fmt::Display for SchoolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchoolRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchoolRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("school_role", format!("unknown role '{}'", s))
            })
    }
}
