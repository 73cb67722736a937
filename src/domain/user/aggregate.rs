//! User aggregate.
//!
//! Users hold one platform role and at most one role per school.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::roles::{SchoolRole, SystemRole};
use crate::domain::foundation::text::{required_text, MAX_PERSON_NAME_LEN};
use crate::domain::foundation::{DomainError, Email, SchoolId, Timestamp, UserId, Version};

/// User aggregate.
///
/// # Invariants
///
/// - `email` is normalized (trimmed, lower-cased) and well formed
/// - first and last names are 1-100 characters after trimming
/// - a school maps to at most one `SchoolRole`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    id: UserId,

    /// Login address, unique across users
    email: Email,

    first_name: String,
    last_name: String,

    /// Platform-wide role
    system_role: SystemRole,

    /// Role held in each school the user belongs to
    school_roles: HashMap<SchoolId, SchoolRole>,

    /// Inactive users are hidden from the active listing
    active: bool,

    created_at: Timestamp,
    updated_at: Timestamp,

    /// Stored version, for optimistic locking
    version: Version,
}

impl User {
    /// Register a new active user with the default system role.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a malformed email or blank/overlong names
    pub fn create(email: &str, first_name: &str, last_name: &str) -> Result<Self, DomainError> {
        let email = Email::parse(email)?;
        let first_name = required_text("first_name", first_name, MAX_PERSON_NAME_LEN)?;
        let last_name = required_text("last_name", last_name, MAX_PERSON_NAME_LEN)?;

        let now = Timestamp::now();
        Ok(Self {
            id: UserId::new(),
            email,
            first_name,
            last_name,
            system_role: SystemRole::default(),
            school_roles: HashMap::new(),
            active: true,
            created_at: now,
            updated_at: now,
            version: Version::initial(),
        })
    }

    /// Reconstitute a user from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        email: Email,
        first_name: String,
        last_name: String,
        system_role: SystemRole,
        school_roles: HashMap<SchoolId, SchoolRole>,
        active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            first_name,
            last_name,
            system_role,
            school_roles,
            active,
            created_at,
            updated_at,
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

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn system_role(&self) -> SystemRole {
        self.system_role
    }

    pub fn school_roles(&self) -> &HashMap<SchoolId, SchoolRole> {
        &self.school_roles
    }

    pub fn school_role(&self, school_id: &SchoolId) -> Option<SchoolRole> {
        self.school_roles.get(school_id).copied()
    }

    pub fn has_role_in_school(&self, school_id: &SchoolId) -> bool {
        self.school_roles.contains_key(school_id)
    }

    pub fn is_student_in_school(&self, school_id: &SchoolId) -> bool {
        self.school_role(school_id)
            .map(|role| role.is_student())
            .unwrap_or(false)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Advances the version after a successful repository update.
    pub fn mark_saved(&mut self) {
        self.version = self.version.next();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the platform role, returning the previous one.
    pub fn assign_system_role(&mut self, role: SystemRole) -> SystemRole {
        let previous = std::mem::replace(&mut self.system_role, role);
        self.touch();
        previous
    }

    /// Insert or replace the role held in a school, returning the previous one.
    pub fn assign_school_role(&mut self, school_id: SchoolId, role: SchoolRole) -> Option<SchoolRole> {
        let previous = self.school_roles.insert(school_id, role);
        self.touch();
        previous
    }

    /// Drop the role held in a school. Only touches the user when a role was removed.
    pub fn remove_school_role(&mut self, school_id: &SchoolId) -> Option<SchoolRole> {
        let removed = self.school_roles.remove(school_id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn update_email(&mut self, email: &str) -> Result<(), DomainError> {
        self.email = Email::parse(email)?;
        self.touch();
        Ok(())
    }

    pub fn update_name(&mut self, first_name: &str, last_name: &str) -> Result<(), DomainError> {
        let first_name = required_text("first_name", first_name, MAX_PERSON_NAME_LEN)?;
        let last_name = required_text("last_name", last_name, MAX_PERSON_NAME_LEN)?;

        self.first_name = first_name;
        self.last_name = last_name;
        self.touch();
        Ok(())
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
