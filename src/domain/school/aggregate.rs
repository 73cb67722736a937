//! School aggregate.
//!
//! A school is the tenant boundary for learning content. Its status gates
//! whether paths may be authored and whether learners may enroll.

use serde::{Deserialize, Serialize};

use super::status::SchoolStatus;
use crate::domain::foundation::text::{optional_text, required_text, MAX_TITLE_LEN};
use crate::domain::foundation::{
    DomainError, SchoolId, StateMachine, Timestamp, UserId, Version,
};

/// Maximum length for a school description.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// School aggregate.
///
/// # Invariants
///
/// - `name` is 1-200 characters after trimming
/// - `description` is at most 1000 characters after trimming
/// - `id`, `created_by` and `created_at` never change
/// - Archived schools never leave the Archived status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// Unique identifier
    id: SchoolId,

    /// Display name, unique across schools
    name: String,

    /// Free text, empty when not given
    description: String,

    /// Lifecycle status
    status: SchoolStatus,

    /// User who registered the school
    created_by: UserId,

    /// When the school was registered
    created_at: Timestamp,

    /// Last change to any field
    updated_at: Timestamp,

    /// Stored version, for optimistic locking
    version: Version,
}

impl School {
    /// Create a new draft school.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if name is blank or too long, or description is too long
    pub fn create(
        name: &str,
        description: Option<&str>,
        created_by: UserId,
    ) -> Result<Self, DomainError> {
        let name = required_text("name", name, MAX_TITLE_LEN)?;
        let description = optional_text("description", description, MAX_DESCRIPTION_LENGTH)?;

        let now = Timestamp::now();
        Ok(Self {
            id: SchoolId::new(),
            name,
            description,
            status: SchoolStatus::Draft,
            created_by,
            created_at: now,
            updated_at: now,
            version: Version::initial(),
        })
    }

    /// Reconstitute a school from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SchoolId,
        name: String,
        description: String,
        status: SchoolStatus,
        created_by: UserId,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            description,
            status,
            created_by,
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

    pub fn id(&self) -> &SchoolId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> SchoolStatus {
        self.status
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
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

    /// True while the school is active.
    pub fn can_accept_enrollments(&self) -> bool {
        self.status.allows_enrollments()
    }

    /// True while the school is in draft or active.
    pub fn can_create_content(&self) -> bool {
        self.status.allows_content_creation()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace name and description. Allowed in every status.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if either field breaks its rule; nothing is written
    pub fn update_info(&mut self, name: &str, description: Option<&str>) -> Result<(), DomainError> {
        let name = required_text("name", name, MAX_TITLE_LEN)?;
        let description = optional_text("description", description, MAX_DESCRIPTION_LENGTH)?;

        self.name = name;
        self.description = description;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Move to Active from any status except Archived.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the school is archived
    pub fn activate(&mut self) -> Result<(), DomainError> {
        self.move_to(SchoolStatus::Active, "Cannot activate an archived school")
    }

    /// Move from Active to Suspended.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the school is active
    pub fn suspend(&mut self) -> Result<(), DomainError> {
        self.move_to(SchoolStatus::Suspended, "Can only suspend active schools")
    }

    /// Move from Suspended back to Active.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the school is suspended
    pub fn resume(&mut self) -> Result<(), DomainError> {
        if self.status != SchoolStatus::Suspended {
            return Err(DomainError::invalid_transition(
                "Can only resume suspended schools",
            ));
        }
        self.move_to(SchoolStatus::Active, "Can only resume suspended schools")
    }

    /// Move to Archived. Archived is terminal.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the school is already archived
    pub fn archive(&mut self) -> Result<(), DomainError> {
        self.move_to(SchoolStatus::Archived, "School is already archived")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn move_to(&mut self, target: SchoolStatus, message: &str) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| DomainError::invalid_transition(message))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn test_school() -> School {
        School::create("Test School", None, UserId::new()).unwrap()
    }

    fn school_in(status: SchoolStatus) -> School {
        let now = Timestamp::now();
        School::reconstitute(
            SchoolId::new(),
            "Reconstituted".to_string(),
            String::new(),
            status,
            UserId::new(),
            now,
            now,
        )
    }

    #[test]
    fn create_starts_in_draft_with_trimmed_fields() {
        let school = School::create("  Acme  ", Some("  Teaching things  "), UserId::new()).unwrap();

        assert_eq!(school.name(), "Acme");
        assert_eq!(school.description(), "Teaching things");
        assert_eq!(school.status(), SchoolStatus::Draft);
        assert_eq!(school.created_at(), school.updated_at());
    }

    #[test]
    fn create_defaults_missing_description_to_empty() {
        assert_eq!(test_school().description(), "");
    }

    #[test]
    fn create_rejects_blank_name() {
        let err = School::create("   ", None, UserId::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn create_rejects_long_name_and_description() {
        assert!(School::create(&"n".repeat(201), None, UserId::new()).is_err());
        assert!(School::create("ok", Some(&"d".repeat(1001)), UserId::new()).is_err());
        assert!(School::create(&"n".repeat(200), Some(&"d".repeat(1000)), UserId::new()).is_ok());
    }

    #[test]
    fn reconstitute_keeps_values_verbatim() {
        let id = SchoolId::new();
        let by = UserId::new();
        let now = Timestamp::now();
        let school = School::reconstitute(
            id,
            "  untrimmed  ".to_string(),
            "d".to_string(),
            SchoolStatus::Suspended,
            by,
            now,
            now,
        );

        assert_eq!(school.id(), &id);
        assert_eq!(school.name(), "  untrimmed  ");
        assert_eq!(school.status(), SchoolStatus::Suspended);
        assert_eq!(school.created_by(), &by);
    }

    #[test]
    fn activate_from_draft_active_and_suspended() {
        for status in [SchoolStatus::Draft, SchoolStatus::Active, SchoolStatus::Suspended] {
            let mut school = school_in(status);
            school.activate().unwrap();
            assert_eq!(school.status(), SchoolStatus::Active);
        }
    }

    #[test]
    fn activate_fails_when_archived() {
        let mut school = school_in(SchoolStatus::Archived);
        let err = school.activate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(school.status(), SchoolStatus::Archived);
    }

    #[test]
    fn suspend_requires_active() {
        let mut school = test_school();
        assert!(school.suspend().is_err());
        assert_eq!(school.status(), SchoolStatus::Draft);

        school.activate().unwrap();
        school.suspend().unwrap();
        assert_eq!(school.status(), SchoolStatus::Suspended);
    }

    #[test]
    fn resume_requires_suspended() {
        let mut school = school_in(SchoolStatus::Active);
        let err = school.resume().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);

        let mut school = school_in(SchoolStatus::Suspended);
        school.resume().unwrap();
        assert_eq!(school.status(), SchoolStatus::Active);
    }

    #[test]
    fn archive_works_from_every_live_status() {
        for status in [SchoolStatus::Draft, SchoolStatus::Active, SchoolStatus::Suspended] {
            let mut school = school_in(status);
            school.archive().unwrap();
            assert_eq!(school.status(), SchoolStatus::Archived);
        }
    }

    #[test]
    fn archive_twice_fails() {
        let mut school = test_school();
        school.archive().unwrap();

        let err = school.archive().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(err.message.contains("already archived"));
        assert_eq!(school.status(), SchoolStatus::Archived);
    }

    #[test]
    fn transitions_bump_updated_at() {
        let mut school = school_in(SchoolStatus::Draft);
        let before = *school.updated_at();
        std::thread::sleep(std::time::Duration::from_millis(2));
        school.activate().unwrap();
        assert!(school.updated_at().is_after(&before));
        assert_eq!(school.created_at(), &before);
    }

    #[test]
    fn update_info_validates_before_writing() {
        let mut school = test_school();
        let err = school.update_info("New name", Some(&"x".repeat(1001))).unwrap_err();

        assert_eq!(err.field(), Some("description"));
        assert_eq!(school.name(), "Test School");
    }

    #[test]
    fn update_info_is_allowed_when_archived() {
        let mut school = school_in(SchoolStatus::Archived);
        school.update_info(" Renamed ", None).unwrap();
        assert_eq!(school.name(), "Renamed");
        assert_eq!(school.description(), "");
    }

    #[test]
    fn capability_predicates_follow_status() {
        let mut school = test_school();
        assert!(school.can_create_content());
        assert!(!school.can_accept_enrollments());

        school.activate().unwrap();
        assert!(school.can_accept_enrollments());

        school.suspend().unwrap();
        assert!(!school.can_create_content());
        assert!(!school.can_accept_enrollments());
    }
}
