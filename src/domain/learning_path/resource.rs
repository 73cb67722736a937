//! Resource entity: a learning material attached to an activity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::text::{optional_text, required_text, MAX_TITLE_LEN, MAX_URL_LEN};
use crate::domain::foundation::{DomainError, ResourceId, ValidationError};

/// Maximum length for a resource description.
pub const MAX_RESOURCE_DESCRIPTION_LENGTH: usize = 1000;

/// Kind of learning material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Url,
    Pdf,
    Video,
    Text,
    Code,
    File,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Url,
        ResourceType::Pdf,
        ResourceType::Video,
        ResourceType::Text,
        ResourceType::Code,
        ResourceType::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Url => "URL",
            ResourceType::Pdf => "PDF",
            ResourceType::Video => "VIDEO",
            ResourceType::Text => "TEXT",
            ResourceType::Code => "CODE",
            ResourceType::File => "FILE",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("type", format!("unknown resource type '{}'", s))
            })
    }
}

/// A learning material (link, document, video...) owned by one activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique within the owning activity
    id: ResourceId,

    title: String,

    /// Empty when not given
    description: String,

    /// Format of the material behind `url`
    resource_type: ResourceType,

    /// Link or inline locator, up to 2000 characters
    url: String,

    /// Caller-chosen sort key
    display_order: i32,
}

impl Resource {
    /// Create a resource with a fresh id.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a blank or overlong title, description or url
    pub fn create(
        title: &str,
        description: Option<&str>,
        resource_type: ResourceType,
        url: &str,
        display_order: Option<i32>,
    ) -> Result<Self, DomainError> {
        let title = required_text("title", title, MAX_TITLE_LEN)?;
        let description =
            optional_text("description", description, MAX_RESOURCE_DESCRIPTION_LENGTH)?;
        let url = required_text("url", url, MAX_URL_LEN)?;

        Ok(Self {
            id: ResourceId::new(),
            title,
            description,
            resource_type,
            url,
            display_order: display_order.unwrap_or(0),
        })
    }

    /// Reconstitute from persistence (no validation).
    pub fn reconstitute(
        id: ResourceId,
        title: String,
        description: String,
        resource_type: ResourceType,
        url: String,
        display_order: i32,
    ) -> Self {
        Self {
            id,
            title,
            description,
            resource_type,
            url,
            display_order,
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn display_order(&self) -> i32 {
        self.display_order
    }

    /// Replace the editable fields. The type is fixed at creation.
    pub fn update(
        &mut self,
        title: &str,
        description: Option<&str>,
        url: &str,
        display_order: Option<i32>,
    ) -> Result<(), DomainError> {
        let title = required_text("title", title, MAX_TITLE_LEN)?;
        let description =
            optional_text("description", description, MAX_RESOURCE_DESCRIPTION_LENGTH)?;
        let url = required_text("url", url, MAX_URL_LEN)?;

        self.title = title;
        self.description = description;
        self.url = url;
        self.display_order = display_order.unwrap_or(0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide() -> Resource {
        Resource::create(
            "Guide",
            None,
            ResourceType::Url,
            "https://example.com/guide",
            None,
        )
        .unwrap()
    }

    #[test]
    fn create_applies_defaults() {
        let resource = guide();
        assert_eq!(resource.description(), "");
        assert_eq!(resource.display_order(), 0);
        assert_eq!(resource.resource_type(), ResourceType::Url);
    }

    #[test]
    fn create_trims_url() {
        let resource =
            Resource::create("Doc", None, ResourceType::Pdf, "  https://x.io/a.pdf ", Some(2))
                .unwrap();
        assert_eq!(resource.url(), "https://x.io/a.pdf");
        assert_eq!(resource.display_order(), 2);
    }

    #[test]
    fn create_requires_url() {
        let err = Resource::create("Doc", None, ResourceType::Pdf, "   ", None).unwrap_err();
        assert_eq!(err.field(), Some("url"));
    }

    #[test]
    fn url_cap_is_2000_chars() {
        let ok = format!("https://{}", "a".repeat(1992));
        assert_eq!(ok.chars().count(), 2000);
        assert!(Resource::create("Doc", None, ResourceType::Url, &ok, None).is_ok());

        let too_long = format!("{}a", ok);
        assert!(Resource::create("Doc", None, ResourceType::Url, &too_long, None).is_err());
    }

    #[test]
    fn description_cap_is_1000_chars() {
        let long = "d".repeat(1001);
        let err = Resource::create("Doc", Some(&long), ResourceType::Text, "u", None).unwrap_err();
        assert_eq!(err.field(), Some("description"));
    }

    #[test]
    fn update_leaves_resource_untouched_on_failure() {
        let mut resource = guide();
        assert!(resource.update("New", None, "", Some(5)).is_err());
        assert_eq!(resource.title(), "Guide");
        assert_eq!(resource.display_order(), 0);
    }

    #[test]
    fn update_replaces_fields_and_defaults_order() {
        let mut resource = guide();
        resource
            .update(" Better ", Some(" notes "), "https://example.com/v2", None)
            .unwrap();
        assert_eq!(resource.title(), "Better");
        assert_eq!(resource.description(), "notes");
        assert_eq!(resource.url(), "https://example.com/v2");
        assert_eq!(resource.display_order(), 0);
    }

    #[test]
    fn resource_type_parses_case_insensitively() {
        assert_eq!("code".parse::<ResourceType>().unwrap(), ResourceType::Code);
        assert!("audio".parse::<ResourceType>().is_err());
    }
}
