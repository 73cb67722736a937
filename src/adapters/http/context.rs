//! Request context extractor.
//!
//! Turns the `x-user-id` and `x-request-id` headers into `CommandMetadata`.
//! A malformed `x-user-id` is ignored rather than rejected.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;

use super::error::bad_request;
use crate::domain::foundation::{CommandMetadata, UserId};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub actor: Option<UserId>,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn metadata(&self) -> CommandMetadata {
        let mut metadata = CommandMetadata::new().with_source("http");
        if let Some(actor) = self.actor {
            metadata = metadata.with_actor(actor);
        }
        if let Some(request_id) = &self.request_id {
            metadata = metadata.with_correlation_id(request_id.clone());
        }
        metadata
    }

    /// The explicit user if given, otherwise the header actor.
    pub fn resolve_user(&self, explicit: Option<&str>, field: &str) -> Result<UserId, Response> {
        match explicit {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| bad_request(format!("Invalid {}: '{}'", field, raw))),
            None => self.actor.ok_or_else(|| {
                bad_request(format!(
                    "'{}' is required (or send the {} header)",
                    field, USER_ID_HEADER
                ))
            }),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Ok(Self {
            actor: header(USER_ID_HEADER).and_then(|raw| raw.parse().ok()),
            request_id: header(REQUEST_ID_HEADER),
        })
    }
}
