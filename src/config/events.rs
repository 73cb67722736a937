//! `events.*` keys.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Log every published envelope at `info`.
    pub log_published: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { log_published: true }
    }
}
