//! Builder configuration.

use crate::storage::DEFAULT_STORAGE_KEY;
use serde::Deserialize;
use std::time::Duration;

/// Quiet period before an autosave, matching the editor's default.
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 2_000;

/// Host-tunable settings for a [`crate::DocumentStore`].
///
/// Missing JSON fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    /// Persistence slot key.
    pub storage_key: String,
    /// Autosave quiet period in milliseconds.
    pub autosave_delay_ms: u64,
}

impl BuilderConfig {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Parses a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BuilderConfig::from_json(r#"{"autosaveDelayMs": 250}"#).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.autosave_delay(), Duration::from_millis(250));
    }
}
