//! Application settings. Binaries load an [`AppConfig`] once at startup (see
//! [`platform::load_config`](super::platform::load_config)), fall back to the defaults when it
//! is missing or invalid, and hand it to the component tree through a Dioxus context.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::ConfigError;

/// Slot name used by earlier builds of the tool; keep it so existing data keeps loading.
pub const DEFAULT_STORAGE_KEY: &str = "teacher_observations";

pub const DEFAULT_ACK_DURATION_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationType {
    /// Stored label and CSS modifier (`observation-type positive`).
    pub value: String,
    /// Text shown in the type picker.
    pub label: String,
}

impl ObservationType {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage_key: String,
    /// How long the "Saved" acknowledgment stays on the submit button.
    pub ack_duration_ms: u64,
    pub observation_types: Vec<ObservationType>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            ack_duration_ms: DEFAULT_ACK_DURATION_MS,
            observation_types: vec![
                ObservationType::new("positive", "Positive"),
                ObservationType::new("concern", "Concern"),
                ObservationType::new("academic", "Academic"),
                ObservationType::new("behavior", "Behavior"),
                ObservationType::new("note", "Note"),
            ],
        }
    }
}

impl AppConfig {
    /// Type values double as CSS class names on the entry badges, so they are restricted to
    /// a token-safe alphabet.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if self.observation_types.is_empty() {
            return Err(ConfigError::NoObservationTypes);
        }

        let mut seen = Vec::with_capacity(self.observation_types.len());
        for kind in &self.observation_types {
            if !is_safe_type_value(&kind.value) {
                return Err(ConfigError::UnsafeTypeValue(kind.value.clone()));
            }
            if seen.contains(&kind.value.as_str()) {
                return Err(ConfigError::DuplicateType(kind.value.clone()));
            }
            seen.push(kind.value.as_str());
        }

        Ok(())
    }

    /// Parses a JSON settings document; omitted fields keep their defaults. Not validated.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Reads `path`. `Ok(None)` when the file doesn't exist.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw).map(Some),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigError::Read(err.to_string())),
        }
    }

    /// Keeps `self` when it validates, otherwise logs why and returns the defaults.
    pub fn or_default_if_invalid(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                warn!(%err, "invalid configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Value preselected in the type picker after a reset.
    pub fn default_type(&self) -> &str {
        self.observation_types
            .first()
            .map(|kind| kind.value.as_str())
            .unwrap_or_default()
    }
}

pub fn is_safe_type_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
