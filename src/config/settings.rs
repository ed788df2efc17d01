//! Registry and dispatcher settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compose::{validate_format, DEFAULT_TIMESTAMP_FORMAT};
use crate::diagnostics::DiagContext;
use crate::error::{Error, Result};

/// Default capacity of the bounded (buffered) submission path.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Environment variable naming a JSON settings file for the default registry.
pub const CONFIG_ENV_VAR: &str = "CATLOG_CONFIG";

/// Settings for a registry and its dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pad categories so timestamps line up.
    pub category_padding: bool,
    /// Blank repeated category labels on consecutive writes.
    pub category_grouping: bool,
    /// Submit through the bounded buffer instead of the rendezvous path.
    pub buffered: bool,
    pub buffer_capacity: usize,
    /// Timestamp layout given to newly constructed loggers.
    pub timestamp_format: String,
    pub thread_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            category_padding: true,
            category_grouping: true,
            buffered: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            thread_name: "catlog-dispatcher".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a JSON settings file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Settings for the process-wide registry.
    ///
    /// Uses the file named by `CATLOG_CONFIG` if set; falls back to defaults
    /// when it is unset or unusable.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        let ctx = DiagContext::new("settings");
        match Self::from_json_file(&path) {
            Ok(settings) => {
                crate::log_debug!(ctx, "SETTINGS_LOADED", path = path);
                settings
            }
            Err(e) => {
                crate::log_warn!(ctx, "SETTINGS_LOAD_FAILED", path = path, error = e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        validate_format(&self.timestamp_format)
    }
}
