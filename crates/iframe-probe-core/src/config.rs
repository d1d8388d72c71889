#![forbid(unsafe_code)]

//! Mount-time options supplied by the host page.
//!
//! The host passes a plain JS object to `IframeProbe.mount`; the web crate
//! stringifies it and hands the JSON to [`ProbeConfig::from_json`]. Every key
//! is optional and unknown keys are rejected so typos surface immediately.

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::ConfigError;

/// Default page heading.
pub const DEFAULT_TITLE: &str = "Iframe Behavior Tester";
/// Default id of the element the view is mounted into.
pub const DEFAULT_MOUNT_ID: &str = "app";
/// Default tracing level name.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Host-supplied options for a probe instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ProbeConfig {
    /// Page heading.
    pub title: String,
    /// Id of the mount element. Falls back to `<body>` when missing.
    pub mount_id: String,
    /// Extra footer lines rendered after the reload hint.
    pub footer: Vec<String>,
    /// Minimum tracing level forwarded to the console.
    pub log_level: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            mount_id: DEFAULT_MOUNT_ID.to_owned(),
            footer: Vec::new(),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl ProbeConfig {
    /// Parse and validate options from a JSON document.
    ///
    /// `null` and the empty string yield the defaults, matching a host that
    /// calls `mount()` with no argument.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" || trimmed == "undefined" {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(trimmed)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        self.tracing_level()?;
        Ok(())
    }

    /// The configured level as a [`tracing::Level`].
    ///
    /// Only level names are accepted; `Level`'s numeric forms ("1".."5") are not.
    pub fn tracing_level(&self) -> Result<Level, ConfigError> {
        let name = self.log_level.trim();
        let known = ["error", "warn", "info", "debug", "trace"]
            .iter()
            .any(|level| name.eq_ignore_ascii_case(level));
        if !known {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        name.parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
