#![forbid(unsafe_code)]

//! Error types for probing and configuration.

use std::fmt;

/// Failure reported by the platform while probing the embedding page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Same-origin policy refused a read of the embedder's properties.
    CrossOriginAccessDenied {
        /// Platform-supplied description (usually the `SecurityError` text).
        detail: String,
    },
}

impl ProbeError {
    #[must_use]
    pub fn cross_origin(detail: impl Into<String>) -> Self {
        Self::CrossOriginAccessDenied {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CrossOriginAccessDenied { detail } => {
                write!(f, "cross-origin access to parent window denied: {detail}")
            }
        }
    }
}

impl std::error::Error for ProbeError {}

/// Invalid or unparseable [`ProbeConfig`](crate::ProbeConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The options document was not valid JSON or had unknown/mistyped keys.
    Parse(serde_json::Error),
    /// `title` was empty or whitespace.
    EmptyTitle,
    /// `logLevel` did not name a tracing level.
    InvalidLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid probe options: {err}"),
            Self::EmptyTitle => write!(f, "page title must not be empty"),
            Self::InvalidLogLevel(level) => write!(
                f,
                "unknown log level {level:?} (expected error, warn, info, debug, or trace)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::EmptyTitle | Self::InvalidLogLevel(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
