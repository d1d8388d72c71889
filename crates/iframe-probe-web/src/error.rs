#![forbid(unsafe_code)]

//! Errors raised while mounting the tester into a page.

use std::fmt;

use iframe_probe_core::ConfigError;

#[derive(Debug)]
pub enum MountError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// `window.document` or its root element is missing.
    NoDocument,
    /// Neither the configured mount element nor `<body>` exists.
    NoMountPoint(String),
    /// A DOM call threw.
    Dom(String),
    /// The host's options were rejected.
    Config(ConfigError),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window object"),
            Self::NoDocument => write!(f, "window has no document element"),
            Self::NoMountPoint(id) => {
                write!(f, "mount element #{id} not found and document has no body")
            }
            Self::Dom(msg) => write!(f, "DOM operation failed: {msg}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for MountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for MountError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
