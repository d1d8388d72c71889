#![forbid(unsafe_code)]

//! Scriptable [`BrowsingContext`] for tests.
//!
//! Enabled for this crate's unit tests and, through the `test-helpers`
//! feature, for downstream crates.

use std::cell::Cell;

use crate::context::{BrowsingContext, EmbedderLocation};
use crate::environment::EnvironmentSnapshot;
use crate::error::ProbeError;

/// How the fake answers [`BrowsingContext::read_embedder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedderAccess {
    /// Same-origin embedder; both reads succeed.
    Allowed(EmbedderLocation),
    /// Cross-origin embedder; the platform raises a security error.
    Denied(String),
}

/// In-memory browsing context with fixed answers.
#[derive(Debug, Clone)]
pub struct FakeBrowsingContext {
    pub nested: bool,
    pub environment: EnvironmentSnapshot,
    pub referrer: String,
    pub embedder: EmbedderAccess,
    embedder_reads: Cell<u32>,
}

impl FakeBrowsingContext {
    /// A top-level page opened directly (empty referrer).
    #[must_use]
    pub fn top_level() -> Self {
        Self {
            nested: false,
            environment: desktop_environment(),
            referrer: String::new(),
            embedder: EmbedderAccess::Denied("top-level context has no embedder".to_owned()),
            embedder_reads: Cell::new(0),
        }
    }

    /// A page framed by a same-origin embedder at `href`.
    #[must_use]
    pub fn nested_same_origin(origin: &str, href: &str) -> Self {
        Self {
            nested: true,
            referrer: href.to_owned(),
            embedder: EmbedderAccess::Allowed(EmbedderLocation {
                origin: origin.to_owned(),
                href: href.to_owned(),
            }),
            ..Self::top_level()
        }
    }

    /// A page framed by a cross-origin embedder that sent `referrer`.
    #[must_use]
    pub fn nested_cross_origin(referrer: &str) -> Self {
        Self {
            nested: true,
            referrer: referrer.to_owned(),
            embedder: EmbedderAccess::Denied(
                "Blocked a frame with origin \"https://probe.test\" from accessing a cross-origin frame."
                    .to_owned(),
            ),
            ..Self::top_level()
        }
    }

    #[must_use]
    pub fn with_referrer(mut self, referrer: &str) -> Self {
        self.referrer = referrer.to_owned();
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: EnvironmentSnapshot) -> Self {
        self.environment = environment;
        self
    }

    /// How many times `read_embedder` has been called.
    #[must_use]
    pub fn embedder_reads(&self) -> u32 {
        self.embedder_reads.get()
    }
}

fn desktop_environment() -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        inner_width: Some(1280),
        inner_height: Some(720),
        outer_width: Some(1280),
        outer_height: Some(800),
        screen_width: Some(1920),
        screen_height: Some(1080),
        device_pixel_ratio: Some(2.0),
        is_secure_context: Some(true),
        origin: Some("https://probe.test".to_owned()),
        user_agent: Some("Mozilla/5.0 (X11; Linux x86_64) ProbeTest/1.0".to_owned()),
        language: Some("en-US".to_owned()),
        languages: Some(vec!["en-US".to_owned(), "en".to_owned()]),
        platform: Some("Linux x86_64".to_owned()),
        cookie_enabled: Some(true),
    }
}

impl BrowsingContext for FakeBrowsingContext {
    fn is_nested(&self) -> bool {
        self.nested
    }

    fn inner_width(&self) -> Option<i32> {
        self.environment.inner_width
    }

    fn inner_height(&self) -> Option<i32> {
        self.environment.inner_height
    }

    fn outer_width(&self) -> Option<i32> {
        self.environment.outer_width
    }

    fn outer_height(&self) -> Option<i32> {
        self.environment.outer_height
    }

    fn screen_width(&self) -> Option<i32> {
        self.environment.screen_width
    }

    fn screen_height(&self) -> Option<i32> {
        self.environment.screen_height
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.environment.device_pixel_ratio
    }

    fn is_secure_context(&self) -> Option<bool> {
        self.environment.is_secure_context
    }

    fn origin(&self) -> Option<String> {
        self.environment.origin.clone()
    }

    fn user_agent(&self) -> Option<String> {
        self.environment.user_agent.clone()
    }

    fn language(&self) -> Option<String> {
        self.environment.language.clone()
    }

    fn languages(&self) -> Option<Vec<String>> {
        self.environment.languages.clone()
    }

    fn platform(&self) -> Option<String> {
        self.environment.platform.clone()
    }

    fn cookie_enabled(&self) -> Option<bool> {
        self.environment.cookie_enabled
    }

    fn referrer(&self) -> String {
        self.referrer.clone()
    }

    fn read_embedder(&self) -> Result<EmbedderLocation, ProbeError> {
        self.embedder_reads.set(self.embedder_reads.get() + 1);
        match &self.embedder {
            EmbedderAccess::Allowed(location) => Ok(location.clone()),
            EmbedderAccess::Denied(detail) => Err(ProbeError::cross_origin(detail.clone())),
        }
    }
}
