#![forbid(unsafe_code)]

//! The platform seam: read-only queries against the hosting browser.
//!
//! Every method except [`BrowsingContext::read_embedder`] is infallible by
//! contract. Values the platform does not expose come back as `None`.

use crate::error::ProbeError;

/// Origin and current URL of the embedding page, read together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedderLocation {
    pub origin: String,
    pub href: String,
}

/// Read access to the browsing context the page runs in.
pub trait BrowsingContext {
    /// `true` when this context is not the top-level browsing context.
    ///
    /// Implementations compare context identities only; this never touches
    /// properties guarded by same-origin policy.
    fn is_nested(&self) -> bool;

    fn inner_width(&self) -> Option<i32>;
    fn inner_height(&self) -> Option<i32>;
    fn outer_width(&self) -> Option<i32>;
    fn outer_height(&self) -> Option<i32>;
    fn screen_width(&self) -> Option<i32>;
    fn screen_height(&self) -> Option<i32>;
    fn device_pixel_ratio(&self) -> Option<f64>;
    fn is_secure_context(&self) -> Option<bool>;
    fn origin(&self) -> Option<String>;
    fn user_agent(&self) -> Option<String>;
    fn language(&self) -> Option<String>;
    fn languages(&self) -> Option<Vec<String>>;
    fn platform(&self) -> Option<String>;
    fn cookie_enabled(&self) -> Option<bool>;

    /// `document.referrer`; empty when the page was opened directly.
    fn referrer(&self) -> String;

    /// Read the embedder's origin and location as one guarded operation.
    ///
    /// Either both values are returned or the whole read fails.
    fn read_embedder(&self) -> Result<EmbedderLocation, ProbeError>;
}
