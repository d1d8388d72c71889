#![forbid(unsafe_code)]

//! Embedding detection and the parent-context probe.

use serde::{Serialize, Serializer};
use tracing::{debug, error};

use crate::context::{BrowsingContext, EmbedderLocation};

/// Placeholder shown for embedder fields that same-origin policy hid.
pub const CROSS_ORIGIN_SENTINEL: &str = "Error: Cross-origin restriction";

/// Whether the page runs inside another page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingStatus {
    TopLevel,
    Nested,
}

impl EmbeddingStatus {
    /// Compare this context against the top-level context.
    #[must_use]
    pub fn detect(ctx: &impl BrowsingContext) -> Self {
        if ctx.is_nested() {
            Self::Nested
        } else {
            Self::TopLevel
        }
    }

    #[must_use]
    pub const fn is_embedded(self) -> bool {
        matches!(self, Self::Nested)
    }
}

impl Serialize for EmbeddingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_embedded())
    }
}

/// The embedder's origin and URL, or the sentinel pair when access was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedderDetails {
    Readable(EmbedderLocation),
    Restricted,
}

impl EmbedderDetails {
    #[must_use]
    pub fn origin(&self) -> &str {
        match self {
            Self::Readable(location) => &location.origin,
            Self::Restricted => CROSS_ORIGIN_SENTINEL,
        }
    }

    #[must_use]
    pub fn location_href(&self) -> &str {
        match self {
            Self::Readable(location) => &location.href,
            Self::Restricted => CROSS_ORIGIN_SENTINEL,
        }
    }
}

/// What the page can learn about whoever embedded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingContext {
    pub referrer: String,
    /// Present only when the page is nested.
    pub embedder: Option<EmbedderDetails>,
}

impl EmbeddingContext {
    /// Probe the embedder.
    ///
    /// Top-level pages only report the referrer. Nested pages additionally
    /// attempt the guarded origin/location read; a denial is logged and
    /// replaces both values with [`CROSS_ORIGIN_SENTINEL`].
    #[must_use]
    pub fn probe(ctx: &impl BrowsingContext, status: EmbeddingStatus) -> Self {
        let referrer = ctx.referrer();
        let embedder = match status {
            EmbeddingStatus::TopLevel => None,
            EmbeddingStatus::Nested => Some(match ctx.read_embedder() {
                Ok(location) => {
                    debug!(origin = %location.origin, "parent window is readable");
                    EmbedderDetails::Readable(location)
                }
                Err(err) => {
                    error!(error = %err, "error accessing parent window details");
                    EmbedderDetails::Restricted
                }
            }),
        };
        Self { referrer, embedder }
    }

    #[must_use]
    pub fn parent_origin(&self) -> Option<&str> {
        self.embedder.as_ref().map(EmbedderDetails::origin)
    }

    #[must_use]
    pub fn parent_location_href(&self) -> Option<&str> {
        self.embedder.as_ref().map(EmbedderDetails::location_href)
    }

    /// Label/value pairs for display, omitting fields that do not apply.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![("referrer", self.referrer.as_str())];
        if let Some(embedder) = &self.embedder {
            fields.push(("parentOrigin", embedder.origin()));
            fields.push(("parentLocationHref", embedder.location_href()));
        }
        fields
    }
}

impl Serialize for EmbeddingContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let fields = self.fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBrowsingContext;
    use pretty_assertions::assert_eq;

    #[test]
    fn top_level_reports_only_referrer() {
        let ctx = FakeBrowsingContext::top_level().with_referrer("https://search.test/?q=probe");
        let status = EmbeddingStatus::detect(&ctx);
        assert_eq!(status, EmbeddingStatus::TopLevel);
        assert!(!status.is_embedded());

        let context = EmbeddingContext::probe(&ctx, status);
        assert_eq!(context.fields(), vec![("referrer", "https://search.test/?q=probe")]);
        assert_eq!(context.parent_origin(), None);
        assert_eq!(ctx.embedder_reads(), 0);
    }

    #[test]
    fn same_origin_embedder_is_read() {
        let ctx = FakeBrowsingContext::nested_same_origin(
            "https://probe.test",
            "https://probe.test/host.html",
        );
        let status = EmbeddingStatus::detect(&ctx);
        assert!(status.is_embedded());

        let context = EmbeddingContext::probe(&ctx, status);
        assert_eq!(context.parent_origin(), Some("https://probe.test"));
        assert_eq!(
            context.parent_location_href(),
            Some("https://probe.test/host.html")
        );
        assert_eq!(ctx.embedder_reads(), 1);
    }

    #[test]
    fn cross_origin_embedder_yields_sentinel_pair() {
        let ctx = FakeBrowsingContext::nested_cross_origin("https://www.notion.so/");
        let context = EmbeddingContext::probe(&ctx, EmbeddingStatus::detect(&ctx));
        assert_eq!(
            context.fields(),
            vec![
                ("referrer", "https://www.notion.so/"),
                ("parentOrigin", CROSS_ORIGIN_SENTINEL),
                ("parentLocationHref", CROSS_ORIGIN_SENTINEL),
            ]
        );
        assert_eq!(context.embedder, Some(EmbedderDetails::Restricted));
    }

    #[test]
    fn empty_referrer_is_still_reported() {
        let ctx = FakeBrowsingContext::nested_cross_origin("");
        let context = EmbeddingContext::probe(&ctx, EmbeddingStatus::Nested);
        assert_eq!(context.fields()[0], ("referrer", ""));
    }

    #[test]
    fn serializes_only_applicable_fields() {
        let top = EmbeddingContext {
            referrer: String::new(),
            embedder: None,
        };
        assert_eq!(
            serde_json::to_string(&top).unwrap(),
            r#"{"referrer":""}"#
        );

        let nested = EmbeddingContext {
            referrer: "https://host.test/".into(),
            embedder: Some(EmbedderDetails::Restricted),
        };
        let json = serde_json::to_value(&nested).unwrap();
        assert_eq!(json["parentOrigin"], CROSS_ORIGIN_SENTINEL);
        assert_eq!(json["parentLocationHref"], CROSS_ORIGIN_SENTINEL);
    }
}
