#![forbid(unsafe_code)]

//! Environment snapshot: window, screen, and navigator facts read once at load.

use std::fmt;

use serde::Serialize;

use crate::context::BrowsingContext;

/// Display text for a field the platform did not report.
pub const UNAVAILABLE: &str = "unavailable";

/// Immutable record of the browsing environment at load time.
///
/// Fields are `None` when the platform could not supply them. Nothing here is
/// refreshed; a page reload takes a new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSnapshot {
    pub inner_width: Option<i32>,
    pub inner_height: Option<i32>,
    pub outer_width: Option<i32>,
    pub outer_height: Option<i32>,
    pub screen_width: Option<i32>,
    pub screen_height: Option<i32>,
    pub device_pixel_ratio: Option<f64>,
    pub is_secure_context: Option<bool>,
    pub origin: Option<String>,
    pub user_agent: Option<String>,
    pub language: Option<String>,
    pub languages: Option<Vec<String>>,
    pub platform: Option<String>,
    pub cookie_enabled: Option<bool>,
}

impl EnvironmentSnapshot {
    /// Number of fields in the snapshot.
    pub const FIELD_COUNT: usize = 14;

    /// Read every field from `ctx` in one synchronous pass.
    #[must_use]
    pub fn collect(ctx: &impl BrowsingContext) -> Self {
        Self {
            inner_width: ctx.inner_width(),
            inner_height: ctx.inner_height(),
            outer_width: ctx.outer_width(),
            outer_height: ctx.outer_height(),
            screen_width: ctx.screen_width(),
            screen_height: ctx.screen_height(),
            device_pixel_ratio: ctx.device_pixel_ratio(),
            is_secure_context: ctx.is_secure_context(),
            origin: ctx.origin(),
            user_agent: ctx.user_agent(),
            language: ctx.language(),
            languages: ctx.languages(),
            platform: ctx.platform(),
            cookie_enabled: ctx.cookie_enabled(),
        }
    }

    /// Label/value pairs in display order, labelled with the DOM property names.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, Option<FieldValue>); Self::FIELD_COUNT] {
        [
            ("innerWidth", self.inner_width.map(FieldValue::Int)),
            ("innerHeight", self.inner_height.map(FieldValue::Int)),
            ("outerWidth", self.outer_width.map(FieldValue::Int)),
            ("outerHeight", self.outer_height.map(FieldValue::Int)),
            ("screenWidth", self.screen_width.map(FieldValue::Int)),
            ("screenHeight", self.screen_height.map(FieldValue::Int)),
            (
                "devicePixelRatio",
                self.device_pixel_ratio.map(FieldValue::Float),
            ),
            ("isSecureContext", self.is_secure_context.map(FieldValue::Bool)),
            ("origin", self.origin.clone().map(FieldValue::Text)),
            ("userAgent", self.user_agent.clone().map(FieldValue::Text)),
            ("language", self.language.clone().map(FieldValue::Text)),
            ("languages", self.languages.clone().map(FieldValue::List)),
            ("platform", self.platform.clone().map(FieldValue::Text)),
            ("cookieEnabled", self.cookie_enabled.map(FieldValue::Bool)),
        ]
    }
}

/// A single displayable snapshot value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i32),
    Float(f64),
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Render an optional value, substituting [`UNAVAILABLE`].
#[must_use]
pub fn display_or_unavailable(value: Option<&FieldValue>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_owned(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBrowsingContext;
    use pretty_assertions::assert_eq;

    #[test]
    fn collect_reads_every_field() {
        let ctx = FakeBrowsingContext::top_level();
        let snapshot = EnvironmentSnapshot::collect(&ctx);
        assert_eq!(snapshot.inner_width, Some(1280));
        assert_eq!(snapshot.screen_height, Some(1080));
        assert_eq!(snapshot.device_pixel_ratio, Some(2.0));
        assert_eq!(snapshot.is_secure_context, Some(true));
        assert_eq!(snapshot.origin.as_deref(), Some("https://probe.test"));
        assert_eq!(
            snapshot.languages,
            Some(vec!["en-US".to_owned(), "en".to_owned()])
        );
        assert_eq!(snapshot.cookie_enabled, Some(true));
        assert!(snapshot.fields().iter().all(|(_, value)| value.is_some()));
    }

    #[test]
    fn fields_keep_display_order() {
        let labels: Vec<_> = EnvironmentSnapshot::default()
            .fields()
            .iter()
            .map(|(label, _)| *label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "innerWidth",
                "innerHeight",
                "outerWidth",
                "outerHeight",
                "screenWidth",
                "screenHeight",
                "devicePixelRatio",
                "isSecureContext",
                "origin",
                "userAgent",
                "language",
                "languages",
                "platform",
                "cookieEnabled",
            ]
        );
    }

    #[test]
    fn values_format_like_the_dom() {
        assert_eq!(FieldValue::Int(1024).to_string(), "1024");
        assert_eq!(FieldValue::Float(2.0).to_string(), "2");
        assert_eq!(FieldValue::Float(1.25).to_string(), "1.25");
        assert_eq!(FieldValue::Bool(false).to_string(), "false");
        assert_eq!(
            FieldValue::List(vec!["de-DE".into(), "de".into(), "en".into()]).to_string(),
            "de-DE, de, en"
        );
        assert_eq!(FieldValue::List(Vec::new()).to_string(), "");
    }

    #[test]
    fn missing_values_render_as_unavailable() {
        assert_eq!(display_or_unavailable(None), UNAVAILABLE);
        assert_eq!(
            display_or_unavailable(Some(&FieldValue::Text("MacIntel".into()))),
            "MacIntel"
        );
    }

    #[test]
    fn serializes_with_dom_property_names() {
        let snapshot = EnvironmentSnapshot {
            inner_width: Some(800),
            cookie_enabled: Some(false),
            ..EnvironmentSnapshot::default()
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["innerWidth"], 800);
        assert_eq!(json["cookieEnabled"], false);
        assert!(json["userAgent"].is_null());
    }
}
