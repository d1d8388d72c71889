#![forbid(unsafe_code)]

//! Renderer-agnostic view tree.
//!
//! A [`View`] is plain data: the DOM painter in `iframe-probe-web` turns it
//! into elements, and [`View::to_text`] turns it into the text report.

use std::fmt::Write as _;

use crate::counters::CounterId;

/// Visual emphasis for an indicator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

impl Tone {
    #[must_use]
    pub const fn for_flag(flag: bool) -> Self {
        if flag { Self::Positive } else { Self::Negative }
    }

    /// CSS class applied by the DOM painter.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Positive => "tone-positive",
            Self::Negative => "tone-negative",
        }
    }
}

/// One row of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Yes/No flag, colored by [`Tone`].
    Indicator { label: String, value: bool },
    /// `label: value` line.
    Field { label: String, value: String },
    /// Activatable control showing its click count.
    Button { counter: CounterId, count: u64 },
    /// Free-standing explanatory text.
    Note(String),
}

impl Item {
    #[must_use]
    pub fn indicator(label: impl Into<String>, value: bool) -> Self {
        Self::Indicator {
            label: label.into(),
            value,
        }
    }

    #[must_use]
    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn tone(&self) -> Option<Tone> {
        match self {
            Self::Indicator { value, .. } => Some(Tone::for_flag(*value)),
            _ => None,
        }
    }

    /// The item as a single line of text.
    #[must_use]
    pub fn text_line(&self) -> String {
        match self {
            Self::Indicator { label, value } => {
                format!("{label}: {}", if *value { "Yes" } else { "No" })
            }
            Self::Field { label, value } => format!("{label}: {value}"),
            Self::Button { counter, count } => format!("{}: ({count})", counter.label()),
            Self::Note(text) => text.clone(),
        }
    }
}

/// A headed group of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub items: Vec<Item>,
}

/// The whole page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub title: String,
    pub sections: Vec<Section>,
    pub footer: Vec<String>,
}

impl View {
    /// Plain-text rendering: title, then each section separated by a blank
    /// line, then the footer.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        for section in &self.sections {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", section.heading);
            for item in &section.items {
                let _ = writeln!(out, "{}", item.text_line());
            }
        }
        if !self.footer.is_empty() {
            let _ = writeln!(out);
            for line in &self.footer {
                let _ = writeln!(out, "{line}");
            }
        }
        out
    }

    /// Find a section by heading.
    #[must_use]
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    /// Every rendered line, in order, for assertions and search.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.to_text().lines().map(str::to_owned).collect()
    }
}
