#![forbid(unsafe_code)]

//! Two-state hover machine for the document root element.

use serde::Serialize;

/// Whether the pointer is over the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverState {
    #[default]
    NotOver,
    Over,
}

impl HoverState {
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotOver => "not_over",
            Self::Over => "over",
        }
    }
}

/// Pointer signals targeting the root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverSignal {
    PointerEnter,
    PointerLeave,
}

impl HoverSignal {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerEnter => "pointer_enter",
            Self::PointerLeave => "pointer_leave",
        }
    }
}

/// Result of feeding one signal to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTransition {
    pub from_state: HoverState,
    pub to_state: HoverState,
    pub signal: HoverSignal,
}

impl HoverTransition {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.from_state != self.to_state
    }
}

/// Tracks [`HoverState`] for the lifetime of the page. Never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverTracker {
    state: HoverState,
}

impl HoverTracker {
    #[must_use]
    pub const fn state(&self) -> HoverState {
        self.state
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Apply a signal. Enter always lands in `Over`, leave in `NotOver`.
    pub fn handle(&mut self, signal: HoverSignal) -> HoverTransition {
        let from_state = self.state;
        self.state = match signal {
            HoverSignal::PointerEnter => HoverState::Over,
            HoverSignal::PointerLeave => HoverState::NotOver,
        };
        HoverTransition {
            from_state,
            to_state: self.state,
            signal,
        }
    }
}
