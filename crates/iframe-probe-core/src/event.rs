#![forbid(unsafe_code)]

//! Host signals delivered to the runtime.

use crate::counters::CounterId;
use crate::hover::HoverSignal;

/// An external signal from the page: pointer movement over the root element
/// or activation of one of the test buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    PointerEnter,
    PointerLeave,
    Activate(CounterId),
}

impl PageEvent {
    /// The hover signal carried by this event, if any.
    #[must_use]
    pub const fn hover_signal(self) -> Option<HoverSignal> {
        match self {
            Self::PointerEnter => Some(HoverSignal::PointerEnter),
            Self::PointerLeave => Some(HoverSignal::PointerLeave),
            Self::Activate(_) => None,
        }
    }
}

impl From<HoverSignal> for PageEvent {
    fn from(signal: HoverSignal) -> Self {
        match signal {
            HoverSignal::PointerEnter => Self::PointerEnter,
            HoverSignal::PointerLeave => Self::PointerLeave,
        }
    }
}
