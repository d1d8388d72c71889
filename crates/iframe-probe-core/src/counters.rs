#![forbid(unsafe_code)]

//! Three independent click counters.

use serde::Serialize;

/// Identifies one of the three test buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterId {
    One,
    Two,
    Three,
}

impl CounterId {
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Three => 2,
        }
    }

    /// 1-based button number, as shown to the viewer and stored in `data-counter`.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        format!("Test Button {}", self.number())
    }
}

/// Click counts, one per [`CounterId`]. Starts at zero; never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClickCounters {
    counts: [u64; 3],
}

impl ClickCounters {
    /// Add one click to `id` and return the new count.
    pub fn increment(&mut self, id: CounterId) -> u64 {
        let slot = &mut self.counts[id.index()];
        *slot = slot.saturating_add(1);
        *slot
    }

    #[must_use]
    pub const fn get(&self, id: CounterId) -> u64 {
        self.counts[id.index()]
    }

    #[must_use]
    pub const fn as_array(&self) -> [u64; 3] {
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_at_zero() {
        let counters = ClickCounters::default();
        assert_eq!(counters.as_array(), [0, 0, 0]);
    }

    #[test]
    fn increment_returns_new_value() {
        let mut counters = ClickCounters::default();
        assert_eq!(counters.increment(CounterId::Two), 1);
        assert_eq!(counters.increment(CounterId::Two), 2);
        assert_eq!(counters.get(CounterId::Two), 2);
        assert_eq!(counters.get(CounterId::One), 0);
        assert_eq!(counters.get(CounterId::Three), 0);
    }

    #[test]
    fn numbers_round_trip() {
        for id in CounterId::ALL {
            assert_eq!(CounterId::from_number(id.number()), Some(id));
        }
        assert_eq!(CounterId::from_number(0), None);
        assert_eq!(CounterId::from_number(4), None);
        assert_eq!(CounterId::Three.label(), "Test Button 3");
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut counters = ClickCounters::default();
        counters.increment(CounterId::Three);
        assert_eq!(serde_json::to_string(&counters).unwrap(), "[0,0,1]");
    }
}
