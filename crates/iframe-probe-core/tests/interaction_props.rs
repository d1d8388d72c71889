//! Property tests for hover and click state.

use iframe_probe_core::{
    BrowsingContext, ClickCounters, CounterId, EmbedderLocation, HoverSignal, HoverTracker, Model,
    PageEvent, ProbeConfig, ProbeError, ProbeModel, StepRunner,
};
use proptest::prelude::*;

/// Minimal top-level context: every optional fact missing.
struct BareContext;

impl BrowsingContext for BareContext {
    fn is_nested(&self) -> bool {
        false
    }
    fn inner_width(&self) -> Option<i32> {
        None
    }
    fn inner_height(&self) -> Option<i32> {
        None
    }
    fn outer_width(&self) -> Option<i32> {
        None
    }
    fn outer_height(&self) -> Option<i32> {
        None
    }
    fn screen_width(&self) -> Option<i32> {
        None
    }
    fn screen_height(&self) -> Option<i32> {
        None
    }
    fn device_pixel_ratio(&self) -> Option<f64> {
        None
    }
    fn is_secure_context(&self) -> Option<bool> {
        None
    }
    fn origin(&self) -> Option<String> {
        None
    }
    fn user_agent(&self) -> Option<String> {
        None
    }
    fn language(&self) -> Option<String> {
        None
    }
    fn languages(&self) -> Option<Vec<String>> {
        None
    }
    fn platform(&self) -> Option<String> {
        None
    }
    fn cookie_enabled(&self) -> Option<bool> {
        None
    }
    fn referrer(&self) -> String {
        String::new()
    }
    fn read_embedder(&self) -> Result<EmbedderLocation, ProbeError> {
        Err(ProbeError::cross_origin("not nested"))
    }
}

fn counter_id() -> impl Strategy<Value = CounterId> {
    prop_oneof![
        Just(CounterId::One),
        Just(CounterId::Two),
        Just(CounterId::Three)
    ]
}

fn page_event() -> impl Strategy<Value = PageEvent> {
    prop_oneof![
        Just(PageEvent::PointerEnter),
        Just(PageEvent::PointerLeave),
        counter_id().prop_map(PageEvent::Activate),
    ]
}

proptest! {
    #[test]
    fn enter_leave_cycles_match_single_cycle(cycles in 1usize..64) {
        let mut once = HoverTracker::default();
        once.handle(HoverSignal::PointerEnter);
        once.handle(HoverSignal::PointerLeave);

        let mut many = HoverTracker::default();
        for _ in 0..cycles {
            many.handle(HoverSignal::PointerEnter);
            prop_assert!(many.is_over());
            many.handle(HoverSignal::PointerLeave);
            prop_assert!(!many.is_over());
        }
        prop_assert_eq!(many, once);
    }

    #[test]
    fn hover_state_follows_last_signal(signals in prop::collection::vec(any::<bool>(), 1..64)) {
        let mut tracker = HoverTracker::default();
        for enter in &signals {
            let signal = if *enter { HoverSignal::PointerEnter } else { HoverSignal::PointerLeave };
            tracker.handle(signal);
        }
        prop_assert_eq!(tracker.is_over(), *signals.last().unwrap());
    }

    #[test]
    fn counters_have_no_cross_talk(id in counter_id(), n in 0u64..200) {
        let mut counters = ClickCounters::default();
        for _ in 0..n {
            counters.increment(id);
        }
        for other in CounterId::ALL {
            let expected = if other == id { n } else { 0 };
            prop_assert_eq!(counters.get(other), expected);
        }
    }

    #[test]
    fn runner_state_matches_event_stream(events in prop::collection::vec(page_event(), 0..128)) {
        let mut runner = StepRunner::new(ProbeModel::load(&BareContext, ProbeConfig::default()));
        runner.init();
        for event in &events {
            runner.push_event(*event);
        }
        let result = runner.step();
        prop_assert_eq!(result.events_processed as usize, events.len());

        let model = runner.model();
        for id in CounterId::ALL {
            let expected = events
                .iter()
                .filter(|e| **e == PageEvent::Activate(id))
                .count() as u64;
            prop_assert_eq!(model.counters().get(id), expected);
        }
        let last_hover = events.iter().rev().find_map(|e| e.hover_signal());
        prop_assert_eq!(
            model.hover_state().is_over(),
            last_hover == Some(HoverSignal::PointerEnter)
        );

        let line = format!("Test Button 1: ({})", model.counters().get(CounterId::One));
        prop_assert!(model.view().lines().contains(&line));
    }
}
