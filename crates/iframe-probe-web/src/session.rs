#![forbid(unsafe_code)]

//! Platform-independent session wrapping `StepRunner<ProbeModel>`.
//!
//! Shared between the wasm-bindgen exports and the native tests. No JS/WASM
//! types here.

use iframe_probe_core::{
    BrowsingContext, Model, PageEvent, ProbeConfig, ProbeModel, RenderedView, StepRunner,
};
use tracing::info;

/// Whether a `pagehide` with the given `persisted` flag is a final unload.
///
/// `persisted` pages go into the back/forward cache and can be shown again
/// with their DOM and listeners intact.
pub fn pagehide_ends_page(persisted: bool) -> bool {
    !persisted
}

/// One mounted page: the model plus its runner.
pub struct ProbeSession {
    runner: StepRunner<ProbeModel>,
}

impl ProbeSession {
    /// Run the load sequence against `ctx` and initialize the runner.
    ///
    /// Everything the page reports about its environment is read here, before
    /// the caller attaches any listener.
    pub fn start(ctx: &impl BrowsingContext, config: ProbeConfig) -> Self {
        let mut runner = StepRunner::new(ProbeModel::load(ctx, config));
        runner.init();
        let mut session = Self { runner };
        session.flush_logs();
        session
    }

    /// The initial frame, rendered unconditionally.
    pub fn first_frame(&mut self) -> RenderedView {
        self.runner.force_render()
    }

    /// Apply one host event; returns the new frame if the view changed.
    pub fn dispatch(&mut self, event: PageEvent) -> Option<RenderedView> {
        self.runner.push_event(event);
        self.runner.step();
        self.flush_logs();
        self.runner.render()
    }

    /// Plain-text rendering of the current state.
    pub fn text_report(&self) -> String {
        self.runner.model().view().to_text()
    }

    pub fn report_json(&self) -> Result<String, serde_json::Error> {
        self.runner.model().report_json()
    }

    pub fn is_embedded(&self) -> bool {
        self.runner.model().status().is_embedded()
    }

    pub fn is_hovering(&self) -> bool {
        self.runner.model().hover_state().is_over()
    }

    pub fn counters(&self) -> [u64; 3] {
        self.runner.model().counters().as_array()
    }

    pub fn frame_idx(&self) -> u64 {
        self.runner.frame_idx()
    }

    fn flush_logs(&mut self) {
        for line in self.runner.drain_logs() {
            info!("{line}");
        }
    }
}
