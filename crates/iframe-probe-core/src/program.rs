#![forbid(unsafe_code)]

//! Elm-style model trait and the step runner that drives it.
//!
//! The host owns the event loop. DOM listeners push [`PageEvent`]s into a
//! [`StepRunner`], then call [`step`](StepRunner::step) and
//! [`render`](StepRunner::render):
//!
//! ```text
//! DOM event
//!   → push_event(PageEvent)    // pointer enter/leave, button activation
//!   → step()                   // drain queue, run model.update
//!   → render()                 // if dirty: model.view → View
//!   → paint the View           // replace the mount point's children
//! ```
//!
//! Everything runs on the page's single thread; there is no scheduling,
//! ticking, or background work.

use std::collections::VecDeque;

use tracing::debug;

use crate::event::PageEvent;
use crate::view::View;

/// Application state machine: initialize once, update per message, render on demand.
pub trait Model: Sized {
    /// Messages that update the model. Every host event maps to one.
    type Message: From<PageEvent> + 'static;

    /// Called once, after the model is fully constructed and before any
    /// host event is applied.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// The state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render current state. Must be pure.
    fn view(&self) -> View;
}

/// Follow-up work requested by `init` or `update`.
#[derive(Debug, Default)]
pub enum Cmd<M> {
    #[default]
    None,
    /// Execute several commands in order.
    Batch(Vec<Cmd<M>>),
    /// Feed another message to the model immediately.
    Msg(M),
    /// Record a diagnostic line for the host to drain.
    Log(String),
}

impl<M> Cmd<M> {
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    #[must_use]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    #[must_use]
    pub fn log(text: impl Into<String>) -> Self {
        Self::Log(text.into())
    }

    /// Batch commands, collapsing empty and single-element batches.
    #[must_use]
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Outcome of a single [`StepRunner::step`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Number of queued events processed in this step.
    pub events_processed: u32,
    /// Whether the view needs rendering.
    pub dirty: bool,
}

/// Output of [`StepRunner::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub view: View,
    /// Sequential frame index (starts at 0).
    pub frame_idx: u64,
}

/// Step-based runner for a [`Model`] on a single-threaded host.
pub struct StepRunner<M: Model> {
    model: M,
    dirty: bool,
    initialized: bool,
    frame_idx: u64,
    /// Buffered events from the host.
    event_queue: VecDeque<PageEvent>,
    /// Lines emitted via `Cmd::Log`.
    logs: Vec<String>,
}

impl<M: Model> StepRunner<M> {
    /// Wrap a constructed model. It is not initialized until [`init`](Self::init).
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            dirty: true, // First frame is always dirty.
            initialized: false,
            frame_idx: 0,
            event_queue: VecDeque::new(),
            logs: Vec::new(),
        }
    }

    /// Run `Model::init`. Only the first call has any effect.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        let cmd = self.model.init();
        self.initialized = true;
        self.dirty = true;
        self.execute_cmd(cmd);
    }

    /// Buffer an event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: PageEvent) {
        self.event_queue.push_back(event);
    }

    /// Apply all buffered events.
    ///
    /// Before `init()` nothing is applied and events stay queued.
    pub fn step(&mut self) -> StepResult {
        if !self.initialized {
            return StepResult::default();
        }

        let mut result = StepResult::default();
        while let Some(event) = self.event_queue.pop_front() {
            debug!(?event, "applying page event");
            let cmd = self.model.update(M::Message::from(event));
            self.dirty = true;
            self.execute_cmd(cmd);
            result.events_processed += 1;
        }
        result.dirty = self.dirty;
        result
    }

    /// Render if dirty; `None` when nothing changed since the last render.
    pub fn render(&mut self) -> Option<RenderedView> {
        if !self.dirty || !self.initialized {
            return None;
        }
        Some(self.force_render())
    }

    /// Render unconditionally.
    pub fn force_render(&mut self) -> RenderedView {
        let view = self.model.view();
        self.dirty = false;
        let frame_idx = self.frame_idx;
        self.frame_idx += 1;
        RenderedView { view, frame_idx }
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of frames rendered so far.
    #[must_use]
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Drain and return accumulated log lines.
    pub fn drain_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.dirty = true;
                self.execute_cmd(cmd);
            }
            Cmd::Log(text) => {
                debug!(line = %text, "model log");
                self.logs.push(text);
            }
        }
    }
}
