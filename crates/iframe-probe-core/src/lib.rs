#![forbid(unsafe_code)]

//! Core: state, probing, and rendering for the iframe behavior tester.
//!
//! # Role in the workspace
//! `iframe-probe-core` owns everything that does not touch the DOM. It reads
//! platform facts through the [`BrowsingContext`] trait, keeps the per-load
//! state in [`ProbeModel`], and renders that state into a [`View`] tree that
//! frontends turn into markup or plain text.
//!
//! # Primary responsibilities
//! - **Embedding detection**: whether the page sits inside another page.
//! - **Environment snapshot**: fourteen window/navigator/screen facts, read once.
//! - **Embedding context**: referrer plus the guarded embedder origin/location pair.
//! - **Interaction state**: the hover machine and three click counters.
//! - **Runtime**: [`StepRunner`] drains host events into `Model::update` and
//!   renders only when dirty.
//!
//! # How it fits in the system
//! `iframe-probe-web` implements [`BrowsingContext`] over `web-sys`, feeds DOM
//! events into a [`StepRunner`] as [`PageEvent`]s, and paints each
//! [`RenderedView`] into the document.

pub mod config;
pub mod context;
pub mod counters;
pub mod embedding;
pub mod environment;
pub mod error;
pub mod event;
pub mod hover;
pub mod model;
pub mod program;
pub mod view;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use config::ProbeConfig;
pub use context::{BrowsingContext, EmbedderLocation};
pub use counters::{ClickCounters, CounterId};
pub use embedding::{CROSS_ORIGIN_SENTINEL, EmbeddingContext, EmbeddingStatus};
pub use environment::{EnvironmentSnapshot, FieldValue};
pub use error::{ConfigError, ProbeError};
pub use event::PageEvent;
pub use hover::{HoverSignal, HoverState, HoverTracker};
pub use model::{ProbeModel, ProbeMsg, ProbeReport};
pub use program::{Cmd, Model, RenderedView, StepResult, StepRunner};
pub use view::{Item, Section, Tone, View};
