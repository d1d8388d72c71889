#![forbid(unsafe_code)]

//! WASM frontend for the iframe behavior tester.
//!
//! This crate provides [`IframeProbe`], a `wasm-bindgen`-exported handle
//! that snapshots the browsing context, paints the diagnostic view into the
//! page, and keeps it current as the pointer moves and buttons are clicked.
//!
//! Host usage (after `wasm-pack build --target web`):
//!
//! ```text
//! import init, { IframeProbe } from "./pkg/iframe_probe_web.js";
//! await init();
//! const probe = IframeProbe.mount({ mountId: "app" });
//! ```
//!
//! Listeners are released on a final `pagehide`; a page parked in the
//! back/forward cache keeps them and comes back live.

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::IframeProbe;

pub mod error;

pub use error::MountError;

// Session is used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod session;
