#![forbid(unsafe_code)]

//! RAII DOM event subscriptions.
//!
//! A [`Listener`] removes its callback when dropped, so releasing a
//! subscription is just dropping it. Paired subscriptions are built so a
//! failure part way through drops whatever was already attached.

use std::rc::Rc;

use iframe_probe_core::{CounterId, HoverSignal};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget};

use crate::dom::{COUNTER_ATTR, dom_err};
use crate::error::MountError;

/// One `addEventListener` registration, undone on drop.
pub(crate) struct Listener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn attach(
        target: &EventTarget,
        event_type: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, MountError> {
        let callback = Closure::<dyn FnMut(Event)>::new(callback);
        target
            .add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_type,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// `mouseenter`/`mouseleave` on the document root, attached and released together.
pub(crate) struct HoverSubscription {
    _enter: Listener,
    _leave: Listener,
}

impl HoverSubscription {
    pub(crate) fn attach(
        root: &Element,
        on_signal: impl Fn(HoverSignal) + 'static,
    ) -> Result<Self, MountError> {
        let on_signal = Rc::new(on_signal);
        let enter = {
            let on_signal = Rc::clone(&on_signal);
            Listener::attach(root, "mouseenter", move |_| {
                on_signal(HoverSignal::PointerEnter);
            })?
        };
        // On failure `enter` is dropped here and detaches itself.
        let leave = Listener::attach(root, "mouseleave", move |_| {
            on_signal(HoverSignal::PointerLeave);
        })?;
        Ok(Self {
            _enter: enter,
            _leave: leave,
        })
    }
}

/// One delegated `click` listener on the mount point for all test buttons.
///
/// Buttons are recreated on every repaint, so they carry a `data-counter`
/// attribute instead of their own listeners.
pub(crate) struct ClickDelegate {
    _click: Listener,
}

impl ClickDelegate {
    pub(crate) fn attach(
        mount: &Element,
        on_activate: impl Fn(CounterId) + 'static,
    ) -> Result<Self, MountError> {
        let click = Listener::attach(mount, "click", move |event: Event| {
            if let Some(id) = counter_from_event(&event) {
                on_activate(id);
            }
        })?;
        Ok(Self { _click: click })
    }
}

fn counter_from_event(event: &Event) -> Option<CounterId> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target
        .closest(&format!("[{COUNTER_ATTR}]"))
        .ok()
        .flatten()?;
    let number = button.get_attribute(COUNTER_ATTR)?.parse::<u8>().ok()?;
    CounterId::from_number(number)
}
