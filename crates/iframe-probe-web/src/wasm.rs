#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for [`IframeProbe`].
//!
//! Wraps [`super::session::ProbeSession`] with the DOM: paints frames into
//! the mount point and turns DOM events into [`PageEvent`]s. Only compiled on
//! `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use iframe_probe_core::{PageEvent, ProbeConfig};
use js_sys::Array;
use tracing::{debug, error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, PageTransitionEvent};

use super::browser::WebBrowsingContext;
use super::console::{install_logging, install_panic_hook};
use super::dom::paint;
use super::error::MountError;
use super::listeners::{ClickDelegate, HoverSubscription, Listener};
use super::session::{ProbeSession, pagehide_ends_page};

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// State reachable from event callbacks.
struct Mounted {
    session: ProbeSession,
    document: Document,
    root: Element,
}

fn dispatch(mounted: &Rc<RefCell<Mounted>>, event: PageEvent) {
    let Ok(mut guard) = mounted.try_borrow_mut() else {
        warn!(?event, "dropping re-entrant page event");
        return;
    };
    let Mounted {
        session,
        document,
        root,
    } = &mut *guard;
    if let Some(rendered) = session.dispatch(event)
        && let Err(err) = paint(document, root, &rendered.view)
    {
        error!(error = %err, frame = rendered.frame_idx, "repaint failed");
    }
}

/// Hover pair and click delegate, released together.
struct Subscriptions {
    _hover: HoverSubscription,
    _clicks: ClickDelegate,
}

type SharedSubscriptions = Rc<RefCell<Option<Subscriptions>>>;

/// Release the subscriptions when the page is really unloading.
///
/// A `pagehide` with `persisted == true` means the page is entering the
/// back/forward cache and may be shown again, so nothing is released.
fn on_pagehide(subscriptions: &SharedSubscriptions, event: &Event) {
    let persisted = event
        .dyn_ref::<PageTransitionEvent>()
        .is_some_and(PageTransitionEvent::persisted);
    if !pagehide_ends_page(persisted) {
        debug!("pagehide into back/forward cache; keeping listeners");
        return;
    }
    let Ok(mut slot) = subscriptions.try_borrow_mut() else {
        warn!("subscriptions busy during pagehide");
        return;
    };
    if slot.take().is_some() {
        debug!("page unloading; listeners released");
    }
}

fn options_json(options: &JsValue) -> Result<String, MountError> {
    if options.is_undefined() || options.is_null() {
        return Ok(String::new());
    }
    js_sys::JSON::stringify(options)
        .map(String::from)
        .map_err(super::dom::dom_err)
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

/// A mounted iframe behavior tester.
///
/// The environment snapshot is taken once in [`mount`](Self::mount); reload
/// the page to refresh it. The listeners are released on a final `pagehide`
/// (not on entry into the back/forward cache), by [`destroy`](Self::destroy),
/// or when the handle is dropped.
#[wasm_bindgen]
pub struct IframeProbe {
    mounted: Rc<RefCell<Mounted>>,
    subscriptions: SharedSubscriptions,
    pagehide: Option<Listener>,
}

#[wasm_bindgen]
impl IframeProbe {
    /// Snapshot the environment, paint the view, and start listening.
    ///
    /// `options` is an optional object with `title`, `mountId`, `footer`, and
    /// `logLevel`. Throws on invalid options or a missing document.
    pub fn mount(options: JsValue) -> Result<IframeProbe, JsValue> {
        install_panic_hook();
        let config = ProbeConfig::from_json(&options_json(&options)?).map_err(MountError::from)?;
        install_logging(config.tracing_level().map_err(MountError::from)?);

        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let document_element = document.document_element().ok_or(MountError::NoDocument)?;
        let root = document
            .get_element_by_id(&config.mount_id)
            .or_else(|| document.body().map(Element::from))
            .ok_or_else(|| MountError::NoMountPoint(config.mount_id.clone()))?;

        // Load sequence completes before any listener exists.
        let window_target = window.clone();
        let mut session = ProbeSession::start(&WebBrowsingContext::new(window), config);
        paint(&document, &root, &session.first_frame().view)?;

        let mounted = Rc::new(RefCell::new(Mounted {
            session,
            document,
            root: root.clone(),
        }));

        let hover = HoverSubscription::attach(&document_element, {
            let mounted = Rc::clone(&mounted);
            move |signal| dispatch(&mounted, signal.into())
        })?;
        let clicks = ClickDelegate::attach(&root, {
            let mounted = Rc::clone(&mounted);
            move |id| dispatch(&mounted, PageEvent::Activate(id))
        })?;

        let subscriptions = Rc::new(RefCell::new(Some(Subscriptions {
            _hover: hover,
            _clicks: clicks,
        })));
        let pagehide = Listener::attach(&window_target, "pagehide", {
            let subscriptions = Rc::clone(&subscriptions);
            move |event: Event| on_pagehide(&subscriptions, &event)
        })?;

        Ok(Self {
            mounted,
            subscriptions,
            pagehide: Some(pagehide),
        })
    }

    /// Plain-text rendering of the current state.
    #[wasm_bindgen(js_name = textReport)]
    pub fn text_report(&self) -> String {
        self.mounted.borrow().session.text_report()
    }

    /// Current state as pretty-printed JSON.
    #[wasm_bindgen(js_name = reportJson)]
    pub fn report_json(&self) -> Result<String, JsValue> {
        self.mounted
            .borrow()
            .session
            .report_json()
            .map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))
    }

    #[wasm_bindgen(js_name = isEmbedded)]
    pub fn is_embedded(&self) -> bool {
        self.mounted.borrow().session.is_embedded()
    }

    #[wasm_bindgen(js_name = isHovering)]
    pub fn is_hovering(&self) -> bool {
        self.mounted.borrow().session.is_hovering()
    }

    /// Click counts for buttons 1..3. Returns `Array<number>`.
    pub fn counters(&self) -> Array {
        let arr = Array::new();
        for count in self.mounted.borrow().session.counters() {
            arr.push(&JsValue::from_f64(count as f64));
        }
        arr
    }

    /// Number of frames painted so far.
    #[wasm_bindgen(js_name = frameIdx)]
    pub fn frame_idx(&self) -> f64 {
        self.mounted.borrow().session.frame_idx() as f64
    }

    /// Whether the listeners are still attached.
    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.subscriptions.borrow().is_some()
    }

    /// Release every listener and clear the mount point.
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        self.pagehide.take();
        if self.subscriptions.borrow_mut().take().is_some() {
            self.mounted.borrow().root.set_text_content(None);
        }
    }
}
