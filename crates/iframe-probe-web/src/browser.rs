#![forbid(unsafe_code)]

//! [`BrowsingContext`] over the real `window`.

use iframe_probe_core::{BrowsingContext, EmbedderLocation, ProbeError};
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Navigator, Window};

pub(crate) struct WebBrowsingContext {
    window: Window,
    navigator: Navigator,
}

impl WebBrowsingContext {
    pub(crate) fn new(window: Window) -> Self {
        let navigator = window.navigator();
        Self { window, navigator }
    }
}

/// Read `target[name]`, treating `undefined`/`null` and throwing getters as absent.
fn read_prop(target: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn as_dimension(value: JsValue) -> Option<i32> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i32)
}

/// Describe a thrown JS value (usually a `SecurityError` DOMException).
fn describe_js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn denied(err: JsValue) -> ProbeError {
    ProbeError::cross_origin(describe_js_error(&err))
}

impl BrowsingContext for WebBrowsingContext {
    fn is_nested(&self) -> bool {
        // Identity comparison of WindowProxy references is allowed across origins.
        match self.window.top() {
            Ok(Some(top)) => !Object::is(self.window.as_ref(), top.as_ref()),
            _ => false,
        }
    }

    fn inner_width(&self) -> Option<i32> {
        self.window.inner_width().ok().and_then(as_dimension)
    }

    fn inner_height(&self) -> Option<i32> {
        self.window.inner_height().ok().and_then(as_dimension)
    }

    fn outer_width(&self) -> Option<i32> {
        self.window.outer_width().ok().and_then(as_dimension)
    }

    fn outer_height(&self) -> Option<i32> {
        self.window.outer_height().ok().and_then(as_dimension)
    }

    fn screen_width(&self) -> Option<i32> {
        self.window.screen().ok()?.width().ok()
    }

    fn screen_height(&self) -> Option<i32> {
        self.window.screen().ok()?.height().ok()
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        Some(self.window.device_pixel_ratio())
    }

    fn is_secure_context(&self) -> Option<bool> {
        Some(self.window.is_secure_context())
    }

    fn origin(&self) -> Option<String> {
        Some(self.window.origin())
    }

    fn user_agent(&self) -> Option<String> {
        self.navigator.user_agent().ok()
    }

    fn language(&self) -> Option<String> {
        self.navigator.language()
    }

    fn languages(&self) -> Option<Vec<String>> {
        let languages: Array = self.navigator.languages();
        Some(languages.iter().filter_map(|v| v.as_string()).collect())
    }

    fn platform(&self) -> Option<String> {
        self.navigator.platform().ok()
    }

    fn cookie_enabled(&self) -> Option<bool> {
        read_prop(self.navigator.as_ref(), "cookieEnabled").and_then(|v| v.as_bool())
    }

    fn referrer(&self) -> String {
        self.window
            .document()
            .map(|document| document.referrer())
            .unwrap_or_default()
    }

    fn read_embedder(&self) -> Result<EmbedderLocation, ProbeError> {
        let parent = self
            .window
            .parent()
            .map_err(denied)?
            .ok_or_else(|| ProbeError::cross_origin("parent window unavailable"))?;
        let parent: &JsValue = parent.as_ref();

        // Either getter throws a SecurityError for a cross-origin parent.
        let origin = Reflect::get(parent, &JsValue::from_str("origin")).map_err(denied)?;
        let location = Reflect::get(parent, &JsValue::from_str("location")).map_err(denied)?;
        let href = Reflect::get(&location, &JsValue::from_str("href")).map_err(denied)?;

        match (origin.as_string(), href.as_string()) {
            (Some(origin), Some(href)) => Ok(EmbedderLocation { origin, href }),
            _ => Err(ProbeError::cross_origin(
                "parent origin/location not readable as strings",
            )),
        }
    }
}
