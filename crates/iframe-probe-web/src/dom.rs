#![forbid(unsafe_code)]

//! Paint a [`View`] into the document.
//!
//! Each paint replaces the mount point's children wholesale. The page is a
//! few dozen nodes, so there is no diffing.

use iframe_probe_core::{Item, Section, View};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::error::MountError;

/// Attribute carrying the 1-based button number.
pub(crate) const COUNTER_ATTR: &str = "data-counter";

pub(crate) fn dom_err(err: JsValue) -> MountError {
    MountError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn element(document: &Document, tag: &str, class: &str) -> Result<Element, MountError> {
    let el = document.create_element(tag).map_err(dom_err)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

fn text_element(
    document: &Document,
    tag: &str,
    class: &str,
    text: &str,
) -> Result<Element, MountError> {
    let el = element(document, tag, class)?;
    el.set_text_content(Some(text));
    Ok(el)
}

fn append(parent: &Element, child: &Element) -> Result<(), MountError> {
    parent.append_child(child).map_err(dom_err)?;
    Ok(())
}

/// `data-counter` of the focused button inside `root`, if any.
fn focused_counter(document: &Document, root: &Element) -> Option<String> {
    let active = document.active_element()?;
    if !root.contains(Some(active.as_ref())) {
        return None;
    }
    active.get_attribute(COUNTER_ATTR)
}

fn restore_focus(root: &Element, number: &str) -> Result<(), MountError> {
    let selector = format!("[{COUNTER_ATTR}=\"{number}\"]");
    let Some(button) = root.query_selector(&selector).map_err(dom_err)? else {
        return Ok(());
    };
    if let Some(button) = button.dyn_ref::<HtmlElement>() {
        button.focus().map_err(dom_err)?;
    }
    Ok(())
}

/// Replace `root`'s children with the markup for `view`.
///
/// A focused test button keeps focus across the repaint, so repeated
/// keyboard activation keeps counting.
pub(crate) fn paint(document: &Document, root: &Element, view: &View) -> Result<(), MountError> {
    let main = element(document, "main", "tester")?;
    append(&main, &text_element(document, "h1", "tester-title", &view.title)?)?;

    let grid = element(document, "div", "tester-grid")?;
    for section in &view.sections {
        append(&grid, &section_element(document, section)?)?;
    }
    append(&main, &grid)?;

    if !view.footer.is_empty() {
        let footer = element(document, "footer", "tester-footer")?;
        for line in &view.footer {
            append(&footer, &text_element(document, "p", "", line)?)?;
        }
        append(&main, &footer)?;
    }

    let focused = focused_counter(document, root);
    root.set_text_content(None);
    append(root, &main)?;
    match focused {
        Some(number) => restore_focus(root, &number),
        None => Ok(()),
    }
}

fn section_element(document: &Document, section: &Section) -> Result<Element, MountError> {
    let el = element(document, "section", "tester-section")?;
    append(&el, &text_element(document, "h2", "", &section.heading)?)?;

    let list = element(document, "ul", "tester-fields")?;
    let mut notes = Vec::new();
    for item in &section.items {
        match item {
            Item::Note(text) => notes.push(text),
            _ => append(&list, &item_element(document, item)?)?,
        }
    }
    append(&el, &list)?;
    // Notes follow the field list.
    for text in notes {
        append(&el, &text_element(document, "p", "tester-note", text)?)?;
    }
    Ok(el)
}

fn labelled(document: &Document, label: &str) -> Result<Element, MountError> {
    let li = element(document, "li", "")?;
    append(&li, &text_element(document, "strong", "", &format!("{label}:"))?)?;
    Ok(li)
}

fn item_element(document: &Document, item: &Item) -> Result<Element, MountError> {
    match item {
        Item::Indicator { label, value } => {
            let li = labelled(document, label)?;
            let class = item.tone().map(|t| t.css_class()).unwrap_or_default();
            let text = if *value { " Yes" } else { " No" };
            append(&li, &text_element(document, "span", class, text)?)?;
            Ok(li)
        }
        Item::Field { label, value } => {
            let li = labelled(document, label)?;
            append(&li, &text_element(document, "span", "", &format!(" {value}"))?)?;
            Ok(li)
        }
        Item::Button { counter, .. } => {
            let li = element(document, "li", "")?;
            let button = text_element(document, "button", "tester-button", &item.text_line())?;
            button.set_attribute("type", "button").map_err(dom_err)?;
            button
                .set_attribute(COUNTER_ATTR, &counter.number().to_string())
                .map_err(dom_err)?;
            append(&li, &button)?;
            Ok(li)
        }
        Item::Note(text) => text_element(document, "li", "tester-note", text),
    }
}
