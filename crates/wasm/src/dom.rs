//! Small DOM helpers for the page around the canvas.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

/// Element ids the bridge writes into.
pub const TIMING_ID: &str = "numdot";
pub const SCORE_ID: &str = "scoreDisplay";
pub const GAME_OVER_ID: &str = "gameOverDisplay";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Milliseconds on the page's monotonic clock, or 0 without `performance`.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn element(id: &str) -> Option<HtmlElement> {
    let found = document()
        .ok()
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    if found.is_none() {
        log::warn!("element #{id} not found");
    }
    found
}

/// Replaces the text of element `id`. Missing elements are logged and skipped.
pub fn set_text(id: &str, text: &str) {
    if let Some(el) = element(id) {
        el.set_inner_text(text);
    }
}

/// Shows (`display: block`) or hides (`display: none`) element `id`.
pub fn set_visible(id: &str, visible: bool) {
    if let Some(el) = element(id) {
        let display = if visible { "block" } else { "none" };
        if let Err(e) = el.style().set_property("display", display) {
            log::warn!("could not set display on #{id}: {e:?}");
        }
    }
}

/// Converts any displayable error into a JS exception value.
pub fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
