//! Shared JS value helpers for the wasm bridge modules.

use wasm_bindgen::JsValue;

/// Extracts a readable message from a rejected promise or thrown JS value.
pub fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}
