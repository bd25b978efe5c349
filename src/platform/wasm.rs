use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::Clipboard;
use crate::error::ClipboardError;

#[wasm_bindgen]
extern "C" {
    // Optional page-provided bridge (webview hosts that gate the clipboard).
    // `catch` prevents a panic when the function is missing.
    #[wasm_bindgen(js_namespace = window, js_name = __copy_text, catch)]
    fn __copy_text_js(s: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Browser clipboard: the `window.__copy_text` bridge when the page defines
/// one, otherwise `navigator.clipboard.writeText`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserClipboard;

#[async_trait(?Send)]
impl Clipboard for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        // 1) Preferred: bridge present.
        if let Ok(promise) = __copy_text_js(text) {
            return JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| ClipboardError::Rejected(js_error_text(&e)));
        }

        // 2) Fallback: plain web clipboard (secure contexts only).
        let Some(win) = web_sys::window() else {
            return Err(ClipboardError::Unavailable);
        };
        let navigator = win.navigator();
        let has_clipboard =
            js_sys::Reflect::has(&navigator, &JsValue::from_str("clipboard")).unwrap_or(false);
        if !has_clipboard {
            return Err(ClipboardError::Unavailable);
        }

        JsFuture::from(navigator.clipboard().write_text(text))
            .await
            .map(|_| ())
            .map_err(|e| ClipboardError::Rejected(js_error_text(&e)))
    }
}

fn js_error_text(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}
