//! Platform abstraction (clipboard, timers, DOM binding).
//!
//! The traits are available everywhere; the browser implementations only
//! build for wasm32 with the `dom-web` feature.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ClipboardError;

#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
mod wasm;
#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
pub use wasm::BrowserClipboard;

#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
mod runtime_wasm;
#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
pub use runtime_wasm::{init_logging, GlooTimer};

#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
pub mod dom;

#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
mod mount;
#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
pub use mount::mount;

/// System clipboard write.
#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Single-threaded sleep, used to revert copy feedback.
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}
