//! paperdesk - article condenser and markdown table viewer
//!
//! Browser UI that sends article text to a backend "condense" endpoint and
//! markdown to a "parse tables" endpoint, then shows the results with
//! copy-to-clipboard buttons. The processing itself lives in the backend.
//!
//! ## Architecture
//!
//! - **Core** (all targets): wire types, backend client, rendering to a
//!   virtual node tree, and the [`Controller`] holding every click handler.
//! - **Web** (`dom-web`, wasm32): DOM view, clipboard and timers via web-sys.
//! - **Proxy** (`proxy`, native): axum dev server serving the page and
//!   forwarding `/api/*` to the backend.
//!
//! ## Usage
//!
//! ```bash
//! cargo build --target wasm32-unknown-unknown --no-default-features --features dom-web --bin paperdesk-web-dom
//! wasm-bindgen --target web --out-dir web/pkg target/wasm32-unknown-unknown/debug/paperdesk-web-dom.wasm
//! cargo run --bin paperdesk-proxy -- --backend-url http://127.0.0.1:8000
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod debug;
pub mod error;
pub mod render;
pub mod types;
pub mod view;

// Platform abstraction layer
pub mod platform;

#[cfg(feature = "proxy")]
pub mod proxy;

pub use api::{Backend, HttpBackend};
pub use config::UiConfig;
pub use controller::Controller;
pub use error::{ApiError, ClipboardError};
pub use types::{CondenseResult, ParseTablesResult, Table};
