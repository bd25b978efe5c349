#![cfg_attr(target_arch = "wasm32", no_main)]

// DOM frontend for paperdesk.
//
// Page side:
//   <script type="module">
//     import init from "./pkg/paperdesk-web-dom.js";
//     init();
//   </script>
//
// The start hook finds the page's elements by id and wires every button.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_start() {
    paperdesk::platform::init_logging(log::Level::Debug);
    paperdesk::debug::init_once();

    let config = paperdesk::UiConfig::from_window();
    match paperdesk::platform::mount(config) {
        Ok(_) => log::info!("[paperdesk] mounted"),
        Err(e) => log::error!("[paperdesk] mount failed: {e:?}"),
    }
}

// Native builds: just provide a stub main so `cargo build --all-features` doesn't explode.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("paperdesk-web-dom is only supported on wasm32 (browser) target.");
}
