//! Filterable debug logging.
//!
//! Categories: UI, NET, COPY, RENDER
//! Enable via: ?pddebug=all or localStorage.setItem('paperdesk.debug','ui,net')
//! Native: PAPERDESK_DEBUG=copy,render

use std::sync::atomic::{AtomicU32, Ordering};

pub mod cat {
    pub const UI: u32 = 1 << 0;
    pub const NET: u32 = 1 << 1;
    pub const COPY: u32 = 1 << 2;
    pub const RENDER: u32 = 1 << 3;
    pub const ALL: u32 = 0xffff_ffff;
}

static MASK: AtomicU32 = AtomicU32::new(0);

#[inline]
pub fn mask() -> u32 {
    MASK.load(Ordering::Relaxed)
}

#[inline]
pub fn set(mask: u32) {
    MASK.store(mask, Ordering::Relaxed)
}

#[inline]
pub fn is(cat: u32) -> bool {
    (MASK.load(Ordering::Relaxed) & cat) != 0
}

#[inline]
pub fn cat_name(cat: u32) -> &'static str {
    match cat {
        c if c == cat::UI => "ui",
        c if c == cat::NET => "net",
        c if c == cat::COPY => "copy",
        c if c == cat::RENDER => "render",
        _ => "misc",
    }
}

/// Parse a comma-separated category list into a mask.
pub fn parse_list(list: &str) -> u32 {
    let mut m: u32 = 0;
    for tok in list.split(',').map(|s| s.trim().to_ascii_lowercase()) {
        match tok.as_str() {
            "" | "none" => m = 0,
            "all" => m = cat::ALL,
            "ui" => m |= cat::UI,
            "net" => m |= cat::NET,
            "copy" => m |= cat::COPY,
            "render" => m |= cat::RENDER,
            _ => {}
        }
    }
    m
}

#[inline]
pub fn set_from_list(list: &str) {
    set(parse_list(list));
}

#[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
pub fn init_once() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        use web_sys::window;
        let Some(win) = window() else { return };

        // localStorage first so the URL can override it for one visit.
        if let Ok(Some(storage)) = win.local_storage() {
            if let Ok(Some(v)) = storage.get_item("paperdesk.debug") {
                set_from_list(&v);
            }
        }
        if let Ok(search) = win.location().search() {
            if let Some(v) = crate::config::query_param(&search, "pddebug") {
                set_from_list(&v);
            }
        }
        log(cat::UI, "debug init (wasm) complete");
    });
}

#[cfg(not(all(target_arch = "wasm32", feature = "dom-web")))]
pub fn init_once() {
    if let Ok(v) = std::env::var("PAPERDESK_DEBUG") {
        set_from_list(&v);
    }
}

#[inline]
pub fn log(cat: u32, msg: impl AsRef<str>) {
    if !is(cat) {
        return;
    }
    log::debug!("[paperdesk][{}] {}", cat_name(cat), msg.as_ref());
}
