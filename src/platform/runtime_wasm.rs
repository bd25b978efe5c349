use std::sync::Once;
use std::time::Duration;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;

use super::Timer;

/// `setTimeout`-backed sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = duration.as_millis().min(u32::MAX as u128) as u32;
        TimeoutFuture::new(millis).await;
    }
}

static INIT: Once = Once::new();

/// Route `log` to the browser console and panics to `console.error`.
pub fn init_logging(level: log::Level) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(level));
    });
}
