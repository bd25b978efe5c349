//! Dev server for the paperdesk web frontend.
//!
//! Serves `web/` (index.html + wasm-bindgen output) and forwards the two
//! API calls to the processing backend.
//!
//! ## Usage
//! ```bash
//! cargo run --bin paperdesk-proxy -- --backend-url http://127.0.0.1:8000
//! ```

use paperdesk::{config, debug, proxy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    debug::init_once();

    let config = config::load()?;
    config.print_summary();

    let app = proxy::router(&config);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
