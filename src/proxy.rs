//! Dev proxy for the web frontend.
//!
//! Serves the static page (index.html + wasm-bindgen output) and forwards
//! the two API calls to the processing backend, so the browser only ever
//! talks to one origin.
//!
//! ## Endpoints
//! - GET /health - Health check
//! - POST /api/condense - forwarded verbatim
//! - POST /api/parse_markdown_tables - forwarded verbatim
//! - everything else - static files

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::{CONDENSE_PATH, PARSE_TABLES_PATH};
use crate::config::ProxyConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct ProxyState {
    backend_url: String,
    client: reqwest::Client,
}

impl ProxyState {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

pub fn router(config: &ProxyConfig) -> Router {
    // Dev server: any origin may call it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route(CONDENSE_PATH, post(forward_handler))
        .route(PARSE_TABLES_PATH, post(forward_handler))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .with_state(ProxyState::new(config.backend_url.clone()))
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Forward a JSON POST to the backend and relay status and body unchanged,
/// so the page sees backend errors exactly as the backend reported them.
async fn forward_handler(State(state): State<ProxyState>, uri: Uri, body: String) -> Response {
    let url = format!("{}{}", state.backend_url, uri.path());
    log::debug!("Forwarding {} ({} bytes)", uri.path(), body.len());

    let upstream = match state
        .client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            log::error!("Backend request to {} failed: {}", url, e);
            return (StatusCode::BAD_GATEWAY, format!("backend unreachable: {e}")).into_response();
        }
    };

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| HeaderValue::from_bytes(v.as_bytes()).ok());

    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Failed to read backend response from {}: {}", url, e);
            return (StatusCode::BAD_GATEWAY, format!("backend read failed: {e}")).into_response();
        }
    };

    if !status.is_success() {
        log::warn!("Backend {} answered {}", uri.path(), status);
    }

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    if let Some(ct) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, ct);
    }
    response
}
