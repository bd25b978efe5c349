use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::controller::DEFAULT_COPY_FEEDBACK;

/// Browser-side settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Origin the `/api/*` paths are joined onto.
    pub api_base: String,
    pub copy_feedback: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:3030".to_string(),
            copy_feedback: DEFAULT_COPY_FEEDBACK,
        }
    }
}

impl UiConfig {
    /// Build from the page location: API calls go to the page's own origin
    /// unless `?api=<url>` points somewhere else.
    pub fn from_location(origin: &str, search: &str) -> Self {
        let api_base = query_param(search, "api")
            .filter(|url| validate_url(url, "api").is_ok())
            .unwrap_or_else(|| origin.to_string());
        Self {
            api_base,
            ..Self::default()
        }
    }

    /// Like `from_location`, but a missing origin (`""` or `"null"` on
    /// file:// pages) falls back to the default base. `?api=` still wins.
    pub fn from_parts(origin: &str, search: &str) -> Self {
        if origin.is_empty() || origin == "null" {
            let fallback = Self::default().api_base;
            log::warn!("[config] page has no origin, falling back to {fallback}");
            return Self::from_location(&fallback, search);
        }
        Self::from_location(origin, search)
    }

    #[cfg(all(target_arch = "wasm32", feature = "dom-web"))]
    pub fn from_window() -> Self {
        let Some(win) = web_sys::window() else {
            return Self::default();
        };
        let location = win.location();
        let origin = location.origin().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        Self::from_parts(&origin, &search)
    }
}

/// First value of `key` in a `?a=b&c=d` query string, URL-decoded.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|part| {
            let mut it = part.splitn(2, '=');
            Some((it.next()?, it.next().unwrap_or_default()))
        })
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, v)| urlencoding::decode(v).ok().map(|s| s.into_owned()))
}

/// Validate URL format (basic check)
pub fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Validate that a value is within a given range (inclusive)
#[cfg_attr(not(feature = "proxy"), allow(dead_code))]
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

#[cfg(feature = "proxy")]
pub use proxy_config::{load, ProxyArgs, ProxyConfig};

#[cfg(feature = "proxy")]
mod proxy_config {
    use std::path::PathBuf;

    use anyhow::Result;
    use clap::Parser;

    use super::{validate_in_range, validate_url};

    pub const DEFAULT_PORT: u16 = 3030;
    pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
    pub const DEFAULT_STATIC_DIR: &str = "web";

    /// paperdesk dev proxy
    ///
    /// Serves the web page and forwards /api/* to the processing backend.
    /// Configuration priority: CLI args > Environment variables > Defaults
    #[derive(Parser, Debug)]
    #[command(name = "paperdesk-proxy")]
    #[command(version = env!("CARGO_PKG_VERSION"))]
    #[command(about = "Serve the paperdesk page and proxy its API calls", long_about = None)]
    pub struct ProxyArgs {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        pub port: Option<u16>,

        /// Base URL of the processing backend (condense / table parsing)
        #[arg(long, env = "BACKEND_URL")]
        pub backend_url: Option<String>,

        /// Directory holding index.html and the wasm-bindgen output
        #[arg(long, env = "STATIC_DIR")]
        pub static_dir: Option<PathBuf>,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ProxyConfig {
        pub port: u16,
        pub backend_url: String,
        pub static_dir: PathBuf,
    }

    impl ProxyConfig {
        pub fn from_args(args: ProxyArgs) -> Result<Self> {
            let port = validate_in_range(args.port.unwrap_or(DEFAULT_PORT), 1, u16::MAX, "PORT")?;

            let backend_url = args
                .backend_url
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
            validate_url(&backend_url, "BACKEND_URL")?;

            Ok(Self {
                port,
                backend_url: backend_url.trim_end_matches('/').to_string(),
                static_dir: args
                    .static_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            })
        }

        pub fn print_summary(&self) {
            log::info!("paperdesk proxy configuration:");
            log::info!("  Port: {}", self.port);
            log::info!("  Backend: {}", self.backend_url);
            log::info!("  Static dir: {}", self.static_dir.display());
        }
    }

    /// Load configuration from CLI args and environment variables
    pub fn load() -> Result<ProxyConfig> {
        ProxyConfig::from_args(ProxyArgs::parse())
    }
}
