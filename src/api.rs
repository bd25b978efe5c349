//! Backend client for the condense and table-parsing endpoints.
//!
//! Both calls are JSON POSTs. Any non-2xx answer becomes
//! [`ApiError::Status`] with the body text attached so the UI can show it.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::types::{CondenseRequest, CondenseResult, ParseTablesRequest, ParseTablesResult};

pub const CONDENSE_PATH: &str = "/api/condense";
pub const PARSE_TABLES_PATH: &str = "/api/parse_markdown_tables";

/// The two operations the UI needs from the backend.
///
/// Futures are `?Send`: in the browser everything runs on one thread.
#[async_trait(?Send)]
pub trait Backend {
    async fn condense(&self, text: &str) -> Result<CondenseResult, ApiError>;
    async fn parse_tables(&self, markdown: &str) -> Result<ParseTablesResult, ApiError>;
}

/// reqwest-backed client. On wasm32 reqwest goes through the browser's
/// fetch, so the same code serves both targets.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// POST `body` as JSON to `path` and decode the JSON answer.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        crate::debug::log(crate::debug::cat::NET, format!("POST {url}"));

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[api] {} returned {}", path, status.as_u16());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn condense(&self, text: &str) -> Result<CondenseResult, ApiError> {
        self.post_json(
            CONDENSE_PATH,
            &CondenseRequest {
                text: text.to_string(),
            },
        )
        .await
    }

    async fn parse_tables(&self, markdown: &str) -> Result<ParseTablesResult, ApiError> {
        self.post_json(
            PARSE_TABLES_PATH,
            &ParseTablesRequest {
                markdown: markdown.to_string(),
            },
        )
        .await
    }
}
