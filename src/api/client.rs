// src/api/client.rs
//! Thin reqwest wrapper for Notion's `api/v3` remote functions.
//!
//! One attempt per call: no retries, no timeout, no backoff.

use crate::config::with_trailing_slash;
use crate::constants::RPC_PATH_PREFIX;
use crate::error::AppError;
use indexmap::IndexMap;
use reqwest::{header, Client, Response};
use serde_json::Value;
use url::Url;

/// A thin wrapper around reqwest Client for Notion v3 requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: Url,
}

impl NotionHttpClient {
    /// Creates a client posting to `{base_url}/api/v3/...`.
    pub fn new(base_url: Url) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Full URL of a remote function.
    pub fn endpoint(&self, function: &str) -> Result<Url, AppError> {
        Ok(self
            .base_url
            .join(&format!("{}/{}", RPC_PATH_PREFIX, function))?)
    }
}

#[async_trait::async_trait]
impl super::NotionRpc for NotionHttpClient {
    async fn call(&self, function: &str, body: &Value) -> Result<Value, AppError> {
        let url = self.endpoint(function)?;
        log::debug!("POST {}", url);

        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        log::debug!("{} answered {}", function, status);

        if status.is_success() {
            let text = response.text().await?;
            parse_result_body(function, &text)
        } else {
            Err(remote_api_error(response).await)
        }
    }
}

fn parse_result_body(function: &str, body: &str) -> Result<Value, AppError> {
    serde_json::from_str(body).map_err(|e| {
        let preview = if body.len() > 200 {
            format!("{}...", body.chars().take(200).collect::<String>())
        } else {
            body.to_string()
        };
        log::error!("{} returned invalid JSON: {}", function, e);
        AppError::MalformedResponse(format!("{}: {}\nBody: {}", function, e, preview))
    })
}

/// Builds the error for a non-2xx answer.
///
/// The body is read last and best-effort: a failed read leaves `body`
/// empty rather than replacing the status error.
async fn remote_api_error(response: Response) -> AppError {
    let status = response.status();
    let headers = serialize_headers(response.headers());
    let body = response.text().await.ok();

    log::warn!("Notion API error ({}) from {}", status.as_u16(), headers);

    AppError::RemoteApi {
        status,
        headers,
        body,
    }
}

/// Serializes headers as `{name: [values...]}`, repeated names grouped.
pub fn serialize_headers(headers: &header::HeaderMap) -> String {
    let mut grouped: IndexMap<&str, Vec<String>> = IndexMap::new();
    for (name, value) in headers {
        grouped
            .entry(name.as_str())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    serde_json::to_string(&grouped).unwrap_or_else(|_| "{}".to_string())
}
