// src/api/mod.rs
//! Notion v3 API interaction: named remote functions over JSON POST.
//!
//! The assembler depends on `NotionRpc`, never on HTTP details, so tests
//! swap the transport for an in-memory stub.

pub mod client;
pub mod requests;
pub mod responses;

use crate::constants::{LOAD_PAGE_CHUNK, QUERY_COLLECTION};
use crate::error::AppError;
use requests::{LoadPageChunk, QueryCollection};
use responses::{CollectionQueryResult, PageChunk};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The ability to invoke a named Notion remote function.
#[async_trait::async_trait]
pub trait NotionRpc: Send + Sync {
    /// Posts `body` to the remote function and returns its decoded JSON
    /// result. Non-2xx answers fail with `AppError::RemoteApi`.
    async fn call(&self, function: &str, body: &Value) -> Result<Value, AppError>;

    /// Fetches one batch of a page's block tree.
    async fn load_page_chunk(&self, request: &LoadPageChunk) -> Result<PageChunk, AppError> {
        let body = serde_json::to_value(request)?;
        let result = self.call(LOAD_PAGE_CHUNK, &body).await?;
        decode_result(LOAD_PAGE_CHUNK, result)
    }

    /// Resolves the rows behind one collection view.
    async fn query_collection(
        &self,
        request: &QueryCollection,
    ) -> Result<CollectionQueryResult, AppError> {
        let body = serde_json::to_value(request)?;
        let result = self.call(QUERY_COLLECTION, &body).await?;
        decode_result(QUERY_COLLECTION, result)
    }
}

#[async_trait::async_trait]
impl<'a, T: NotionRpc + ?Sized> NotionRpc for &'a T {
    async fn call(&self, function: &str, body: &Value) -> Result<Value, AppError> {
        (**self).call(function, body).await
    }

    async fn load_page_chunk(&self, request: &LoadPageChunk) -> Result<PageChunk, AppError> {
        (**self).load_page_chunk(request).await
    }

    async fn query_collection(
        &self,
        request: &QueryCollection,
    ) -> Result<CollectionQueryResult, AppError> {
        (**self).query_collection(request).await
    }
}

/// Decodes a remote function's JSON result into its typed shape.
fn decode_result<T: DeserializeOwned>(function: &str, result: Value) -> Result<T, AppError> {
    serde_json::from_value(result).map_err(|e| {
        log::error!("Failed to decode {} result: {}", function, e);
        AppError::MalformedResponse(format!("{} result: {}", function, e))
    })
}

// Re-export the public interface
pub use client::NotionHttpClient;
