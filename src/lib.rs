// src/lib.rs
//! notion2sections fetches a Notion page through the private v3 API and
//! flattens it into sections of typed children plus a metadata table.
//!
//! # Public API
//!
//! - **Entry points**: `get_notion_data`, `get_notion_data_with`
//! - **Assembly**: `DocumentAssembler`, `AssemblyReport`, `normalize_key`
//! - **Document model**: `Document`, `Section`, `Child`, `TableRows`
//! - **API client**: `NotionRpc`, `NotionHttpClient`, request/response types
//! - **Configuration**: `ClientConfig`, `Locale`
//! - **Error handling**: `AppError`, `ValidationError`

mod api;
mod assembler;
mod config;
mod constants;
mod error;
mod model;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{ClientConfig, CommandLineInput, Locale, RunConfig};
pub use crate::constants::DEFAULT_PAGE_ID;

// --- Domain Model ---
pub use crate::model::{Block, BlockKind, Child, Document, Section, TableRows};

// --- Domain Types ---
pub use crate::types::{BlockId, CollectionId, CollectionViewId, PageId, RichText};

// --- API Client ---
pub use crate::api::{
    client::serialize_headers,
    requests::{
        Aggregation, Cursor, LoadPageChunk, Loader, LoaderOverrides, Query, QueryCollection,
        QueryOverrides,
    },
    responses::{BlockRecord, BlockValue, CollectionQueryResult, PageChunk, RecordMap},
    NotionHttpClient, NotionRpc,
};

// --- Assembly ---
pub use crate::assembler::{table::normalize_key, AssemblyReport, DocumentAssembler};

/// Fetches a page from notion.so and flattens it into a `Document`.
///
/// `None` fetches the built-in default page. Locale and time zone come
/// from `LANG`/`TZ`, read once here.
pub async fn get_notion_data(page_id: Option<&PageId>) -> Result<Document> {
    let config = ClientConfig::from_env();
    let client = NotionHttpClient::new(config.base_url.clone())?;
    get_notion_data_with(client, config, page_id).await
}

/// Same as [`get_notion_data`] over any transport and configuration.
pub async fn get_notion_data_with<R: NotionRpc>(
    rpc: R,
    config: ClientConfig,
    page_id: Option<&PageId>,
) -> Result<Document> {
    let default_page;
    let page_id = match page_id {
        Some(id) => id,
        None => {
            default_page = PageId::parse(DEFAULT_PAGE_ID)?;
            &default_page
        }
    };

    DocumentAssembler::new(rpc, config).assemble(page_id).await
}
