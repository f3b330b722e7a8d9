// src/api/requests.rs
//! Request bodies for the two remote functions the assembler calls.
//!
//! Defaults live here; callers override individual fields through the
//! `*Overrides` structs, which are merged shallowly over the defaults.

use crate::config::Locale;
use crate::constants::{COLLECTION_QUERY_LIMIT, DEFAULT_PAGE_ID, PAGE_CHUNK_LIMIT};
use crate::types::{CollectionId, CollectionViewId, PageId};
use serde::Serialize;
use serde_json::Value;

/// Pagination cursor; always an empty stack for the first chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cursor {
    pub stack: Vec<Value>,
}

/// Body of `loadPageChunk`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPageChunk {
    pub page_id: PageId,
    pub limit: u32,
    pub cursor: Cursor,
    pub chunk_number: u32,
    pub vertical_columns: bool,
}

impl LoadPageChunk {
    pub fn new(page_id: PageId) -> Self {
        Self {
            page_id,
            limit: PAGE_CHUNK_LIMIT,
            cursor: Cursor::default(),
            chunk_number: 0,
            vertical_columns: false,
        }
    }
}

impl Default for LoadPageChunk {
    fn default() -> Self {
        Self::new(PageId::from_raw(DEFAULT_PAGE_ID))
    }
}

/// Loader section of `queryCollection`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loader {
    pub limit: u32,
    pub load_content_cover: bool,
    #[serde(rename = "type")]
    pub view_type: String,
    pub user_locale: String,
    pub user_time_zone: String,
}

impl Loader {
    pub fn new(locale: &Locale) -> Self {
        Self {
            limit: COLLECTION_QUERY_LIMIT,
            load_content_cover: true,
            view_type: "table".to_string(),
            user_locale: locale.user_locale.clone(),
            user_time_zone: locale.user_time_zone.clone(),
        }
    }
}

/// One aggregation requested alongside the rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub aggregation_type: String,
    pub id: String,
    pub property: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub view_type: String,
}

impl Aggregation {
    /// Row count over the title column of a table view.
    pub fn count_by_title() -> Self {
        Self {
            aggregation_type: "count".to_string(),
            id: "count".to_string(),
            property: "title".to_string(),
            property_type: "title".to_string(),
            view_type: "table".to_string(),
        }
    }
}

/// Query section of `queryCollection`. Field names are snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub aggregate: Vec<Aggregation>,
    pub filter: Vec<Value>,
    pub filter_operator: String,
    pub sort: Vec<Value>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            aggregate: vec![Aggregation::count_by_title()],
            filter: Vec::new(),
            filter_operator: "and".to_string(),
            sort: Vec::new(),
        }
    }
}

/// Caller-supplied loader fields; `Some` wins over the default.
#[derive(Debug, Clone, Default)]
pub struct LoaderOverrides {
    pub limit: Option<u32>,
    pub load_content_cover: Option<bool>,
    pub view_type: Option<String>,
    pub user_locale: Option<String>,
    pub user_time_zone: Option<String>,
}

impl LoaderOverrides {
    fn apply(self, loader: &mut Loader) {
        if let Some(limit) = self.limit {
            loader.limit = limit;
        }
        if let Some(load_content_cover) = self.load_content_cover {
            loader.load_content_cover = load_content_cover;
        }
        if let Some(view_type) = self.view_type {
            loader.view_type = view_type;
        }
        if let Some(user_locale) = self.user_locale {
            loader.user_locale = user_locale;
        }
        if let Some(user_time_zone) = self.user_time_zone {
            loader.user_time_zone = user_time_zone;
        }
    }
}

/// Caller-supplied query fields; `Some` wins over the default.
#[derive(Debug, Clone, Default)]
pub struct QueryOverrides {
    pub aggregate: Option<Vec<Aggregation>>,
    pub filter: Option<Vec<Value>>,
    pub filter_operator: Option<String>,
    pub sort: Option<Vec<Value>>,
}

impl QueryOverrides {
    fn apply(self, query: &mut Query) {
        if let Some(aggregate) = self.aggregate {
            query.aggregate = aggregate;
        }
        if let Some(filter) = self.filter {
            query.filter = filter;
        }
        if let Some(filter_operator) = self.filter_operator {
            query.filter_operator = filter_operator;
        }
        if let Some(sort) = self.sort {
            query.sort = sort;
        }
    }
}

/// Body of `queryCollection`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCollection {
    pub collection_id: CollectionId,
    pub collection_view_id: CollectionViewId,
    pub loader: Loader,
    pub query: Query,
}

impl QueryCollection {
    pub fn new(
        collection_id: CollectionId,
        collection_view_id: CollectionViewId,
        locale: &Locale,
    ) -> Self {
        Self {
            collection_id,
            collection_view_id,
            loader: Loader::new(locale),
            query: Query::default(),
        }
    }

    pub fn with_loader(mut self, overrides: LoaderOverrides) -> Self {
        overrides.apply(&mut self.loader);
        self
    }

    pub fn with_query(mut self, overrides: QueryOverrides) -> Self {
        overrides.apply(&mut self.query);
        self
    }
}
