// src/constants.rs
//! Domain constants that define how the system talks to Notion and how it
//! shapes what comes back.

// ---------------------------------------------------------------------------
// Notion v3 API boundaries
// ---------------------------------------------------------------------------

/// Host serving the private `api/v3` surface.
pub const NOTION_BASE_URL: &str = "https://www.notion.so";

/// Path prefix every remote function lives under.
pub const RPC_PATH_PREFIX: &str = "api/v3";

/// Remote function returning one batch of a page's block tree.
pub const LOAD_PAGE_CHUNK: &str = "loadPageChunk";

/// Remote function resolving the rows behind a collection view.
pub const QUERY_COLLECTION: &str = "queryCollection";

/// Page fetched when the caller names none.
pub const DEFAULT_PAGE_ID: &str = "db45cd2e-7c69-4c34-93c9-7f2376ab184a";

/// Blocks requested per page chunk.
pub const PAGE_CHUNK_LIMIT: u32 = 100;

/// Rows requested per collection query.
pub const COLLECTION_QUERY_LIMIT: u32 = 70;

// ---------------------------------------------------------------------------
// Locale fallbacks
// ---------------------------------------------------------------------------

/// Locale used when `LANG` is unset.
pub const DEFAULT_USER_LOCALE: &str = "ko";

/// Time zone used when `TZ` is unset.
pub const DEFAULT_USER_TIME_ZONE: &str = "Asia/Seoul";

// ---------------------------------------------------------------------------
// Document shaping
// ---------------------------------------------------------------------------

/// Prefix of the proxied image URL; the encoded source is appended.
pub const IMAGE_PROXY_PREFIX: &str = "/image.js?url=";

/// Property id holding the value column of metadata tables.
///
/// Schema-specific and opaque: it names one column of one collection
/// schema, not a general concept.
pub const TABLE_VALUE_PROPERTY_ID: &str = "Agd&";

/// Property holding a block's rich-text title.
pub const TITLE_PROPERTY: &str = "title";
