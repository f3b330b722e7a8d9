// src/api/responses.rs
//! Shapes of the v3 results the assembler reads.
//!
//! Envelopes are typed; block values stay raw JSON and are read through
//! accessors, so a block of an ignored type never fails decoding. Block maps are `IndexMap`s because the
//! service's key order decides where sections begin.

use crate::error::AppError;
use crate::types::{BlockId, CollectionId, CollectionViewId, RichText};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Result of `loadPageChunk`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageChunk {
    pub record_map: RecordMap,
}

/// Result of `queryCollection`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionQueryResult {
    pub record_map: RecordMap,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordMap {
    #[serde(default)]
    pub block: IndexMap<BlockId, BlockRecord>,
}

/// One entry of a block map. `value` is absent for records the caller
/// may not read.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockRecord {
    #[serde(default)]
    pub value: Option<BlockValue>,
}

/// Raw JSON of one block.
///
/// Kept untyped so that fields of block types the assembler ignores can
/// hold anything; accessors interpret only what a recognized type needs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct BlockValue(pub Value);

impl BlockValue {
    /// The block's `type`, or `""` when absent or not a string.
    pub fn block_type(&self) -> &str {
        self.0.get("type").and_then(Value::as_str).unwrap_or_default()
    }

    /// The `properties` object; `null` counts as absent.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get("properties").and_then(Value::as_object)
    }

    pub fn display_source(&self) -> Option<&str> {
        self.0
            .get("format")?
            .get("display_source")?
            .as_str()
    }

    pub fn collection_id(&self) -> Option<CollectionId> {
        self.str_field("collection_id").map(CollectionId::from_raw)
    }

    pub fn first_view_id(&self) -> Option<CollectionViewId> {
        self.0
            .get("view_ids")?
            .as_array()?
            .first()?
            .as_str()
            .map(CollectionViewId::from_raw)
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.str_field("parent_id")
    }

    /// Reads one property as rich text.
    ///
    /// `Ok(None)` when the property is missing or `null`; an error when the
    /// block has no `properties` at all or the property is not rich text.
    pub fn property(&self, id: &BlockId, key: &str) -> Result<Option<RichText>, AppError> {
        let properties = self.properties().ok_or_else(|| {
            AppError::MalformedResponse(format!(
                "{} block {} has no properties",
                self.block_type(),
                id
            ))
        })?;

        match properties.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                AppError::MalformedResponse(format!(
                    "property '{}' of block {} is not rich text: {}",
                    key, id, e
                ))
            }),
        }
    }

    /// A property exactly as the service sent it, `null` when missing.
    pub fn raw_property(&self, key: &str) -> Value {
        self.properties()
            .and_then(|properties| properties.get(key))
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}
