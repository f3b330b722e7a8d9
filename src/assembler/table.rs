//! Reshaping collection rows into a flat key/value table.

use crate::api::responses::CollectionQueryResult;
use crate::constants::{TABLE_VALUE_PROPERTY_ID, TITLE_PROPERTY};
use crate::error::AppError;
use crate::model::TableRows;
use crate::types::CollectionId;
use once_cell::sync::Lazy;
use regex::Regex;

static KEY_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \-_]+").expect("key separator regex is valid"));

/// Turns a row title into a table key: lower-cased, trimmed, and with runs
/// of spaces, hyphens and underscores collapsed to one underscore.
pub fn normalize_key(title: &str) -> String {
    let lowered = title.to_lowercase();
    KEY_SEPARATORS
        .replace_all(lowered.trim(), "_")
        .into_owned()
}

/// Folds the rows of `collection` into a table.
///
/// Only blocks whose parent is the collection are rows. Each row's key is
/// its normalized title; its value is the `Agd&` cell exactly as sent,
/// `null` when absent. A later row with the same key replaces the earlier
/// value in place.
pub fn fold_rows(
    collection: &CollectionId,
    result: &CollectionQueryResult,
) -> Result<TableRows, AppError> {
    let mut table = TableRows::new();

    let rows = result.record_map.block.iter().filter_map(|(id, record)| {
        record
            .value
            .as_ref()
            .filter(|value| value.parent_id() == Some(collection.as_str()))
            .map(|value| (id, value))
    });

    for (id, value) in rows {
        let title = value
            .property(id, TITLE_PROPERTY)?
            .and_then(|title| title.first_text().map(str::to_string))
            .ok_or_else(|| {
                AppError::MalformedResponse(format!("row {} of {} has no title", id, collection))
            })?;
        table.insert(
            normalize_key(&title),
            value.raw_property(TABLE_VALUE_PROPERTY_ID),
        );
    }

    Ok(table)
}
