use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionViewMarker;

/// Type aliases for specific ID types
pub type PageId = Id<PageMarker>;
pub type BlockId = Id<BlockMarker>;
pub type CollectionId = Id<CollectionMarker>;
pub type CollectionViewId = Id<CollectionViewMarker>;

static ID_IN_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:[/-])([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})(?:[/?#]|$)",
    )
    .expect("Notion ID regex is valid")
});

impl<T> Id<T> {
    /// Parses a dashed id, a 32-char hex id, or a Notion URL ending in an id.
    ///
    /// The result is always the dashed, lower-case form the v3 API keys
    /// its record maps by.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim().trim_end_matches('/');
        if cleaned.is_empty() {
            return Err(ValidationError::EmptyField("id"));
        }

        if let Ok(uuid) = Uuid::parse_str(cleaned) {
            return Ok(Self::from_uuid(uuid));
        }

        if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
            let captured = ID_IN_URL
                .captures(cleaned)
                .and_then(|captures| captures.get(1))
                .ok_or_else(|| {
                    ValidationError::InvalidId(format!("No valid ID found in URL: {}", cleaned))
                })?;
            return Uuid::parse_str(captured.as_str())
                .map(Self::from_uuid)
                .map_err(|e| ValidationError::InvalidId(format!("{}: {}", captured.as_str(), e)));
        }

        Err(ValidationError::InvalidId(format!(
            "Could not parse Notion ID from: {}",
            input
        )))
    }

    /// Wraps an id exactly as the service returned it.
    ///
    /// Ids found inside responses are compared verbatim against other
    /// response fields, so they are never re-normalized.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _phantom: PhantomData,
        }
    }

    fn from_uuid(uuid: Uuid) -> Self {
        Self::from_raw(uuid.as_hyphenated().to_string())
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_raw(value))
    }
}
