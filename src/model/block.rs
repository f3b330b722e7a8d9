// src/model/block.rs
//! Typed view over a raw v3 block.
//!
//! Only the block types the document cares about are modeled. Any
//! other type becomes `BlockKind::Unsupported` and produces nothing.

use crate::api::responses::BlockValue;
use crate::constants::TITLE_PROPERTY;
use crate::error::AppError;
use crate::types::{BlockId, CollectionId, CollectionViewId, RichText};

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// page, header or sub_header: opens a new section.
    SectionStart { title: Option<RichText> },
    Image { display_source: String },
    Text { title: Option<RichText> },
    /// A text block without properties: an empty paragraph.
    EmptyText,
    BulletedList { title: Option<RichText> },
    CollectionView {
        collection_id: CollectionId,
        view_id: CollectionViewId,
    },
    Unsupported { block_type: String },
}

impl Block {
    /// Classifies a raw block, pulling out the fields its type needs.
    ///
    /// Fails when a recognized type lacks a field it cannot do without.
    pub fn from_value(id: BlockId, value: &BlockValue) -> Result<Self, AppError> {
        let kind = match value.block_type() {
            "page" | "header" | "sub_header" => BlockKind::SectionStart {
                title: value.property(&id, TITLE_PROPERTY)?,
            },
            "image" => BlockKind::Image {
                display_source: value
                    .display_source()
                    .map(str::to_string)
                    .ok_or_else(|| missing(&id, "image", "format.display_source"))?,
            },
            "text" if value.properties().is_none() => BlockKind::EmptyText,
            "text" => BlockKind::Text {
                title: value.property(&id, TITLE_PROPERTY)?,
            },
            "bulleted_list" => BlockKind::BulletedList {
                title: value.property(&id, TITLE_PROPERTY)?,
            },
            "collection_view" => {
                let collection_id = value
                    .collection_id()
                    .ok_or_else(|| missing(&id, "collection_view", "collection_id"))?;
                let view_id = value
                    .first_view_id()
                    .ok_or_else(|| missing(&id, "collection_view", "view_ids[0]"))?;
                BlockKind::CollectionView {
                    collection_id,
                    view_id,
                }
            }
            other => BlockKind::Unsupported {
                block_type: other.to_string(),
            },
        };

        Ok(Self { id, kind })
    }
}

fn missing(id: &BlockId, block_type: &str, field: &str) -> AppError {
    AppError::MalformedResponse(format!("{} block {} has no {}", block_type, id, field))
}
