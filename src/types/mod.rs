//! Domain types shared by the API layer and the document model.

use thiserror::Error;

mod ids;
mod rich_text;

pub use ids::*;
pub use rich_text::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },
}
