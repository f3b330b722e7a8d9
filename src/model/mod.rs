// src/model/mod.rs
//! Domain model: the blocks Notion sends and the document built from them.

pub mod block;
pub mod document;

pub use block::{Block, BlockKind};
pub use document::{Child, Document, Section, TableRows};
