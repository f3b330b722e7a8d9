// src/assembler/mod.rs
//! Document assembly: turns a page's flat block map into sections.
//!
//! One `loadPageChunk` call yields the block map. Blocks are walked in the
//! order the service returned them: page, header and sub_header blocks open
//! a section, everything else lands in the most recent one. Each
//! collection_view triggers its own `queryCollection` call, resolved
//! strictly one after another.

mod cursor;
pub mod table;

use crate::api::requests::{LoadPageChunk, QueryCollection};
use crate::api::NotionRpc;
use crate::config::ClientConfig;
use crate::error::AppError;
use crate::model::{Block, BlockKind, Child, Document, TableRows};
use crate::types::{BlockId, CollectionId, CollectionViewId, PageId};
use cursor::SectionCursor;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone, inverted.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Counts gathered while assembling, logged once at the end.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AssemblyReport {
    pub blocks_seen: usize,
    pub sections: usize,
    pub children: usize,
    pub collections_resolved: usize,
    pub empty_text_blocks: usize,
    pub unsupported_blocks: usize,
}

/// Builds `Document`s from a Notion page through any `NotionRpc`.
pub struct DocumentAssembler<R> {
    rpc: R,
    config: ClientConfig,
}

impl<R: NotionRpc> DocumentAssembler<R> {
    pub fn new(rpc: R, config: ClientConfig) -> Self {
        Self { rpc, config }
    }

    /// Fetches `page_id` and flattens it into a document.
    ///
    /// Any failure, remote or structural, aborts the whole assembly.
    pub async fn assemble(&self, page_id: &PageId) -> Result<Document, AppError> {
        self.assemble_with_report(page_id)
            .await
            .map(|(document, _)| document)
    }

    /// Same as [`assemble`](Self::assemble), also returning what was seen.
    pub async fn assemble_with_report(
        &self,
        page_id: &PageId,
    ) -> Result<(Document, AssemblyReport), AppError> {
        log::info!("Loading page chunk for {}", page_id);
        let chunk = self
            .rpc
            .load_page_chunk(&LoadPageChunk::new(page_id.clone()))
            .await?;

        let mut cursor = SectionCursor::default();
        let mut meta = TableRows::new();
        let mut report = AssemblyReport::default();

        for (id, record) in &chunk.record_map.block {
            let value = record.value.as_ref().ok_or_else(|| {
                AppError::MalformedResponse(format!("block {} has no value", id))
            })?;
            let block = Block::from_value(id.clone(), value)?;
            report.blocks_seen += 1;
            log::debug!("Block {} -> {:?}", block.id, block.kind);

            match block.kind {
                BlockKind::SectionStart { title } => cursor.start_section(title),
                BlockKind::Image { display_source } => {
                    let child = Child::Image {
                        src: self.proxied_image_src(&display_source),
                    };
                    cursor.push_child(&block.id, child)?;
                }
                BlockKind::Text { title } => {
                    cursor.push_child(&block.id, Child::Text { value: title })?;
                }
                BlockKind::EmptyText => report.empty_text_blocks += 1,
                BlockKind::BulletedList { title } => {
                    cursor.push_child(&block.id, Child::BulletedList { children: title })?;
                }
                BlockKind::CollectionView {
                    collection_id,
                    view_id,
                } => {
                    let table = self
                        .resolve_collection(&block.id, &collection_id, view_id)
                        .await?;
                    report.collections_resolved += 1;

                    // A table inside the page's own section describes the page.
                    if cursor.section_count() == 1 {
                        log::debug!("Collection {} becomes page metadata", collection_id);
                        meta = table;
                    } else {
                        cursor.push_child(&block.id, Child::CollectionView { value: table })?;
                    }
                }
                BlockKind::Unsupported { block_type } => {
                    log::debug!("Ignoring {} block {}", block_type, block.id);
                    report.unsupported_blocks += 1;
                }
            }
        }

        let document = Document {
            sections: cursor.into_sections(),
            meta,
        };
        report.sections = document.sections.len();
        report.children = document.child_count();

        log::info!(
            "Assembled {}: {} sections, {} children, {} collections, {} ignored blocks",
            page_id,
            report.sections,
            report.children,
            report.collections_resolved,
            report.unsupported_blocks
        );

        Ok((document, report))
    }

    async fn resolve_collection(
        &self,
        block: &BlockId,
        collection_id: &CollectionId,
        view_id: CollectionViewId,
    ) -> Result<TableRows, AppError> {
        log::debug!(
            "Querying collection {} (view {}) for block {}",
            collection_id,
            view_id,
            block
        );
        let request = QueryCollection::new(collection_id.clone(), view_id, &self.config.locale);
        let result = self.rpc.query_collection(&request).await?;
        table::fold_rows(collection_id, &result)
    }

    fn proxied_image_src(&self, display_source: &str) -> String {
        format!(
            "{}{}",
            self.config.image_proxy_prefix,
            utf8_percent_encode(display_source, URI_COMPONENT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    struct NoNetwork;

    #[async_trait::async_trait]
    impl NotionRpc for NoNetwork {
        async fn call(&self, function: &str, _body: &Value) -> Result<Value, AppError> {
            Err(AppError::MalformedResponse(format!("unexpected {}", function)))
        }
    }

    #[test]
    fn image_sources_are_encoded_like_uri_components() {
        let assembler = DocumentAssembler::new(NoNetwork, ClientConfig::default());
        assert_eq!(
            assembler.proxied_image_src("https://s3.aws/a b/photo(1).png?x=1&y=é"),
            "/image.js?url=https%3A%2F%2Fs3.aws%2Fa%20b%2Fphoto(1).png%3Fx%3D1%26y%3D%C3%A9"
        );
    }

    #[tokio::test]
    async fn transport_failures_abort_assembly() {
        let assembler = DocumentAssembler::new(NoNetwork, ClientConfig::default());
        let page = PageId::parse(crate::constants::DEFAULT_PAGE_ID).unwrap();
        assert!(assembler.assemble(&page).await.is_err());
    }
}
