//! Section bookkeeping during assembly.

use crate::error::AppError;
use crate::model::{Child, Section};
use crate::types::{BlockId, RichText};

/// Sections built so far plus the one children are appended to.
///
/// `current` moves only when a section starts.
#[derive(Debug, Default)]
pub(crate) struct SectionCursor {
    sections: Vec<Section>,
    current: Option<usize>,
}

impl SectionCursor {
    pub fn start_section(&mut self, title: Option<RichText>) {
        self.sections.push(Section::new(title));
        self.current = Some(self.sections.len() - 1);
    }

    /// Appends to the current section.
    ///
    /// The root page block always precedes content; a child arriving before
    /// any section means the block map is out of order.
    pub fn push_child(&mut self, block: &BlockId, child: Child) -> Result<(), AppError> {
        let index = self.current.ok_or_else(|| {
            AppError::MalformedResponse(format!(
                "{} block {} precedes any section",
                child.type_name(),
                block
            ))
        })?;
        self.sections[index].children.push(child);
        Ok(())
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}
