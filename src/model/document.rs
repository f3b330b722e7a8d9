// src/model/document.rs
//! The flattened, presentation-ready document.

use crate::error::AppError;
use crate::types::RichText;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rows of a metadata table: normalized title → value column.
///
/// Cells are carried as the service sent them; a missing cell is `null`.
pub type TableRows = IndexMap<String, Value>;

/// A page flattened into sections, plus the page-level metadata table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
    pub meta: TableRows,
}

/// A titled run of children, started by a page, header or sub_header block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<RichText>,
    pub children: Vec<Child>,
}

/// One piece of content inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Child {
    Image {
        src: String,
    },
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<RichText>,
    },
    BulletedList {
        #[serde(skip_serializing_if = "Option::is_none")]
        children: Option<RichText>,
    },
    CollectionView {
        value: TableRows,
    },
}

impl Section {
    pub fn new(title: Option<RichText>) -> Self {
        Self {
            title,
            children: Vec::new(),
        }
    }
}

impl Child {
    /// The `type` tag this child serializes with.
    pub fn type_name(&self) -> &'static str {
        match self {
            Child::Image { .. } => "image",
            Child::Text { .. } => "text",
            Child::BulletedList { .. } => "bulleted_list",
            Child::CollectionView { .. } => "collection_view",
        }
    }
}

impl Document {
    /// Total children across all sections.
    pub fn child_count(&self) -> usize {
        self.sections.iter().map(|s| s.children.len()).sum()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, AppError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rich(text: &str) -> RichText {
        RichText(vec![json!([text])])
    }

    #[test]
    fn children_serialize_with_type_tags() {
        let mut table = TableRows::new();
        table.insert("due_date".into(), json!([["Friday"]]));
        table.insert("owner".into(), Value::Null);

        let section = Section {
            title: Some(rich("Intro")),
            children: vec![
                Child::Image {
                    src: "/image.js?url=x".into(),
                },
                Child::Text {
                    value: Some(rich("hello")),
                },
                Child::BulletedList {
                    children: Some(rich("item")),
                },
                Child::CollectionView { value: table },
            ],
        };

        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({
                "title": [["Intro"]],
                "children": [
                    { "type": "image", "src": "/image.js?url=x" },
                    { "type": "text", "value": [["hello"]] },
                    { "type": "bulleted_list", "children": [["item"]] },
                    { "type": "collection_view", "value": {
                        "due_date": [["Friday"]],
                        "owner": null
                    } }
                ]
            })
        );
    }

    #[test]
    fn empty_document_shape() {
        let doc = Document::default();
        assert_eq!(doc.to_json(false).unwrap(), r#"{"sections":[],"meta":{}}"#);
        assert_eq!(doc.child_count(), 0);
    }

    #[test]
    fn type_names_match_tags() {
        let child = Child::BulletedList { children: None };
        assert_eq!(
            serde_json::to_value(&child).unwrap()["type"],
            json!(child.type_name())
        );
    }
}
