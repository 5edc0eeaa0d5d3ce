//! Document-level types.

use super::Block;
use serde::{Deserialize, Serialize};

/// A parsed portfolio document (one project page).
///
/// `title`, `subtitle` and `blocks` are required when deserializing; an
/// empty list is fine, a missing key is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier derived from the source file name, used as the output key
    #[serde(skip)]
    pub id: String,

    /// Title lines, one heading each
    pub title: Vec<TextItem>,

    /// Subtitle lines, one paragraph each
    pub subtitle: Vec<TextItem>,

    /// Content blocks in authoring order
    #[serde(alias = "div")]
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Vec::new(),
            subtitle: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Append a title line.
    pub fn with_title(mut self, value: impl Into<String>) -> Self {
        self.title.push(TextItem::new(value));
        self
    }

    /// Append a subtitle line.
    pub fn with_subtitle(mut self, value: impl Into<String>) -> Self {
        self.subtitle.push(TextItem::new(value));
        self
    }

    /// Append a block.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// The text used for the page `<title>`: the first title line, if any.
    pub fn page_title(&self) -> &str {
        self.title.first().map(|t| t.value.as_str()).unwrap_or("")
    }

    /// Check if the document has no renderable fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.subtitle.is_empty() && self.blocks.is_empty()
    }

    /// Tags of every block and inline without a rendering rule, in document order.
    pub fn unhandled_kinds(&self) -> Vec<&str> {
        let mut kinds = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Unhandled { kind } => kinds.push(kind.as_str()),
                Block::Content { content, .. } => {
                    kinds.extend(content.iter().filter_map(|inline| inline.unhandled_kind()));
                }
                Block::Video { .. } | Block::Image { .. } => {}
            }
        }
        kinds
    }
}

/// A single line of free text (`{ "value": "..." }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    /// The text itself
    pub value: String,
}

impl TextItem {
    /// Create a new text item.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
