//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML fragment
    pub content: String,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of title headings emitted
    pub heading_count: u32,

    /// Number of paragraphs emitted (subtitles and `p` inlines)
    pub paragraph_count: u32,

    /// Number of video embeds emitted
    pub video_count: u32,

    /// Number of project links emitted
    pub link_count: u32,

    /// Number of content containers emitted
    pub container_count: u32,

    /// Number of image blocks passed over
    pub image_count: u32,

    /// Tags of blocks and inlines that had no rendering rule, in order
    pub skipped: Vec<String>,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment video count.
    pub fn add_video(&mut self) {
        self.video_count += 1;
    }

    /// Increment link count.
    pub fn add_link(&mut self) {
        self.link_count += 1;
    }

    /// Increment container count.
    pub fn add_container(&mut self) {
        self.container_count += 1;
    }

    /// Increment image count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Record a tag that was skipped.
    pub fn add_skipped(&mut self, kind: &str) {
        self.skipped.push(kind.to_string());
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.video_count += other.video_count;
        self.link_count += other.link_count;
        self.container_count += other.container_count;
        self.image_count += other.image_count;
        self.skipped.extend(other.skipped.iter().cloned());
    }
}
