//! Rendering options and configuration.

use std::borrow::Cow;

/// Default scheme prepended to project-link suffixes.
pub const DEFAULT_LINK_SCHEME: &str = "https://";

/// Default text of every project link.
pub const DEFAULT_LINK_TEXT: &str = "See the project →";

/// Default base URL of the embedded video player.
pub const DEFAULT_VIDEO_PLAYER: &str = "https://player.vimeo.com/video/";

/// Default player API script loaded next to each embed.
pub const DEFAULT_PLAYER_SCRIPT: &str = "https://player.vimeo.com/api/player.js";

/// Options for rendering a document to HTML.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// How author-supplied text is embedded
    pub escape: EscapePolicy,

    /// What to do with block and inline types that have no rendering rule
    pub unknown_types: UnknownTypePolicy,

    /// Scheme prefix for project links
    pub link_scheme: String,

    /// Text of every project link
    pub link_text: String,

    /// Base URL the video identifier is appended to
    pub video_player: String,

    /// Player script emitted after each embed
    pub player_script: String,

    /// Collect rendering statistics
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the escape policy.
    pub fn with_escape(mut self, escape: EscapePolicy) -> Self {
        self.escape = escape;
        self
    }

    /// Set the unknown type policy.
    pub fn with_unknown_types(mut self, policy: UnknownTypePolicy) -> Self {
        self.unknown_types = policy;
        self
    }

    /// Set the project link scheme.
    pub fn with_link_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.link_scheme = scheme.into();
        self
    }

    /// Set the project link text.
    pub fn with_link_text(mut self, text: impl Into<String>) -> Self {
        self.link_text = text.into();
        self
    }

    /// Set the video player base URL.
    pub fn with_video_player(mut self, url: impl Into<String>) -> Self {
        self.video_player = url.into();
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape: EscapePolicy::Trusted,
            unknown_types: UnknownTypePolicy::Skip,
            link_scheme: DEFAULT_LINK_SCHEME.to_string(),
            link_text: DEFAULT_LINK_TEXT.to_string(),
            video_player: DEFAULT_VIDEO_PLAYER.to_string(),
            player_script: DEFAULT_PLAYER_SCRIPT.to_string(),
            collect_stats: false,
        }
    }
}

/// How author-supplied strings are embedded in markup.
///
/// Documents come from a trusted authoring pipeline and may contain inline
/// markup on purpose, so the default is `Trusted`. This is the only place
/// the escaping decision is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapePolicy {
    /// Embed strings verbatim
    #[default]
    Trusted,
    /// HTML-escape text content and attribute values
    Escape,
}

impl EscapePolicy {
    /// Apply the policy to text content.
    pub fn text<'a>(&self, s: &'a str) -> Cow<'a, str> {
        match self {
            EscapePolicy::Trusted => Cow::Borrowed(s),
            EscapePolicy::Escape => html_escape::encode_text(s),
        }
    }

    /// Apply the policy to a double-quoted attribute value.
    pub fn attribute<'a>(&self, s: &'a str) -> Cow<'a, str> {
        match self {
            EscapePolicy::Trusted => Cow::Borrowed(s),
            EscapePolicy::Escape => html_escape::encode_double_quoted_attribute(s),
        }
    }
}

/// Handling of block and inline types without a rendering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTypePolicy {
    /// Emit nothing and continue
    #[default]
    Skip,
    /// Emit nothing, continue, and log a warning
    Warn,
    /// Fail the document with `Error::UnknownType`
    Reject,
}
