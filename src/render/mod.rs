//! Rendering module for converting documents to HTML fragments.

mod html;
mod json;
pub mod markup;
mod options;
mod result;

pub use html::{to_html, to_html_with_stats, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use markup::{Element, Markup};
pub use options::{
    EscapePolicy, RenderOptions, UnknownTypePolicy, DEFAULT_LINK_SCHEME, DEFAULT_LINK_TEXT,
    DEFAULT_PLAYER_SCRIPT, DEFAULT_VIDEO_PLAYER,
};
pub use result::{RenderResult, RenderStats};
