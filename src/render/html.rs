//! HTML rendering for portfolio documents.

use crate::error::{Error, Result};
use crate::model::{Block, Document, Inline, TextItem};

use super::markup::{Element, Markup};
use super::{RenderOptions, RenderResult, RenderStats, UnknownTypePolicy};

/// Query string appended to every player URL.
const PLAYER_QUERY: &str =
    "?autoplay=1&loop=1&autopause=0&title=0&byline=0&portrait=0&autopause=0";

/// Keeps the embed at a 16:9 ratio.
const WRAPPER_STYLE: &str = "padding:56.18% 0 0 0;position:relative;";

const IFRAME_STYLE: &str = "position:absolute;top:0;left:0;width:100%;height:100%;";

/// Convert a document to an HTML fragment.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to an HTML fragment with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render_with_stats(doc)
}

/// HTML renderer.
///
/// Output is a pure function of the document and options: title headings,
/// then subtitle paragraphs, then one fragment per block, all in input
/// order.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: RenderStats,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
        }
    }

    /// Render a document to an HTML fragment.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        let markup = self.render_internal(doc)?;
        Ok(markup.into_string())
    }

    /// Render a document to an HTML fragment with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let markup = self.render_internal(doc)?;
        Ok(RenderResult::new(markup.into_string(), self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<Markup> {
        let mut fragments =
            Vec::with_capacity(doc.title.len() + doc.subtitle.len() + doc.blocks.len());

        for item in &doc.title {
            fragments.push(self.render_heading(item));
        }

        for item in &doc.subtitle {
            fragments.push(self.render_paragraph(&item.value));
        }

        for block in &doc.blocks {
            fragments.push(self.render_block(doc, block)?);
        }

        Ok(Markup::lines(fragments))
    }

    fn render_block(&mut self, doc: &Document, block: &Block) -> Result<Markup> {
        match block {
            Block::Video { content } => {
                Ok(content.iter().map(|id| self.render_video(id)).collect())
            }
            Block::Image { .. } => {
                if self.options.collect_stats {
                    self.stats.add_image();
                }
                log::debug!("{}: image block has no rendering rule", doc.id);
                Ok(Markup::empty())
            }
            Block::Content { id, content } => self.render_container(doc, id.as_deref(), content),
            Block::Unhandled { kind } => {
                self.unhandled(doc, "block", kind)?;
                Ok(Markup::empty())
            }
        }
    }

    fn render_heading(&mut self, item: &TextItem) -> Markup {
        if self.options.collect_stats {
            self.stats.add_heading();
        }
        Element::new("h1")
            .child(self.options.escape.text(&item.value).into_owned())
            .build()
    }

    fn render_paragraph(&mut self, text: &str) -> Markup {
        if self.options.collect_stats {
            self.stats.add_paragraph();
        }
        Element::new("p")
            .child(self.options.escape.text(text).into_owned())
            .build()
    }

    fn render_video(&mut self, video: &str) -> Markup {
        if self.options.collect_stats {
            self.stats.add_video();
        }

        let src = format!(
            "{}{}{}",
            self.options.video_player,
            self.options.escape.attribute(video),
            PLAYER_QUERY
        );
        let iframe = Element::new("iframe")
            .attr("src", src)
            .attr("style", IFRAME_STYLE)
            .attr("frameborder", "0")
            .flag("webkitallowfullscreen")
            .flag("mozallowfullscreen")
            .flag("allowfullscreen")
            .attr("allow", "autoplay");
        let wrapper = Element::new("div")
            .attr("class", "video-wrapper")
            .attr("style", WRAPPER_STYLE)
            .child(iframe);
        let script = Element::new("script").attr("src", self.options.player_script.as_str());

        Element::new("div")
            .attr("class", "project-image")
            .block()
            .child([wrapper.build(), script.build()].into_iter().collect::<Markup>())
            .build()
    }

    fn render_container(
        &mut self,
        doc: &Document,
        id: Option<&str>,
        content: &[Inline],
    ) -> Result<Markup> {
        if self.options.collect_stats {
            self.stats.add_container();
        }

        let mut children = Vec::new();
        for inline in content {
            self.render_inline(doc, inline, &mut children)?;
        }

        let id = id.map(|id| self.options.escape.attribute(id).into_owned());
        Ok(Element::new("div")
            .attr("class", "project-project-content")
            .attr_opt("id", id)
            .block()
            .children(children)
            .build())
    }

    fn render_inline(
        &mut self,
        doc: &Document,
        inline: &Inline,
        out: &mut Vec<Markup>,
    ) -> Result<()> {
        match inline {
            Inline::ProjectLink { content } => {
                for suffix in content {
                    out.push(self.render_link(suffix));
                }
            }
            Inline::Paragraph { content } => {
                for text in content {
                    out.push(self.render_paragraph(text));
                }
            }
            Inline::Unhandled { kind } => self.unhandled(doc, "inline", kind)?,
        }
        Ok(())
    }

    fn render_link(&mut self, suffix: &str) -> Markup {
        if self.options.collect_stats {
            self.stats.add_link();
        }

        let href = format!(
            "{}{}",
            self.options.link_scheme,
            self.options.escape.attribute(suffix)
        );
        let link = Element::new("a")
            .attr("target", "_blank")
            .attr("href", href)
            .attr("class", "see-link")
            .child(self.options.link_text.as_str());
        Element::new("p").child(link).build()
    }

    fn unhandled(&mut self, doc: &Document, level: &str, kind: &str) -> Result<()> {
        match self.options.unknown_types {
            UnknownTypePolicy::Skip => {
                log::debug!("{}: skipping {} type '{}'", doc.id, level, kind);
            }
            UnknownTypePolicy::Warn => {
                log::warn!("{}: no rendering rule for {} type '{}'", doc.id, level, kind);
            }
            UnknownTypePolicy::Reject => {
                return Err(Error::UnknownType {
                    document: doc.id.clone(),
                    kind: kind.to_string(),
                });
            }
        }

        if self.options.collect_stats {
            self.stats.add_skipped(kind);
        }
        Ok(())
    }
}
