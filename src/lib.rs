//! # folio
//!
//! Render structured portfolio documents to HTML pages.
//!
//! Documents arrive as JSON records produced by an ArchieML parser: a
//! title, a subtitle and a list of typed blocks. Each block type has one
//! rendering rule; the result is wrapped in the site skeleton and written to
//! `<output>/<document-id>/index.html`, ready for the downstream bundler to
//! inject stylesheets and scripts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use folio::{load_file, render};
//!
//! fn main() -> folio::Result<()> {
//!     // Load a document
//!     let doc = load_file("src/aml/json/alpha.json")?;
//!
//!     // Render its content fragment
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Closed type dispatch**: known block and inline types are enum variants,
//!   anything else is an explicit `Unhandled` no-op
//! - **Deterministic output**: same document, same bytes
//! - **Best-effort batches**: one broken document never stops the others
//! - **Parallel processing**: uses Rayon across documents

pub mod assemble;
pub mod build;
pub mod error;
pub mod loader;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use assemble::{assemble, write_document, AssembleOptions, PageMeta, Section};
pub use build::{build_dir, check_dir, BuildOptions, BuildReport, BuiltPage, DocumentOutcome};
pub use error::{Error, Result};
pub use loader::{discover, load_dir, load_file, DocumentSource};
pub use model::{Block, Document, Inline, TextItem};
pub use render::{
    EscapePolicy, JsonFormat, RenderOptions, RenderResult, RenderStats, UnknownTypePolicy,
};

use std::path::Path;

/// Render a document file to an HTML fragment.
///
/// # Example
///
/// ```no_run
/// use folio::render_file;
///
/// let html = render_file("src/aml/json/alpha.json").unwrap();
/// println!("{}", html);
/// ```
pub fn render_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_file(path)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Render a document file to an HTML fragment with custom options.
///
/// # Example
///
/// ```no_run
/// use folio::{render_file_with_options, RenderOptions, UnknownTypePolicy};
///
/// let options = RenderOptions::new().with_unknown_types(UnknownTypePolicy::Reject);
/// let html = render_file_with_options("src/aml/json/alpha.json", &options).unwrap();
/// ```
pub fn render_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = load_file(path)?;
    render::to_html(&doc, options)
}

/// Convert a document file to normalized JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = load_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for batch builds.
///
/// # Example
///
/// ```no_run
/// use folio::Folio;
///
/// let report = Folio::new()
///     .with_logo("../../assets/logo.png")
///     .warn_unknown_types()
///     .build("src/aml/json", "src/work")?;
/// println!("{} pages written", report.succeeded().count());
/// # Ok::<(), folio::Error>(())
/// ```
pub struct Folio {
    options: BuildOptions,
}

impl Folio {
    /// Create a new Folio builder.
    pub fn new() -> Self {
        Self {
            options: BuildOptions::default(),
        }
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set the escape policy for author text.
    pub fn with_escape(mut self, escape: EscapePolicy) -> Self {
        self.options.render = self.options.render.with_escape(escape);
        self
    }

    /// Log a warning for every block or inline without a rendering rule.
    pub fn warn_unknown_types(mut self) -> Self {
        self.options.render = self
            .options
            .render
            .with_unknown_types(UnknownTypePolicy::Warn);
        self
    }

    /// Fail documents containing blocks or inlines without a rendering rule.
    pub fn reject_unknown_types(mut self) -> Self {
        self.options.render = self
            .options
            .render
            .with_unknown_types(UnknownTypePolicy::Reject);
        self
    }

    /// Set the logo path passed to the header.
    pub fn with_logo(mut self, path: impl Into<String>) -> Self {
        self.options.assemble = self.options.assemble.with_logo(path);
        self
    }

    /// Set the active navigation section.
    pub fn with_active_section(mut self, section: Section) -> Self {
        self.options.assemble = self.options.assemble.with_active_section(section);
        self
    }

    /// Get the accumulated build options.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build every document of `input_dir` into `output_root`.
    pub fn build<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_root: Q,
    ) -> Result<BuildReport> {
        build::build_dir(input_dir, output_root, &self.options)
    }

    /// Load and render every document of `input_dir` without writing.
    pub fn check<P: AsRef<Path>>(&self, input_dir: P) -> Result<BuildReport> {
        build::check_dir(input_dir, &self.options)
    }
}

impl Default for Folio {
    fn default() -> Self {
        Self::new()
    }
}
