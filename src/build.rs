//! Batch pipeline: discover → load → render → assemble → write.
//!
//! Every document is processed independently and its outcome collected, so
//! a malformed file or a failed write costs only that one page.

use crate::assemble::{self, AssembleOptions, PageMeta};
use crate::error::Result;
use crate::loader::{self, DocumentSource};
use crate::model::Document;
use crate::render::{self, RenderOptions, RenderStats};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Options for a batch build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Rendering options
    pub render: RenderOptions,

    /// Page assembly options
    pub assemble: AssembleOptions,

    /// Whether to process documents in parallel
    pub parallel: bool,
}

impl BuildOptions {
    /// Create new build options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set assembly options.
    pub fn with_assemble_options(mut self, options: AssembleOptions) -> Self {
        self.assemble = options;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            assemble: AssembleOptions::default(),
            parallel: true,
        }
    }
}

/// A document that went through the whole pipeline.
#[derive(Debug, Clone)]
pub struct BuiltPage {
    /// Document id
    pub id: String,
    /// Written page, `None` when the build did not write output
    pub output: Option<PathBuf>,
    /// Rendering statistics
    pub stats: RenderStats,
}

/// Outcome of one document in a batch.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// The source file
    pub source: DocumentSource,
    /// The built page or the error that stopped it
    pub result: Result<BuiltPage>,
}

impl DocumentOutcome {
    /// Check if this document was built.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate result of a batch build, in document id order.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// One outcome per discovered document
    pub outcomes: Vec<DocumentOutcome>,
}

impl BuildReport {
    /// Number of documents processed.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if no documents were found.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Documents that were built.
    pub fn succeeded(&self) -> impl Iterator<Item = &BuiltPage> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Documents that failed, with their errors.
    pub fn failed(&self) -> impl Iterator<Item = (&DocumentSource, &crate::Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.source, e)))
    }

    /// Check if every document was built.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(DocumentOutcome::is_ok)
    }

    /// Statistics merged across all built documents.
    pub fn stats(&self) -> RenderStats {
        let mut total = RenderStats::new();
        for page in self.succeeded() {
            total.merge(&page.stats);
        }
        total
    }
}

/// Render a document and wrap it in the page skeleton.
pub fn render_page(doc: &Document, options: &BuildOptions) -> Result<(String, RenderStats)> {
    let result = render::to_html_with_stats(doc, &options.render)?;
    let page = assemble::assemble(
        &result.content,
        &PageMeta::from_document(doc),
        &options.assemble,
    );
    Ok((page, result.stats))
}

/// Run one document through the pipeline.
///
/// With `output_root` set the page is written to
/// `<output_root>/<id>/index.html`; without it the document is only loaded
/// and rendered.
pub fn build_document(
    source: &DocumentSource,
    output_root: Option<&Path>,
    options: &BuildOptions,
) -> Result<BuiltPage> {
    let doc = source.load()?;
    let (page, stats) = render_page(&doc, options)?;

    let output = match output_root {
        Some(root) => Some(assemble::write_document(
            root,
            &doc.id,
            &page,
            &options.assemble,
        )?),
        None => None,
    };

    Ok(BuiltPage {
        id: doc.id,
        output,
        stats,
    })
}

/// Build a list of sources, calling `progress` after each document.
pub fn build_sources<F>(
    sources: Vec<DocumentSource>,
    output_root: Option<&Path>,
    options: &BuildOptions,
    progress: F,
) -> BuildReport
where
    F: Fn(&DocumentOutcome) + Sync,
{
    let process = |source: DocumentSource| {
        let result = build_document(&source, output_root, options);
        if let Err(ref e) = result {
            log::warn!("{}: {}", source.id, e);
        }
        let outcome = DocumentOutcome { source, result };
        progress(&outcome);
        outcome
    };

    let outcomes = if options.parallel {
        sources.into_par_iter().map(process).collect()
    } else {
        sources.into_iter().map(process).collect()
    };

    BuildReport { outcomes }
}

/// Build every document of `input_dir` into `output_root`.
///
/// Only failing to list `input_dir` is an error; per-document failures are
/// reported in the returned [`BuildReport`].
///
/// # Example
/// ```no_run
/// use folio::build::{build_dir, BuildOptions};
///
/// let report = build_dir("src/aml/json", "src/work", &BuildOptions::default()).unwrap();
/// for (source, error) in report.failed() {
///     eprintln!("{}: {}", source.id, error);
/// }
/// ```
pub fn build_dir<P, Q>(
    input_dir: P,
    output_root: Q,
    options: &BuildOptions,
) -> Result<BuildReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let sources = loader::discover(input_dir)?;
    log::info!("Building {} documents", sources.len());
    Ok(build_sources(
        sources,
        Some(output_root.as_ref()),
        options,
        |_| {},
    ))
}

/// Load and render every document of `input_dir` without writing anything.
pub fn check_dir<P: AsRef<Path>>(input_dir: P, options: &BuildOptions) -> Result<BuildReport> {
    let sources = loader::discover(input_dir)?;
    Ok(build_sources(sources, None, options, |_| {}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    #[test]
    fn test_build_options_builder() {
        let options = BuildOptions::new().sequential();
        assert!(!options.parallel);
        assert!(BuildOptions::default().parallel);
    }

    #[test]
    fn test_render_page_wraps_fragment() {
        let doc = Document::new("alpha")
            .with_title("Alpha")
            .with_block(Block::video(["1"]));
        let (page, stats) = render_page(&doc, &BuildOptions::default()).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("{title:'Alpha'}"));
        assert!(page.contains("<h1>Alpha</h1>"));
        assert_eq!(stats.video_count, 1);
    }

    #[test]
    fn test_empty_report() {
        let report = BuildReport::default();
        assert!(report.is_empty());
        assert!(report.is_success());
        assert_eq!(report.stats(), RenderStats::default());
    }
}
