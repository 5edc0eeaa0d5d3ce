//! Page assembly: wraps a rendered fragment in the site skeleton and writes it.
//!
//! The skeleton is an EJS template for the downstream site build: it pulls
//! in the shared `meta`, `header` and `footer` partials and leaves two
//! protected injection points where the bundler later inserts stylesheet and
//! script tags. The markers are written verbatim and must survive
//! minification, hence the `htmlclean-protect` wrappers.

use crate::error::{Error, Result};
use crate::loader;
use crate::model::Document;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Opening marker of a block the minifier must leave untouched.
pub const PROTECT_START: &str = "<!--[htmlclean-protect]-->";
/// Closing marker of a protected block.
pub const PROTECT_END: &str = "<!--[/htmlclean-protect]-->";
/// Stylesheet injection point.
pub const INJECT_CSS: &str = "<!-- inject:css -->";
/// Script injection point.
pub const INJECT_JS: &str = "<!-- inject:js -->";
/// End of an injection point.
pub const END_INJECT: &str = "<!-- endinject -->";

/// Navigation section highlighted in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Project pages
    #[default]
    Work,
    /// About pages
    About,
}

impl Section {
    /// Name of the section as used by the header partial.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Work => "work",
            Section::About => "about",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for page assembly.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Directory of the shared partials, relative to the written page
    pub partials_dir: String,

    /// Logo path passed to the header partial
    pub logo_path: String,

    /// Section marked active in the navigation
    pub active_section: Section,

    /// File name written inside each document directory
    pub index_file: String,
}

impl AssembleOptions {
    /// Create new assemble options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the partials directory.
    pub fn with_partials_dir(mut self, dir: impl Into<String>) -> Self {
        self.partials_dir = dir.into();
        self
    }

    /// Set the logo path.
    pub fn with_logo(mut self, path: impl Into<String>) -> Self {
        self.logo_path = path.into();
        self
    }

    /// Set the active navigation section.
    pub fn with_active_section(mut self, section: Section) -> Self {
        self.active_section = section;
        self
    }

    /// Set the index file name.
    pub fn with_index_file(mut self, name: impl Into<String>) -> Self {
        self.index_file = name.into();
        self
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            partials_dir: "../../_partials".to_string(),
            logo_path: "../../assets/logo.png".to_string(),
            active_section: Section::Work,
            index_file: "index.html".to_string(),
        }
    }
}

/// Per-page values substituted into the skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageMeta {
    /// Document id
    pub id: String,
    /// Page title handed to the meta partial
    pub title: String,
}

impl PageMeta {
    /// Create page metadata.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Take the id and first title line of a document.
    pub fn from_document(doc: &Document) -> Self {
        Self::new(doc.id.as_str(), doc.page_title())
    }
}

/// Wrap a rendered fragment in the page skeleton.
pub fn assemble(fragment: &str, meta: &PageMeta, options: &AssembleOptions) -> String {
    let partials = options.partials_dir.trim_end_matches('/');
    let active = |section: Section| {
        if section == options.active_section {
            " active"
        } else {
            ""
        }
    };

    let mut html = String::with_capacity(fragment.len() + 1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    push_injection_point(&mut html, INJECT_CSS);
    html.push_str(&format!(
        "<%- include('{}/meta.html',{{title:'{}'}}) %>\n",
        partials,
        escape_js_string(&meta.title)
    ));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<%- include('{}/header.html',{{logo: '{}', work: '{}', about:'{}'}}) %>\n",
        partials,
        escape_js_string(&options.logo_path),
        active(Section::Work),
        active(Section::About)
    ));
    html.push_str("<div class=\"project-content\" id=\"project-content-intro\">\n");
    html.push_str(fragment);
    if !fragment.is_empty() && !fragment.ends_with('\n') {
        html.push('\n');
    }
    html.push_str("</div>\n");
    html.push_str(&format!("<%- include('{}/footer.html') %>\n", partials));
    push_injection_point(&mut html, INJECT_JS);
    html.push_str("</body>\n</html>\n");
    html
}

fn push_injection_point(html: &mut String, marker: &str) {
    for line in [PROTECT_START, marker, END_INJECT, PROTECT_END] {
        html.push_str(line);
        html.push('\n');
    }
}

/// Escape a value for a single-quoted JavaScript string inside an include call.
fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Path of the page written for document `id` under `output_root`.
pub fn output_path<P: AsRef<Path>>(
    output_root: P,
    id: &str,
    options: &AssembleOptions,
) -> PathBuf {
    output_root.as_ref().join(id).join(&options.index_file)
}

/// Write an assembled page to `<output_root>/<id>/<index_file>`.
///
/// The directory is created if needed and an existing page is replaced. The
/// page is written to a sibling temporary file first and renamed into place,
/// so a failed write never leaves a truncated page behind.
pub fn write_document<P: AsRef<Path>>(
    output_root: P,
    id: &str,
    html: &str,
    options: &AssembleOptions,
) -> Result<PathBuf> {
    let path = output_path(output_root, id, options);
    if let Err(reason) = loader::check_id(id) {
        return Err(Error::output_write(
            &path,
            io::Error::new(io::ErrorKind::InvalidInput, reason),
        ));
    }
    let dir = path
        .parent()
        .ok_or_else(|| Error::Other(format!("No parent directory for {}", path.display())))?;
    fs::create_dir_all(dir).map_err(|e| Error::output_write(dir, e))?;

    let tmp = path.with_extension("tmp");
    if let Err(e) = fs::write(&tmp, html) {
        let _ = fs::remove_file(&tmp);
        return Err(Error::output_write(&path, e));
    }
    if let Err(e) = fs::rename(&tmp, &path) {
        let _ = fs::remove_file(&tmp);
        return Err(Error::output_write(&path, e));
    }

    log::info!("Wrote {}", path.display());
    Ok(path)
}
