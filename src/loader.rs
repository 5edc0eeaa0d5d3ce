//! Document loading from serialized JSON records.
//!
//! One file holds one document; the document id is the file name with its
//! extension stripped.

use crate::error::{Error, Result};
use crate::model::Document;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Extension of serialized document files.
pub const DOCUMENT_EXTENSION: &str = "json";

/// A document file found on disk, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentSource {
    /// Document id (file stem)
    pub id: String,
    /// Path to the serialized document
    pub path: PathBuf,
    /// Why discovery refused this file, reported when it is loaded
    rejected: Option<String>,
}

impl DocumentSource {
    /// Describe the document stored at `path`.
    ///
    /// # Returns
    /// * `Err(Error::MalformedDocument)` if the file stem is not usable as a
    ///   single output directory name
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let id = id_from_path(path).map_err(|reason| Error::malformed(path, reason))?;

        Ok(Self {
            id,
            path: path.to_path_buf(),
            rejected: None,
        })
    }

    /// A discovered file that must fail when loaded.
    fn rejected(id: String, path: PathBuf, reason: String) -> Self {
        Self {
            id,
            path,
            rejected: Some(reason),
        }
    }

    /// Check whether `path` looks like a serialized document.
    pub fn is_document_path(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
            .unwrap_or(false)
    }

    /// Read and parse this document.
    pub fn load(&self) -> Result<Document> {
        if let Some(reason) = &self.rejected {
            return Err(Error::malformed(&self.path, reason));
        }
        let json =
            fs::read_to_string(&self.path).map_err(|e| Error::input_read(&self.path, e))?;
        parse_document(&json, self)
    }
}

/// Check that `id` names exactly one directory below the output root.
pub fn check_id(id: &str) -> std::result::Result<(), String> {
    let mut components = Path::new(id).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == OsStr::new(id) => Ok(()),
        _ => Err(format!("'{}' is not a valid document id", id)),
    }
}

fn id_from_path(path: &Path) -> std::result::Result<String, String> {
    let stem = path
        .file_stem()
        .ok_or_else(|| "file name has no stem".to_string())?;
    let id = stem
        .to_str()
        .ok_or_else(|| format!("file name {} is not valid UTF-8", stem.to_string_lossy()))?;
    check_id(id)?;
    Ok(id.to_string())
}

/// List the document files of a directory, sorted by id.
///
/// Only regular `*.json` files directly inside `dir` are returned. Files
/// whose id is unusable, or already taken by an earlier file in id order,
/// are still listed so the failure is reported with that document; loading
/// them yields `Error::MalformedDocument`.
///
/// # Example
/// ```no_run
/// use folio::loader::discover;
///
/// for source in discover("src/aml/json").unwrap() {
///     println!("{} -> {}", source.id, source.path.display());
/// }
/// ```
pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Vec<DocumentSource>> {
    let mut sources = Vec::new();

    for entry in fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() || !DocumentSource::is_document_path(&path) {
            log::debug!("Ignoring {}", path.display());
            continue;
        }
        let source = match id_from_path(&path) {
            Ok(id) => DocumentSource {
                id,
                path,
                rejected: None,
            },
            Err(reason) => {
                let id = path.file_stem().unwrap_or_default().to_string_lossy().into_owned();
                DocumentSource::rejected(id, path, reason)
            }
        };
        sources.push(source);
    }

    sources.sort();
    reject_duplicate_ids(&mut sources);
    Ok(sources)
}

/// Keep the first source of each id; later ones fail instead of racing for
/// the same output directory.
fn reject_duplicate_ids(sources: &mut [DocumentSource]) {
    let mut taken: Option<(String, PathBuf)> = None;
    for source in sources.iter_mut() {
        if source.rejected.is_some() {
            continue;
        }
        let owner = match &taken {
            Some((id, path)) if *id == source.id => Some(path.clone()),
            _ => None,
        };
        match owner {
            Some(owner) => {
                log::warn!("Duplicate document id '{}' in {}", source.id, source.path.display());
                source.rejected = Some(format!(
                    "document id '{}' is already used by {}",
                    source.id,
                    owner.display()
                ));
            }
            None => taken = Some((source.id.clone(), source.path.clone())),
        }
    }
}

/// Load a single document file.
///
/// # Example
/// ```no_run
/// use folio::loader::load_file;
///
/// let doc = load_file("src/aml/json/alpha.json").unwrap();
/// assert_eq!(doc.id, "alpha");
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocumentSource::new(path)?.load()
}

/// Load every document in a directory.
///
/// Failures are kept per document so one malformed file never hides the
/// others. Only failing to list the directory itself is an error.
pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<(DocumentSource, Result<Document>)>> {
    let loaded = discover(dir)?
        .into_iter()
        .map(|source| {
            let document = source.load();
            (source, document)
        })
        .collect();
    Ok(loaded)
}

/// Parse a serialized document.
pub fn parse_document(json: &str, source: &DocumentSource) -> Result<Document> {
    let mut document: Document =
        serde_json::from_str(json).map_err(|e| Error::malformed(&source.path, e))?;
    document.id = source.id.clone();

    log::debug!(
        "Loaded {} ({} title, {} subtitle, {} blocks)",
        document.id,
        document.title.len(),
        document.subtitle.len(),
        document.blocks.len()
    );
    Ok(document)
}
