//! Error types for folio library.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for folio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, rendering or writing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input files or directories.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A document is not valid JSON or does not have the document shape.
    #[error("Malformed document {}: {reason}", file.display())]
    MalformedDocument {
        /// The offending source file
        file: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Reading a document file failed.
    #[error("Failed to read {}: {source}", path.display())]
    InputRead {
        /// Source path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// A block or inline type has no rendering rule and unknown types are rejected.
    #[error("Document '{document}' contains unknown type '{kind}'")]
    UnknownType {
        /// Id of the document being rendered
        document: String,
        /// The unrecognized `type` tag
        kind: String,
    },

    /// Writing a rendered page failed.
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a `MalformedDocument` error for `file`.
    pub fn malformed(file: impl AsRef<Path>, reason: impl ToString) -> Self {
        Error::MalformedDocument {
            file: file.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Build the error for a document file that could not be read.
    ///
    /// Undecodable contents are not valid JSON, so they make the document
    /// malformed rather than unreadable.
    pub fn input_read(path: impl AsRef<Path>, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::InvalidData {
            return Error::malformed(path, source);
        }
        Error::InputRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build an `OutputWrite` error for `path`.
    pub fn output_write(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::OutputWrite {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::malformed("work/alpha.json", "missing field `blocks`");
        assert_eq!(
            err.to_string(),
            "Malformed document work/alpha.json: missing field `blocks`"
        );

        let err = Error::UnknownType {
            document: "alpha".to_string(),
            kind: "gallery".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Document 'alpha' contains unknown type 'gallery'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_output_write_keeps_source() {
        use std::error::Error as _;

        let err = Error::output_write(
            "out/alpha/index.html",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("out/alpha/index.html"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_input_read_names_file() {
        let err = Error::input_read(
            "work/alpha.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, Error::InputRead { .. }));
        assert_eq!(err.to_string(), "Failed to read work/alpha.json: denied");
    }

    #[test]
    fn test_input_read_invalid_data_is_malformed() {
        let err = Error::input_read(
            "work/alpha.json",
            io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        );
        match err {
            Error::MalformedDocument { file, reason } => {
                assert_eq!(file, PathBuf::from("work/alpha.json"));
                assert!(reason.contains("valid UTF-8"));
            }
            other => panic!("Expected MalformedDocument, got {:?}", other),
        }
    }
}
