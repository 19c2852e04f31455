//! All error types for the stringsheet crate.
//!
//! These are returned from all fallible operations (loading resource trees,
//! parsing and writing tables, emitting XML, etc.).

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing default resource: {}", .0.display())]
    MissingDefaultResource(PathBuf),

    #[error("malformed row at line {line}: expected at least {expected} columns, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid table header: {0}")]
    InvalidHeader(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches the file the error came from, unless it already names one.
    pub fn in_file(self, path: impl AsRef<Path>) -> Self {
        match self {
            Error::InFile { .. } | Error::MissingDefaultResource(_) => self,
            other => Error::InFile {
                path: path.as_ref().to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// Strips any file context and returns the underlying error.
    pub fn root(&self) -> &Error {
        match self {
            Error::InFile { source, .. } => source.root(),
            other => other,
        }
    }
}
