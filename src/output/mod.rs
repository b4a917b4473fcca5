//! Persistence of the assembled table.
//!
//! The table is written as UTF-8 CSV with a leading byte-order mark so
//! spreadsheet tools detect the encoding and non-ASCII descriptions survive.

mod csv;

use std::path::PathBuf;

use thiserror::Error;

pub use self::csv::{UTF8_BOM, read_csv, write_csv};

/// Errors writing or reading the table file.
#[derive(Debug, Error)]
pub enum OutputError {
    /// File system error (create, write, rename, read).
    #[error("IO error at {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content or a row that does not fit the record shape.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// The file being written or read.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: ::csv::Error,
    },
}

impl OutputError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a CSV error.
    pub fn csv(path: impl Into<PathBuf>, source: ::csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
