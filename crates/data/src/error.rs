//! Error types for the data-file loader
//!
//! Only failures that abort a load are errors; syntactic noise inside an
//! otherwise readable file is collected as warnings on the parsed
//! [`DataFile`](crate::DataFile) instead.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal loader failures
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be opened or read
    #[error("Failed to open data file '{path}': {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A non-fatal problem noticed while parsing, tied to its source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number in the source file
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
