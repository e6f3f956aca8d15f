//! Error types for loading, converting and writing a table.

use std::path::PathBuf;

use csvjson_model::TypeError;
use thiserror::Error;

/// Errors that abort a conversion.
///
/// Every variant is fatal: the first one raised stops the run and no
/// output file is written. Display strings carry only this layer's
/// context; the underlying cause is reachable through `source()`.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input path does not name an existing regular file.
    #[error("the file {} is not found", .path.display())]
    FileNotFound { path: PathBuf },

    /// Input contains no records at all.
    #[error("missing header row in {}", .path.display())]
    MissingHeader { path: PathBuf },

    /// Header annotation uses an unsupported type code.
    #[error("invalid header")]
    Header(#[from] TypeError),

    /// A cell could not be coerced to its column type.
    #[error("line {line}, column {index} ({column})")]
    Cell {
        line: u64,
        index: usize,
        column: String,
        #[source]
        source: TypeError,
    },

    /// A data row has fewer cells than the header requires.
    #[error("line {line}: row has {width} cell(s), column index {index} is out of range")]
    RowTooShort { line: u64, index: usize, width: usize },

    /// Malformed delimited text.
    #[error("failed to read {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Output could not be written.
    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("failed to serialize records")]
    Json(#[from] serde_json::Error),

    /// Serialized output was not valid UTF-8.
    #[error("rendered JSON is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl IngestError {
    /// The coercion error behind a `Header` or `Cell` failure.
    pub fn type_error(&self) -> Option<&TypeError> {
        match self {
            Self::Header(error) | Self::Cell { source: error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Result type alias for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
