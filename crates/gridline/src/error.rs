//! Error types for the gridline crate.
//!
//! The engine's core operations (search, sort, selection, visibility and the
//! faithful CSV rendering) are total and never fail. Errors only come from
//! the edges: building a column registry, parsing configuration, writing
//! RFC 4180 CSV through the `csv` crate, and saving an export artifact.

use thiserror::Error;

/// Errors that can occur when configuring a grid or exporting its data.
#[derive(Debug, Error)]
pub enum GridError {
    /// Two columns in a registry share the same key.
    #[error("duplicate column key '{0}'")]
    DuplicateColumn(String),

    /// A column was declared with an empty key.
    #[error("column at position {0} has an empty key")]
    EmptyColumnKey(usize),

    /// CSV writing failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV writer could not be flushed into its buffer.
    #[error("CSV buffer flush failed: {0}")]
    CsvFlush(String),

    /// The exported bytes were not valid UTF-8.
    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// JSON configuration or row data could not be parsed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration could not be parsed.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Writing an export artifact to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for GridError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        GridError::CsvFlush(err.to_string())
    }
}

/// Result type for gridline operations.
pub type Result<T> = std::result::Result<T, GridError>;
