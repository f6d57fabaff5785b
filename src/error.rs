//! Error types for loading, lookup and export.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a [`Dataset`](crate::data::model::Dataset) from a source file.
///
/// Loader failures are fatal for the views: the front-end reports the message
/// and stops rendering until a valid file is opened.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("dataset file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("atomic number {0} appears more than once")]
    DuplicateAtomicNumber(u32),

    #[error("dataset contains no elements")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

/// Lookup of an element id that is not part of the source collection.
///
/// Callers pick ids from the same collection's option list, so hitting this
/// indicates a stale selection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    #[error("no element with atomic number {0} in the current selection")]
    NotFound(u32),
}

/// Failure while writing the projected table as delimited text.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
