use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load errors (fatal at start-up)
// ---------------------------------------------------------------------------

/// A dataset file could not be turned into a table of trade records.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension '.{extension}' for '{}'", path.display())]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("'{}' has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("'{}' row {row}, column '{column}': cannot parse '{raw}'", path.display())]
    InvalidCell {
        path: PathBuf,
        /// 1-based data row, not counting the header.
        row: usize,
        column: &'static str,
        raw: String,
    },

    #[error("malformed CSV in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed Parquet in '{}': {source}", path.display())]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("cannot decode Parquet batch in '{}': {source}", path.display())]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },
}

// ---------------------------------------------------------------------------
// Chart errors (rendered as placeholders)
// ---------------------------------------------------------------------------

/// A chart was handed input it cannot draw.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartRenderError {
    #[error("no data for the current selection")]
    NoData,

    #[error("values do not add up to a positive total")]
    NonPositiveTotal,
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("--preview-rows must be at least 1")]
    PreviewRows,

    #[error("--normalize-factor must be finite and non-zero, got {0}")]
    NormalizeFactor(f64),
}
