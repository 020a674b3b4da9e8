use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the vote tally pipeline.
#[derive(Error, Debug)]
pub enum TallyError {
    /// No input file could be located for a required table keyword.
    #[error("No CSV file matching '{keyword}' found in {dir}")]
    MissingInput { keyword: String, dir: PathBuf },

    /// A required column is absent from an input table's header row.
    #[error("Required column '{column}' missing from {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A file could not be parsed as CSV.
    #[error("Failed to parse {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A join-key cell did not hold an integer.
    #[error("Invalid value '{value}' in column '{column}' of {path}")]
    InvalidCell {
        column: String,
        value: String,
        path: PathBuf,
    },

    /// A summary table could not be written to disk.
    #[error("Failed to write {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the tally crates.
pub type Result<T> = std::result::Result<T, TallyError>;
