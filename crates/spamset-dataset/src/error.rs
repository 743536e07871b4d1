use std::io;
use std::path::PathBuf;

/// Failures while turning the raw collection into CSV.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to open '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("malformed input: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write CSV: {0}")]
    Write(#[from] spamset_fs::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failures while reading the processed CSV back for statistics.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to read '{path}': {source}")]
    Open { path: PathBuf, source: csv::Error },

    #[error("malformed dataset row: {0}")]
    Csv(#[from] csv::Error),
}
