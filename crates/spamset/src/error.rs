use std::io;
use std::path::PathBuf;

use spamset_archive::ArchiveError;
use spamset_dataset::{ParseError, ReportError};
use spamset_fetch::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to prepare output directory: {0}")]
    OutputDir(#[source] spamset_fs::Error),

    #[error("download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ArchiveError),

    #[error("{name} not found under {}", .root.display())]
    MissingPayload { name: &'static str, root: PathBuf },

    #[error("failed to search for the collection: {0}")]
    Lookup(#[source] spamset_fs::Error),

    #[error("processing failed: {0}")]
    Transform(#[from] ParseError),

    #[error("failed to read dataset: {0}")]
    Report(#[from] ReportError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}
