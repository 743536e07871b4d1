//! Fetch the UCI SMS Spam Collection, convert it to a `label,text` CSV and
//! print summary statistics.
//!
//! # Architecture
//!
//! - [`config`] - Output layout and pipeline settings
//! - [`pipeline`] - Stage sequencing and cache checks
//! - [`ui`] - Download progress bar
//!
//! Network, archive and dataset work live in the `spamset-fetch`,
//! `spamset-archive` and `spamset-dataset` crates.

pub mod config;
mod error;
pub mod pipeline;
pub mod ui;

use std::path::PathBuf;

use spamset_fetch::{FetchOptions, ReqwestClient};
use tracing::error;

pub use config::{DatasetPaths, PipelineConfig};
pub use error::PipelineError;
pub use pipeline::Pipeline;

/// Prepare the dataset under `config.output_dir` and print its statistics to
/// stdout.
///
/// Returns the CSV path, or `None` after printing a diagnostic if any stage
/// failed.
pub fn download_sms_dataset(config: &PipelineConfig) -> Option<PathBuf> {
    let client = match ReqwestClient::with_timeouts(config.timeouts) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            println!("✗ failed to build HTTP client: {e}");
            return None;
        }
    };

    let mut pipeline = Pipeline::new(config.clone(), client);
    if config.progress {
        let tracker = ui::ProgressTracker::new("Downloading");
        pipeline = pipeline.with_fetch_options(FetchOptions::default().on_progress(tracker.into_callback()));
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline.run(&mut out).ok()
}
