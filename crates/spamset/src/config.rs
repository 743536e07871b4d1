use std::path::{Path, PathBuf};

use spamset_fetch::Timeouts;

/// Where the UCI repository publishes the collection.
pub const SOURCE_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/00228/smsspamcollection.zip";

pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Downloaded archive, removed once the CSV exists.
pub const ARCHIVE_FILE: &str = "smsspamcollection.zip";
/// Tab-separated collection inside the archive, kept after processing.
pub const RAW_FILE: &str = "SMSSpamCollection";
pub const CSV_FILE: &str = "sms_spam_collection.csv";

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub source_url: String,
    pub timeouts: Timeouts,
    /// Draw a download progress bar on stderr.
    pub progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            source_url: SOURCE_URL.to_string(),
            timeouts: Timeouts::default(),
            progress: true,
        }
    }
}

impl PipelineConfig {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    pub fn paths(&self) -> DatasetPaths {
        DatasetPaths::new(&self.output_dir)
    }
}

/// Fixed file layout under the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetPaths {
    pub archive: PathBuf,
    pub raw: PathBuf,
    pub csv: PathBuf,
}

impl DatasetPaths {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            archive: output_dir.join(ARCHIVE_FILE),
            raw: output_dir.join(RAW_FILE),
            csv: output_dir.join(CSV_FILE),
        }
    }
}
