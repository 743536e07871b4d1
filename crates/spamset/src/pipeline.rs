use std::io::Write;
use std::path::PathBuf;

use spamset_archive::{ArchiveError, extract_file};
use spamset_dataset::{DatasetStats, group_thousands, transform_file, write_report};
use spamset_fetch::{FetchError, FetchOptions, Fetcher, HttpClient};
use spamset_fs::{ensure_dir, find_by_name, remove_file_if_exists};
use tracing::{debug, error, info, warn};

use crate::config::{DatasetPaths, PipelineConfig, RAW_FILE};
use crate::error::PipelineError;

const BANNER_WIDTH: usize = 60;

/// Fetch, extract, transform, report. Each stage is skipped when its output
/// is already on disk.
pub struct Pipeline<C: HttpClient> {
    config: PipelineConfig,
    paths: DatasetPaths,
    fetcher: Fetcher<C>,
}

impl<C: HttpClient> Pipeline<C> {
    pub fn new(config: PipelineConfig, client: C) -> Self {
        let paths = config.paths();
        Self {
            config,
            paths,
            fetcher: Fetcher::new(client),
        }
    }

    pub fn with_fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetcher = self.fetcher.with_options(options);
        self
    }

    /// Run every pending stage, then print statistics to `out`.
    ///
    /// Returns the CSV path. On failure a diagnostic line is written to `out`
    /// before the error is returned.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<PathBuf, PipelineError> {
        match self.try_run(out) {
            Ok(csv) => Ok(csv),
            Err(e) => {
                error!(error = %e, "pipeline failed");
                let _ = writeln!(out, "✗ {e}");
                Err(e)
            }
        }
    }

    fn try_run<W: Write>(&self, out: &mut W) -> Result<PathBuf, PipelineError> {
        ensure_dir(&self.config.output_dir).map_err(PipelineError::OutputDir)?;

        banner(out, "DOWNLOADING SMS SPAM COLLECTION DATASET")?;
        writeln!(out)?;

        if self.paths.csv.is_file() {
            info!(csv = %self.paths.csv.display(), "processed dataset already present");
            writeln!(out, "Dataset already exists at: {}\n", self.paths.csv.display())?;
        } else {
            self.prepare(out)?;
        }

        let stats = DatasetStats::from_csv(&self.paths.csv)?;
        write_report(&stats, &mut *out)?;

        Ok(self.paths.csv.clone())
    }

    fn prepare<W: Write>(&self, out: &mut W) -> Result<(), PipelineError> {
        let raw = match self.locate_raw()? {
            Some(raw) => {
                info!(raw = %raw.display(), "reusing extracted collection");
                writeln!(out, "Using extracted collection: {}\n", raw.display())?;
                raw
            }
            None => {
                self.ensure_archive(out)?;
                self.extract(out)?
            }
        };

        writeln!(out, "Processing dataset...")?;
        let summary = transform_file(&raw, &self.paths.csv)?;
        writeln!(
            out,
            "✓ Dataset processed and saved: {} ({} rows)\n",
            self.paths.csv.display(),
            group_thousands(summary.rows)
        )?;

        match remove_file_if_exists(&self.paths.archive) {
            Ok(true) => debug!(archive = %self.paths.archive.display(), "removed archive"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "could not remove archive"),
        }

        Ok(())
    }

    fn ensure_archive<W: Write>(&self, out: &mut W) -> Result<(), PipelineError> {
        let archive = &self.paths.archive;
        if archive.is_file() {
            info!(archive = %archive.display(), "archive already downloaded");
            writeln!(out, "Using downloaded archive: {}\n", archive.display())?;
            return Ok(());
        }

        writeln!(out, "Downloading dataset from: {}", self.config.source_url)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(FetchError::from)?;
        runtime.block_on(self.fetcher.fetch(&self.config.source_url, archive))?;
        writeln!(out, "✓ Archive downloaded: {}\n", archive.display())?;

        Ok(())
    }

    fn extract<W: Write>(&self, out: &mut W) -> Result<PathBuf, PipelineError> {
        writeln!(out, "Extracting files...")?;
        let report = match extract_file(&self.paths.archive, &self.config.output_dir) {
            Ok(report) => report,
            Err(e @ ArchiveError::Corrupted(_)) => {
                // A cached archive that cannot be read must be fetched again.
                if let Err(remove_err) = remove_file_if_exists(&self.paths.archive) {
                    warn!(error = %remove_err, "could not remove corrupted archive");
                }
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        debug!(
            entries = report.entry_count,
            files = report.files().count(),
            bytes = report.total_bytes,
            "extraction report"
        );

        if self.paths.raw.is_file() {
            writeln!(out, "✓ Files extracted: {}\n", self.paths.raw.display())?;
            return Ok(self.paths.raw.clone());
        }

        writeln!(out, "✗ {} not found, searching {}", self.paths.raw.display(), self.config.output_dir.display())?;
        let raw = self.locate_raw()?.ok_or_else(|| PipelineError::MissingPayload {
            name: RAW_FILE,
            root: self.config.output_dir.clone(),
        })?;
        writeln!(out, "   Found at: {}\n", raw.display())?;

        Ok(raw)
    }

    fn locate_raw(&self) -> Result<Option<PathBuf>, PipelineError> {
        find_by_name(&self.config.output_dir, RAW_FILE).map_err(PipelineError::Lookup)
    }
}

fn banner<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")
}
