use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ArchiveError, Result};
use crate::report::{ArchiveReport, ExtractedEntry};
use crate::sanitize::sanitize_path;

pub struct ZipExtractor;

impl ZipExtractor {
    /// Unpack every entry of the archive read from `reader` under `destination`.
    ///
    /// Existing files are overwritten.
    pub fn extract<R: Read + Seek>(&self, reader: R, destination: &Path) -> Result<ArchiveReport> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let mut report = ArchiveReport::default();

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;

            let raw_path = PathBuf::from(file.name());
            if raw_path.as_os_str().is_empty() {
                return Err(ArchiveError::InvalidPath { index });
            }
            let sanitized = sanitize_path(&raw_path, destination)?;
            let target = &sanitized.resolved;
            let size = file.size();
            let is_dir = file.is_dir();

            if is_dir {
                create_dir(target)?;
            } else {
                if let Some(parent) = target.parent() {
                    create_dir(parent)?;
                }

                let mut out_file = File::create(target).map_err(|e| ArchiveError::ExtractionFailed {
                    path: target.clone(),
                    source: e,
                })?;
                std::io::copy(&mut file, &mut out_file).map_err(|e| ArchiveError::ExtractionFailed {
                    path: target.clone(),
                    source: e,
                })?;
            }

            debug!(entry = %raw_path.display(), size, is_dir, "extracted entry");
            report.push(ExtractedEntry {
                original_path: sanitized.original,
                target_path: sanitized.resolved,
                size,
                is_directory: is_dir,
            });
        }

        info!(
            destination = %destination.display(),
            entries = report.entry_count,
            bytes = report.total_bytes,
            "archive extracted"
        );
        Ok(report)
    }
}

/// Open the ZIP file at `archive_path` and unpack it under `destination`.
pub fn extract_file(archive_path: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<ArchiveReport> {
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path).map_err(|e| ArchiveError::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    debug!(archive = %archive_path.display(), "opening archive");
    ZipExtractor.extract(BufReader::new(file), destination.as_ref())
}

fn create_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|e| ArchiveError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
