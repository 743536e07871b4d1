//! ZIP extraction with path sanitization.
//!
//! # Architecture
//!
//! - `extract.rs` - Entry iteration and file placement
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `report.rs` - What was written where

pub use error::{ArchiveError, Result};
pub use extract::{ZipExtractor, extract_file};
pub use report::{ArchiveReport, ExtractedEntry};
pub use sanitize::{SanitizedPath, sanitize_path};

mod error;
mod extract;
mod report;
mod sanitize;
