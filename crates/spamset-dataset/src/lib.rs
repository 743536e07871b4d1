//! The SMS Spam Collection as data: raw `<label>\t<text>` lines in, a
//! `label,text` CSV out, and summary statistics over the result.

pub use error::{ParseError, ReportError};
pub use record::{InvalidLabelCode, Label, RawRecord, Record};
pub use stats::{ClassStats, DatasetStats, group_thousands, write_report};
pub use transform::{CSV_HEADER, TransformSummary, encode_csv, read_raw, read_raw_file, transform_file};

mod error;
mod record;
mod stats;
mod transform;
