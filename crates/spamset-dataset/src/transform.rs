use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use spamset_fs::{AtomicWriteOptions, atomic_write};
use tracing::{debug, info};

use crate::error::ParseError;
use crate::record::{Label, RawRecord, Record};

/// Header row of the processed dataset.
pub const CSV_HEADER: [&str; 2] = ["label", "text"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformSummary {
    pub rows: usize,
    pub ham: usize,
    pub spam: usize,
}

/// Parse `<label>\t<text>` lines.
///
/// Quotes are message content, not CSV quoting. Tabs after the first one stay
/// part of the text. A line with no tab keeps its label and gets empty text.
/// Blank lines carry no record.
pub fn read_raw<R: Read>(reader: R) -> Result<Vec<RawRecord>, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() < 2 {
            debug!(line = ?record.position().map(|p| p.line()), "raw line has no tab, text is empty");
        }
        let label = record.get(0).unwrap_or_default().to_string();
        let text = record.iter().skip(1).collect::<Vec<_>>().join("\t");
        records.push(RawRecord { label, text });
    }

    Ok(records)
}

pub fn read_raw_file(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_raw(BufReader::new(file))
}

/// Serialize records as CSV with a `label,text` header, in order.
pub fn encode_csv(records: &[Record]) -> Result<Vec<u8>, ParseError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.into_inner().map_err(|e| ParseError::Io(e.into_error()))
}

/// Convert the raw collection at `raw_path` into the processed CSV at `csv_path`.
///
/// The CSV is placed atomically; a failure never leaves a partial file at
/// `csv_path`.
pub fn transform_file(
    raw_path: impl AsRef<Path>,
    csv_path: impl AsRef<Path>,
) -> Result<TransformSummary, ParseError> {
    let raw_path = raw_path.as_ref();
    let csv_path = csv_path.as_ref();

    let records: Vec<Record> = read_raw_file(raw_path)?
        .into_iter()
        .map(Record::from)
        .collect();
    debug!(source = %raw_path.display(), rows = records.len(), "parsed raw collection");

    let bytes = encode_csv(&records)?;
    atomic_write(csv_path, &bytes, AtomicWriteOptions::new())?;

    let spam = records.iter().filter(|r| r.label == Label::Spam).count();
    let summary = TransformSummary {
        rows: records.len(),
        ham: records.len() - spam,
        spam,
    };

    info!(
        csv = %csv_path.display(),
        rows = summary.rows,
        spam = summary.spam,
        "processed dataset written"
    );
    Ok(summary)
}
