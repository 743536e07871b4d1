use std::io::{self, Write};
use std::path::Path;

use crate::error::ReportError;
use crate::record::{Label, Record};

const RULE_WIDTH: usize = 60;

/// Aggregates for one label class.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassStats {
    pub count: usize,
    /// Sum of message lengths in Unicode scalar values.
    pub total_chars: usize,
    /// First message of this class in file order.
    pub example: Option<String>,
}

impl ClassStats {
    fn add(&mut self, text: String) {
        self.count += 1;
        self.total_chars += text.chars().count();
        if self.example.is_none() {
            self.example = Some(text);
        }
    }

    pub fn mean_length(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total_chars as f64 / self.count as f64)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetStats {
    pub total: usize,
    pub ham: ClassStats,
    pub spam: ClassStats,
}

impl DatasetStats {
    pub fn from_records<I: IntoIterator<Item = Record>>(records: I) -> Self {
        let mut stats = DatasetStats::default();
        for record in records {
            stats.total += 1;
            match record.label {
                Label::Ham => stats.ham.add(record.text),
                Label::Spam => stats.spam.add(record.text),
            }
        }
        stats
    }

    /// Read the processed CSV at `path` and aggregate it.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|source| ReportError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let records = reader
            .deserialize::<Record>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_records(records))
    }

    pub fn class(&self, label: Label) -> &ClassStats {
        match label {
            Label::Ham => &self.ham,
            Label::Spam => &self.spam,
        }
    }

    /// Share of `label` in percent, `0.0` for an empty dataset.
    pub fn percentage(&self, label: Label) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.class(label).count as f64 / self.total as f64 * 100.0
        }
    }
}

/// Render the human-readable summary.
pub fn write_report<W: Write>(stats: &DatasetStats, mut out: W) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{rule}")?;
    writeln!(out, "DATASET STATISTICS")?;
    writeln!(out, "{rule}")?;

    writeln!(out)?;
    writeln!(out, "Total messages: {}", group_thousands(stats.total))?;
    writeln!(
        out,
        "Legitimate messages (HAM): {} ({:.1}%)",
        group_thousands(stats.ham.count),
        stats.percentage(Label::Ham)
    )?;
    writeln!(
        out,
        "SPAM messages: {} ({:.1}%)",
        group_thousands(stats.spam.count),
        stats.percentage(Label::Spam)
    )?;

    writeln!(out)?;
    writeln!(out, "Mean message length:")?;
    writeln!(out, "  HAM:  {}", format_mean(stats.ham.mean_length()))?;
    writeln!(out, "  SPAM: {}", format_mean(stats.spam.mean_length()))?;

    writeln!(out)?;
    writeln!(out, "Dataset examples:")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    writeln!(out)?;
    writeln!(out, "SPAM example:")?;
    writeln!(out, "  {}", format_example(stats.spam.example.as_deref()))?;

    writeln!(out)?;
    writeln!(out, "HAM example (legitimate):")?;
    writeln!(out, "  {}", format_example(stats.ham.example.as_deref()))?;

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;
    Ok(())
}

fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(m) => format!("{m:.0} characters"),
        None => "n/a".to_string(),
    }
}

fn format_example(example: Option<&str>) -> String {
    match example {
        Some(text) => format!("'{text}'"),
        None => "n/a".to_string(),
    }
}

/// `1234567` → `1,234,567`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
