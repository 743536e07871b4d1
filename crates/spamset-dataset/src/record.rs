use std::fmt;

use serde::{Deserialize, Serialize};

/// Message class. Encoded as `0` (ham) and `1` (spam) in the processed CSV.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    Ham,
    Spam,
}

impl Label {
    /// Map a raw label. Only the exact string `spam` is spam; everything else,
    /// including unknown or malformed labels, is ham.
    pub fn from_raw(raw: &str) -> Self {
        if raw == "spam" { Label::Spam } else { Label::Ham }
    }

    pub fn code(self) -> u8 {
        match self {
            Label::Ham => 0,
            Label::Spam => 1,
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLabelCode(pub u8);

impl fmt::Display for InvalidLabelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "label code must be 0 or 1, got {}", self.0)
    }
}

impl std::error::Error for InvalidLabelCode {}

impl TryFrom<u8> for Label {
    type Error = InvalidLabelCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Label::Ham),
            1 => Ok(Label::Spam),
            other => Err(InvalidLabelCode(other)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Ham => write!(f, "HAM"),
            Label::Spam => write!(f, "SPAM"),
        }
    }
}

/// One line of the raw collection, label still unmapped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    pub label: String,
    pub text: String,
}

/// One row of the processed dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub label: Label,
    pub text: String,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Record {
            label: Label::from_raw(&raw.label),
            text: raw.text,
        }
    }
}
