pub mod loader;
pub mod table;

use crate::config::LabelSettings;
use crate::types::{CategoryColumn, DisinfoFlag};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::ops::RangeInclusive;
use thiserror::Error;

pub use table::StatementTable;

/// A row exactly as it appears in the CSV; unknown columns are ignored.
#[derive(Debug, Deserialize)]
pub struct RawStatement {
    pub label: u8,
    pub speaker: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub date: String,
    pub credibility_score: f64,
    #[serde(default)]
    pub disinfo: Option<u8>,
}

/// One labeled political statement
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub speaker: String,
    pub subject: String,
    pub context: String,
    pub label: u8,
    pub date: Option<NaiveDate>,
    pub credibility_score: f64,
    false_range: RangeInclusive<u8>,
}

impl Statement {
    pub fn new(
        speaker: impl Into<String>,
        subject: impl Into<String>,
        context: impl Into<String>,
        label: u8,
        date: Option<NaiveDate>,
        credibility_score: f64,
        labels: &LabelSettings,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            subject: subject.into(),
            context: context.into(),
            label,
            date,
            credibility_score,
            false_range: labels.false_range(),
        }
    }

    /// Derived from the current label on every call
    pub fn flag(&self) -> DisinfoFlag {
        DisinfoFlag::from_label(self.label, &self.false_range)
    }

    pub fn is_disinformation(&self) -> bool {
        self.flag() == DisinfoFlag::Disinformation
    }

    pub fn category(&self, column: CategoryColumn) -> &str {
        match column {
            CategoryColumn::Speaker => &self.speaker,
            CategoryColumn::Subject => &self.subject,
            CategoryColumn::Context => &self.context,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Invalid label {label} on line {line}: expected a code between 0 and 5")]
    InvalidLabel { line: u64, label: u8 },
    #[error("Invalid credibility score {score} on line {line}")]
    InvalidScore { line: u64, score: f64 },
}

pub type Result<T> = std::result::Result<T, DataError>;
