use super::{DataError, RawStatement, Result, Statement, StatementTable};
use crate::config::LabelSettings;
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const REQUIRED_COLUMNS: [&str; 6] = [
    "label",
    "speaker",
    "subject",
    "context",
    "date",
    "credibility_score",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

const MAX_LABEL: u8 = 5;

pub struct DataLoader;

impl DataLoader {
    fn verify_required_columns(headers: &StringRecord) -> Result<()> {
        let headers_set: HashSet<&str> = headers.iter().collect();

        for column in REQUIRED_COLUMNS {
            if !headers_set.contains(column) {
                return Err(DataError::MissingColumn(column.to_string()));
            }
        }
        Ok(())
    }

    /// Parses the loosely formatted date column; anything unrecognised becomes `None`.
    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    pub fn load<P: AsRef<Path>>(path: P, labels: &LabelSettings) -> Result<StatementTable> {
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)?;

        info!("Loading statements from {}", path.as_ref().display());
        Self::read_statements(rdr, labels)
    }

    pub fn from_reader<R: Read>(reader: R, labels: &LabelSettings) -> Result<StatementTable> {
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        Self::read_statements(rdr, labels)
    }

    fn read_statements<R: Read>(
        mut rdr: csv::Reader<R>,
        labels: &LabelSettings,
    ) -> Result<StatementTable> {
        let headers = rdr.headers()?.clone();
        Self::verify_required_columns(&headers)?;

        let mut statements = Vec::new();
        let mut bad_dates = 0usize;
        let mut flag_mismatches = 0usize;

        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let raw: RawStatement = record.deserialize(Some(&headers))?;

            if raw.label > MAX_LABEL {
                return Err(DataError::InvalidLabel {
                    line,
                    label: raw.label,
                });
            }
            if !(0.0..=1.0).contains(&raw.credibility_score) {
                return Err(DataError::InvalidScore {
                    line,
                    score: raw.credibility_score,
                });
            }

            let date = Self::parse_date(&raw.date);
            if date.is_none() {
                debug!(line, date = %raw.date, "Unparseable statement date");
                bad_dates += 1;
            }

            let statement = Statement::new(
                raw.speaker,
                raw.subject,
                raw.context,
                raw.label,
                date,
                raw.credibility_score,
                labels,
            );

            if let Some(code) = raw.disinfo {
                if code != statement.flag().as_code() {
                    flag_mismatches += 1;
                }
            }

            statements.push(statement);
        }

        if flag_mismatches > 0 {
            warn!(
                "{} rows carry a disinfo code that disagrees with their label; using the label",
                flag_mismatches
            );
        }

        info!(
            rows = statements.len(),
            undated = bad_dates,
            "Loaded statement table"
        );

        Ok(StatementTable::new(statements))
    }
}
