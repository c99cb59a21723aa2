use crate::data::StatementTable;
use chrono::{Duration, Months, NaiveDate};
use ndarray::{s, Array1, ArrayView1};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub rolling_mean_label: f64,
    pub rolling_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTrendView {
    pub points: Vec<DailyPoint>,
    pub range_text: String,
}

/// Smoothed daily truthfulness and statement volume over the whole history.
///
/// Windows are computed once over every dated statement; views only slice
/// the merged series so smoothing stays continuous at the range edges.
#[derive(Debug, Clone)]
pub struct DailyTrend {
    points: Vec<DailyPoint>,
    distinct_dates: usize,
}

impl DailyTrend {
    pub fn compute(table: &StatementTable, window: usize, min_periods: usize) -> Self {
        let mut per_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
        for (statement, date) in table.dated() {
            let (label_sum, count) = per_date.entry(date).or_default();
            *label_sum += f64::from(statement.label);
            *count += 1;
        }

        let dates: Vec<NaiveDate> = per_date.keys().copied().collect();
        let label_means: Array1<f64> = per_date
            .values()
            .map(|&(sum, count)| sum / count as f64)
            .collect();
        let counts: Array1<f64> = per_date.values().map(|&(_, count)| count as f64).collect();

        let smoothed_means = rolling_mean(label_means.view(), window, min_periods);
        let smoothed_counts: HashMap<NaiveDate, f64> = dates
            .iter()
            .zip(rolling_mean(counts.view(), window, min_periods))
            .filter_map(|(&date, value)| value.map(|v| (date, v)))
            .collect();

        // Inner join on date: both smoothed values must exist
        let points = dates
            .iter()
            .zip(smoothed_means)
            .filter_map(|(&date, mean)| {
                let mean = mean?;
                let count = *smoothed_counts.get(&date)?;
                Some(DailyPoint {
                    date,
                    rolling_mean_label: mean,
                    rolling_count: count,
                })
            })
            .collect();

        Self {
            points,
            distinct_dates: dates.len(),
        }
    }

    pub fn points(&self) -> &[DailyPoint] {
        &self.points
    }

    /// Number of distinct dates the windows were computed over
    pub fn distinct_dates(&self) -> usize {
        self.distinct_dates
    }

    /// Points with `start <= date <= end`
    pub fn slice(&self, start: NaiveDate, end: NaiveDate) -> Vec<DailyPoint> {
        self.points
            .iter()
            .filter(|p| p.date >= start && p.date <= end)
            .cloned()
            .collect()
    }

    /// Slices by day offsets from `epoch` and describes the selected range.
    pub fn view(&self, epoch: NaiveDate, start_offset: i64, end_offset: i64) -> DailyTrendView {
        let start = offset_date(epoch, start_offset);
        let end = offset_date(epoch, end_offset);

        DailyTrendView {
            points: self.slice(start, end),
            range_text: format!(
                "Selected range: {} → {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
        }
    }
}

/// Trailing mean over the last `window` observations.
///
/// Positions with fewer than `min_periods` observations in the window have
/// no value.
pub fn rolling_mean(
    values: ArrayView1<f64>,
    window: usize,
    min_periods: usize,
) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let observed = values.slice(s![start..=i]);
            if observed.len() >= min_periods {
                observed.mean()
            } else {
                None
            }
        })
        .collect()
}

pub fn offset_date(epoch: NaiveDate, offset_days: i64) -> NaiveDate {
    Duration::try_days(offset_days)
        .and_then(|delta| epoch.checked_add_signed(delta))
        .unwrap_or(if offset_days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// Width of the date slider in days; 0 when nothing is dated after `epoch`.
pub fn date_span_days(epoch: NaiveDate, max_date: NaiveDate) -> i64 {
    (max_date - epoch).num_days().max(0)
}

/// Slider labels: one per yearly anniversary of `epoch` up to `max_date`,
/// plus the two ends of the range.
pub fn year_marks(epoch: NaiveDate, max_date: NaiveDate) -> BTreeMap<i64, String> {
    let mut marks = BTreeMap::new();

    let mut current = epoch;
    while current <= max_date {
        marks.insert(
            (current - epoch).num_days(),
            current.format(DATE_FORMAT).to_string(),
        );
        match current.checked_add_months(Months::new(12)) {
            Some(next) => current = next,
            None => break,
        }
    }

    marks.insert(0, epoch.format(DATE_FORMAT).to_string());
    if max_date >= epoch {
        marks.insert(
            date_span_days(epoch, max_date),
            max_date.format(DATE_FORMAT).to_string(),
        );
    }
    marks
}
