use crate::config::TimelineSettings;
use crate::data::StatementTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// y-axis range renderers use for percentages, with headroom on both ends
pub const PERCENT_DISPLAY_RANGE: (f64, f64) = (-10.0, 110.0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyFakeShare {
    pub year: i32,
    pub total_statements: usize,
    pub fake_statements: usize,
    pub percent_fake: f64,
}

/// Share of a speaker's statements per year that fall in the false range.
///
/// Only dated statements from `settings.min_year` onwards count. Unknown
/// speakers give an empty series.
pub fn speaker_yearly_trend(
    table: &StatementTable,
    settings: &TimelineSettings,
    speaker: &str,
) -> Vec<YearlyFakeShare> {
    let mut per_year: BTreeMap<i32, (usize, usize)> = BTreeMap::new();
    for statement in table
        .dated_since(settings.min_year)
        .filter(|s| s.speaker == speaker)
    {
        if let Some(year) = statement.year() {
            let (total, fake) = per_year.entry(year).or_default();
            *total += 1;
            if statement.is_disinformation() {
                *fake += 1;
            }
        }
    }

    per_year
        .into_iter()
        .filter(|&(_, (total, _))| total > 0)
        .map(|(year, (total, fake))| YearlyFakeShare {
            year,
            total_statements: total,
            fake_statements: fake,
            percent_fake: 100.0 * fake as f64 / total as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelSettings;
    use crate::data::Statement;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn statement(speaker: &str, year: i32, label: u8) -> Statement {
        Statement::new(
            speaker,
            "economy",
            "a speech",
            label,
            NaiveDate::from_ymd_opt(year, 3, 15),
            0.5,
            &LabelSettings::default(),
        )
    }

    #[test]
    fn test_percent_per_year() {
        let table: StatementTable = vec![
            statement("ann", 2009, 0),
            statement("ann", 2008, 5),
            statement("ann", 2009, 4),
            statement("ann", 2009, 2),
            statement("ann", 2008, 1),
            statement("ben", 2008, 0),
        ]
        .into_iter()
        .collect();

        let trend = speaker_yearly_trend(&table, &TimelineSettings::default(), "ann");
        assert_eq!(trend.len(), 2);

        assert_eq!(trend[0].year, 2008);
        assert_eq!(trend[0].total_statements, 2);
        assert_eq!(trend[0].fake_statements, 1);
        assert_relative_eq!(trend[0].percent_fake, 50.0);

        assert_eq!(trend[1].year, 2009);
        assert_eq!(trend[1].total_statements, 3);
        assert_eq!(trend[1].fake_statements, 2);
        assert_relative_eq!(trend[1].percent_fake, 100.0 * 2.0 / 3.0);
    }

    #[test]
    fn test_rows_before_min_year_give_empty_trend() {
        let table: StatementTable = vec![statement("old", 2005, 0), statement("old", 2006, 4)]
            .into_iter()
            .collect();
        assert!(speaker_yearly_trend(&table, &TimelineSettings::default(), "old").is_empty());
    }

    #[test]
    fn test_unknown_speaker_and_undated_rows() {
        let labels = LabelSettings::default();
        let table: StatementTable = vec![Statement::new(
            "ann", "economy", "a speech", 0, None, 0.5, &labels,
        )]
        .into_iter()
        .collect();

        let settings = TimelineSettings::default();
        assert!(speaker_yearly_trend(&table, &settings, "ann").is_empty());
        assert!(speaker_yearly_trend(&table, &settings, "nobody").is_empty());
    }
}
