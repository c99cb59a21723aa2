//! Values the dashboard controls are built from: selectable years, the
//! speaker dropdown and its default, and the date slider span.

use super::in_file_order;
use crate::config::TimelineSettings;
use crate::data::StatementTable;
use crate::types::CategoryColumn;
use std::collections::{BTreeSet, HashMap};

/// Distinct years with dated statements, from `settings.min_year` on, ascending
pub fn available_years(table: &StatementTable, settings: &TimelineSettings) -> Vec<i32> {
    table
        .dated_since(settings.min_year)
        .filter_map(|s| s.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted distinct speakers of the yearly views
pub fn speaker_options(table: &StatementTable, settings: &TimelineSettings) -> Vec<String> {
    table
        .dated_since(settings.min_year)
        .map(|s| s.speaker.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Speaker with the most statements in the yearly views; ties go to the
/// speaker that appears first in the file.
pub fn default_speaker(table: &StatementTable, settings: &TimelineSettings) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for statement in table.dated_since(settings.min_year) {
        *counts.entry(statement.speaker.as_str()).or_default() += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (speaker, count) in in_file_order(table, CategoryColumn::Speaker, counts) {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((speaker, count));
        }
    }
    best.map(|(speaker, _)| speaker.to_string())
}
