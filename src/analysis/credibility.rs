use super::in_file_order;
use crate::config::TimelineSettings;
use crate::data::StatementTable;
use crate::types::CategoryColumn;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerFrequency {
    pub speaker: String,
    pub frequency: usize,
    pub credibility_score: f64,
}

#[derive(Debug, Default)]
struct SpeakerTally {
    frequency: usize,
    credibility_score: Option<f64>,
}

/// Most active speakers of `year` with their credibility score.
///
/// Keeps at most `settings.top_speakers` speakers (most frequent first, ties
/// by first appearance in the file) and returns them in ascending frequency order for
/// plotting. Years before `settings.min_year` or without statements give an
/// empty result.
pub fn speaker_frequency(
    table: &StatementTable,
    settings: &TimelineSettings,
    year: i32,
) -> Vec<SpeakerFrequency> {
    let mut groups: HashMap<&str, SpeakerTally> = HashMap::new();
    for statement in table
        .dated_since(settings.min_year)
        .filter(|s| s.year() == Some(year))
    {
        let tally = groups.entry(statement.speaker.as_str()).or_default();
        tally.frequency += 1;
        // One score per speaker; later duplicates are not summed
        tally.credibility_score.get_or_insert(statement.credibility_score);
    }

    let mut speakers = in_file_order(table, CategoryColumn::Speaker, groups);
    speakers.sort_by(|a, b| b.1.frequency.cmp(&a.1.frequency));
    speakers.truncate(settings.top_speakers);
    speakers.sort_by_key(|(_, tally)| tally.frequency);

    speakers
        .into_iter()
        .map(|(speaker, tally)| SpeakerFrequency {
            speaker: speaker.to_string(),
            frequency: tally.frequency,
            credibility_score: tally.credibility_score.unwrap_or_default(),
        })
        .collect()
}
