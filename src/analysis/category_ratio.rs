use super::OrderedGroups;
use crate::data::StatementTable;
use crate::types::CategoryColumn;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRatio {
    pub category: String,
    pub total: usize,
    pub disinfo_count: usize,
    pub disinfo_ratio: f64,
}

#[derive(Debug, Default)]
struct Tally {
    total: usize,
    disinfo: usize,
}

/// Disinformation ratio per category, most disinformation-prone first.
///
/// Categories with fewer than `min_support` rows are dropped; the threshold is
/// inclusive. Equal ratios keep the order in which categories first appear.
pub fn category_ratios(
    table: &StatementTable,
    column: CategoryColumn,
    min_support: usize,
) -> Vec<CategoryRatio> {
    aggregate(table, column, min_support, |_| true)
}

/// Same as [`category_ratios`], restricted to rows whose category is listed.
pub fn category_ratios_within(
    table: &StatementTable,
    column: CategoryColumn,
    categories: &[String],
    min_support: usize,
) -> Vec<CategoryRatio> {
    let selected: HashSet<&str> = categories.iter().map(String::as_str).collect();
    aggregate(table, column, min_support, |category| {
        selected.contains(category)
    })
}

fn aggregate<F>(
    table: &StatementTable,
    column: CategoryColumn,
    min_support: usize,
    keep: F,
) -> Vec<CategoryRatio>
where
    F: Fn(&str) -> bool,
{
    let mut groups: OrderedGroups<&str, Tally> = OrderedGroups::new();
    for statement in table {
        let category = statement.category(column);
        if !keep(category) {
            continue;
        }
        let tally = groups.entry(category);
        tally.total += 1;
        if statement.is_disinformation() {
            tally.disinfo += 1;
        }
    }

    let mut ratios: Vec<CategoryRatio> = groups
        .into_vec()
        .into_iter()
        .filter(|(_, tally)| tally.total >= min_support)
        .map(|(category, tally)| CategoryRatio {
            category: category.to_string(),
            total: tally.total,
            disinfo_count: tally.disinfo,
            disinfo_ratio: tally.disinfo as f64 / tally.total as f64,
        })
        .collect();

    // sort_by is stable, so ties stay in first-appearance order
    ratios.sort_by(|a, b| b.disinfo_ratio.total_cmp(&a.disinfo_ratio));
    ratios
}
