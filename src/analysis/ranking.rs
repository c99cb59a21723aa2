use super::in_file_order;
use crate::data::StatementTable;
use crate::types::{CategoryColumn, DisinfoFlag};
use serde::Serialize;
use std::collections::HashMap;

/// Categories ranked by how many disinformation statements they carry.
///
/// Produced by [`disinformation_ranking`] and handed to the views that need
/// the same categorical axis order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOrdering {
    column: CategoryColumn,
    categories: Vec<String>,
    disinfo_counts: Vec<usize>,
}

impl CategoryOrdering {
    pub fn column(&self) -> CategoryColumn {
        self.column
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Disinformation rows per category, parallel to [`Self::categories`]
    pub fn disinfo_counts(&self) -> &[usize] {
        &self.disinfo_counts
    }

    /// The first `n` categories, or all of them when `n` exceeds the length
    pub fn top(&self, n: usize) -> &[String] {
        &self.categories[..n.min(self.categories.len())]
    }

    /// Clamps a requested count to `[1, len]`; an empty ordering gives 0.
    pub fn clamp(&self, n: usize) -> usize {
        if self.categories.is_empty() {
            0
        } else {
            n.clamp(1, self.categories.len())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagCount {
    pub category: String,
    pub flag: DisinfoFlag,
    pub count: usize,
}

pub fn disinformation_ranking(table: &StatementTable, column: CategoryColumn) -> CategoryOrdering {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for statement in table.iter().filter(|s| s.is_disinformation()) {
        *counts.entry(statement.category(column)).or_default() += 1;
    }

    // Stable sort over file order: equal counts keep first appearance in the file
    let mut ranked = in_file_order(table, column, counts);
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let (categories, disinfo_counts): (Vec<String>, Vec<usize>) = ranked
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .unzip();

    CategoryOrdering {
        column,
        categories,
        disinfo_counts,
    }
}

/// Row counts per (category, flag) for the top `n` categories of `ordering`.
///
/// Categories follow the ordering; within a category disinformation comes
/// before truth. Pairs with no rows are omitted. `n` is expected to be
/// validated by the caller (see [`CategoryOrdering::clamp`]).
pub fn grouped_flag_counts(
    table: &StatementTable,
    ordering: &CategoryOrdering,
    n: usize,
) -> Vec<FlagCount> {
    let selected = ordering.top(n);
    let position: HashMap<&str, usize> = selected
        .iter()
        .enumerate()
        .map(|(i, category)| (category.as_str(), i))
        .collect();

    // [disinformation, truth] per selected category
    let mut counts = vec![[0usize; 2]; selected.len()];
    for statement in table {
        if let Some(&idx) = position.get(statement.category(ordering.column)) {
            let slot = match statement.flag() {
                DisinfoFlag::Disinformation => 0,
                DisinfoFlag::Truth => 1,
            };
            counts[idx][slot] += 1;
        }
    }

    selected
        .iter()
        .zip(counts)
        .flat_map(|(category, [disinfo, truth])| {
            [
                (DisinfoFlag::Disinformation, disinfo),
                (DisinfoFlag::Truth, truth),
            ]
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(move |(flag, count)| FlagCount {
                category: category.clone(),
                flag,
                count,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelSettings;
    use crate::data::Statement;

    fn table(rows: &[(&str, u8)]) -> StatementTable {
        let labels = LabelSettings::default();
        rows.iter()
            .map(|&(context, label)| {
                Statement::new("someone", "economy", context, label, None, 0.5, &labels)
            })
            .collect()
    }

    fn sample() -> StatementTable {
        table(&[
            ("tweet", 5),
            ("speech", 0),
            ("tweet", 1),
            ("ad", 2),
            ("speech", 1),
            ("ad", 0),
            ("speech", 4),
            ("debate", 5),
        ])
    }

    #[test]
    fn test_ranking_descending_with_first_appearance_ties() {
        let ordering = disinformation_ranking(&sample(), CategoryColumn::Context);

        // speech: 2, ad: 2, tweet: 1; debate has no disinformation rows
        assert_eq!(ordering.categories(), ["speech", "ad", "tweet"]);
        assert_eq!(ordering.disinfo_counts(), [2, 2, 1]);
        assert_eq!(ordering.column(), CategoryColumn::Context);
    }

    #[test]
    fn test_ties_follow_file_order_not_disinformation_order() {
        // "tweet" appears first in the file, "ad" has the first false row
        let table = table(&[("tweet", 5), ("ad", 0), ("tweet", 0)]);
        assert_eq!(
            table.category_values(CategoryColumn::Context),
            vec!["tweet", "ad"]
        );

        let ordering = disinformation_ranking(&table, CategoryColumn::Context);
        assert_eq!(ordering.categories(), ["tweet", "ad"]);

        let counts = grouped_flag_counts(&table, &ordering, 2);
        assert_eq!(counts[0].category, "tweet");
        assert_eq!(counts[0].flag, DisinfoFlag::Disinformation);
    }

    #[test]
    fn test_clamp() {
        let ordering = disinformation_ranking(&sample(), CategoryColumn::Context);
        assert_eq!(ordering.clamp(0), 1);
        assert_eq!(ordering.clamp(2), 2);
        assert_eq!(ordering.clamp(99), 3);

        let empty = disinformation_ranking(&table(&[("tweet", 5)]), CategoryColumn::Context);
        assert!(empty.is_empty());
        assert_eq!(empty.clamp(5), 0);
    }

    #[test]
    fn test_grouped_counts_follow_ordering() {
        let table = sample();
        let ordering = disinformation_ranking(&table, CategoryColumn::Context);
        let counts = grouped_flag_counts(&table, &ordering, 2);

        let expected = vec![
            ("speech", DisinfoFlag::Disinformation, 2),
            ("speech", DisinfoFlag::Truth, 1),
            ("ad", DisinfoFlag::Disinformation, 2),
        ];
        let actual: Vec<_> = counts
            .iter()
            .map(|c| (c.category.as_str(), c.flag, c.count))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_smaller_n_is_prefix_of_larger_n() {
        let table = sample();
        let ordering = disinformation_ranking(&table, CategoryColumn::Context);

        let categories = |n| {
            let mut seen: Vec<String> = Vec::new();
            for count in grouped_flag_counts(&table, &ordering, n) {
                if !seen.contains(&count.category) {
                    seen.push(count.category);
                }
            }
            seen
        };

        for n1 in 1..=ordering.len() {
            for n2 in n1..=ordering.len() {
                let small = categories(n1);
                let large = categories(n2);
                assert_eq!(&large[..small.len()], small.as_slice());
            }
        }
    }
}
