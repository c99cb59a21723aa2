pub mod category_ratio;
pub mod credibility;
pub mod daily_trend;
pub mod options;
pub mod ranking;
pub mod speaker_trend;

use crate::data::StatementTable;
use crate::types::CategoryColumn;
use std::collections::HashMap;

/// Group-by accumulator that remembers the order in which keys first appeared.
///
/// Only matches file order when every row is fed in; filtered aggregations
/// go through [`in_file_order`] instead.
#[derive(Debug)]
pub(crate) struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    groups: Vec<(K, V)>,
}

impl<K, V> OrderedGroups<K, V>
where
    K: std::hash::Hash + Eq + Clone,
    V: Default,
{
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    pub(crate) fn entry(&mut self, key: K) -> &mut V {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                self.groups.push((key.clone(), V::default()));
                self.index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx].1
    }

    pub(crate) fn into_vec(self) -> Vec<(K, V)> {
        self.groups
    }
}

/// Lays grouped values out in the order their category first appears in the
/// file. Categories missing from `groups` are skipped.
pub(crate) fn in_file_order<'a, V>(
    table: &'a StatementTable,
    column: CategoryColumn,
    mut groups: HashMap<&'a str, V>,
) -> Vec<(&'a str, V)> {
    table
        .category_values(column)
        .into_iter()
        .filter_map(|category| groups.remove(category).map(|value| (category, value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelSettings;
    use crate::data::Statement;

    #[test]
    fn test_ordered_groups_preserve_first_appearance() {
        let mut groups: OrderedGroups<&str, usize> = OrderedGroups::new();
        for key in ["b", "a", "b", "c", "a", "b"] {
            *groups.entry(key) += 1;
        }
        assert_eq!(groups.into_vec(), vec![("b", 3), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn test_in_file_order_ignores_insertion_order() {
        let labels = LabelSettings::default();
        let table: StatementTable = ["x", "y", "z"]
            .into_iter()
            .map(|speaker| Statement::new(speaker, "economy", "a speech", 3, None, 0.5, &labels))
            .collect();

        let groups: HashMap<&str, usize> = [("z", 1), ("x", 2)].into_iter().collect();
        assert_eq!(
            in_file_order(&table, CategoryColumn::Speaker, groups),
            vec![("x", 2), ("z", 1)]
        );
    }
}
