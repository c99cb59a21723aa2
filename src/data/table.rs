use super::Statement;
use crate::types::CategoryColumn;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Immutable in-memory statement table, in file order.
#[derive(Debug, Clone, Default)]
pub struct StatementTable {
    statements: Vec<Statement>,
}

impl StatementTable {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Rows with a usable date, paired with that date
    pub fn dated(&self) -> impl Iterator<Item = (&Statement, NaiveDate)> {
        self.statements
            .iter()
            .filter_map(|s| s.date.map(|date| (s, date)))
    }

    /// Dated rows from `min_year` onwards
    pub fn dated_since(&self, min_year: i32) -> impl Iterator<Item = &Statement> {
        self.statements
            .iter()
            .filter(move |s| s.year().is_some_and(|year| year >= min_year))
    }

    pub fn undated_count(&self) -> usize {
        self.statements.iter().filter(|s| s.date.is_none()).count()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.dated().map(|(_, date)| date).max()
    }

    /// Distinct values of a column in order of first appearance
    pub fn category_values(&self, column: CategoryColumn) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.statements
            .iter()
            .map(|s| s.category(column))
            .filter(|value| seen.insert(*value))
            .collect()
    }
}

impl<'a> IntoIterator for &'a StatementTable {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

impl FromIterator<Statement> for StatementTable {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelSettings;

    fn statement(speaker: &str, date: Option<(i32, u32, u32)>) -> Statement {
        Statement::new(
            speaker,
            "taxes",
            "a speech",
            3,
            date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            0.5,
            &LabelSettings::default(),
        )
    }

    #[test]
    fn test_category_values_keep_first_appearance_order() {
        let table: StatementTable = vec![
            statement("zed", None),
            statement("amy", None),
            statement("zed", None),
            statement("bob", None),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            table.category_values(CategoryColumn::Speaker),
            vec!["zed", "amy", "bob"]
        );
    }

    #[test]
    fn test_dated_views() {
        let table: StatementTable = vec![
            statement("a", Some((2006, 5, 1))),
            statement("b", None),
            statement("c", Some((2009, 1, 2))),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.dated().count(), 2);
        assert_eq!(table.dated_since(2007).count(), 1);
        assert_eq!(table.undated_count(), 1);
        assert_eq!(table.max_date(), NaiveDate::from_ymd_opt(2009, 1, 2));
    }
}
