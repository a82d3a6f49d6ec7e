//! Frequency tables

use std::collections::BTreeMap;
use std::fmt;

use dv_data::TitleTable;
use indexmap::IndexMap;

/// Counts per distinct value, most frequent first. Ties keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueCounts {
    /// Name printed under the table
    name: String,
    entries: Vec<(String, usize)>,
}

impl ValueCounts {
    pub fn from_values<I, S>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for value in values {
            *counts.entry(value.as_ref().to_string()).or_insert(0) += 1;
        }

        let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
        // Stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            name: name.to_string(),
            entries,
        }
    }

    /// Keep only the `n` most frequent values
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    pub fn get(&self, value: &str) -> usize {
        self.entries
            .iter()
            .find(|(label, _)| label == value)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn most_common(&self) -> Option<&str> {
        self.entries.first().map(|(label, _)| label.as_str())
    }

    pub fn max_count(&self) -> usize {
        self.entries.first().map(|(_, count)| *count).unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl fmt::Display for ValueCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.name.len());

        writeln!(f, "{}", self.name)?;
        for (label, count) in &self.entries {
            writeln!(f, "{label:<width$}    {count}")?;
        }
        write!(f, "Name: count, dtype: int64")
    }
}

/// `type` value counts
pub fn type_counts(table: &TitleTable) -> ValueCounts {
    ValueCounts::from_values("type", table.iter().filter_map(|r| r.kind.as_deref()))
}

/// `rating` value counts
pub fn rating_counts(table: &TitleTable) -> ValueCounts {
    ValueCounts::from_values("rating", table.iter().map(|r| r.rating.as_str()))
}

/// `country` value counts
pub fn country_counts(table: &TitleTable) -> ValueCounts {
    ValueCounts::from_values("country", table.iter().map(|r| r.country.as_str()))
}

/// Genre counts; a title listing several genres counts once for each
pub fn genre_counts(table: &TitleTable) -> ValueCounts {
    ValueCounts::from_values("listed_in", table.iter().flat_map(|r| r.genres()))
}

/// Titles added per year, ascending by year.
///
/// `None` when no row has a valid `date_added`.
pub fn added_by_year(table: &TitleTable) -> Option<BTreeMap<i32, usize>> {
    let mut years = BTreeMap::new();
    for year in table.iter().filter_map(|r| r.year_added()) {
        *years.entry(year).or_insert(0) += 1;
    }

    if years.is_empty() {
        None
    } else {
        Some(years)
    }
}
