//! Headline figures for the end of a run

use std::fmt;

use dv_core::ContentType;
use dv_data::TitleTable;

use super::counts::{rating_counts, type_counts};
use crate::plots::utils::mean;

/// Titles released within this many years of the current year count as recent
pub const RECENT_WINDOW_YEARS: i32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub total: usize,
    pub movies_pct: f64,
    pub tv_shows_pct: f64,
    pub most_common_rating: Option<String>,
    /// Mean of `current_year - release_year` over rows with a year
    pub average_age: Option<f64>,
    /// Share of all rows released inside [`RECENT_WINDOW_YEARS`]; `None`
    /// when no row has a year
    pub recent_pct: Option<f64>,
}

impl Insights {
    pub fn compute(table: &TitleTable, current_year: i32) -> Self {
        let total = table.len();
        let types = type_counts(table);
        let share = |kind: ContentType| {
            if total == 0 {
                0.0
            } else {
                types.get(kind.label()) as f64 * 100.0 / total as f64
            }
        };

        let ages: Vec<f64> = table
            .iter()
            .filter_map(|record| record.age(current_year))
            .map(f64::from)
            .collect();
        let recent = table
            .iter()
            .filter_map(|record| record.release_year)
            .filter(|year| *year >= current_year - RECENT_WINDOW_YEARS)
            .count();
        let recent_pct = if ages.is_empty() {
            None
        } else {
            Some(recent as f64 * 100.0 / total as f64)
        };

        Self {
            total,
            movies_pct: share(ContentType::Movie),
            tv_shows_pct: share(ContentType::TvShow),
            most_common_rating: rating_counts(table).most_common().map(str::to_string),
            average_age: mean(&ages),
            recent_pct,
        }
    }
}

impl fmt::Display for Insights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            ">>> Movies represent {:.1}% of content, TV Shows {:.1}%",
            self.movies_pct, self.tv_shows_pct
        )?;
        write!(
            f,
            "\n>>> Most common rating: {}",
            self.most_common_rating.as_deref().unwrap_or("N/A")
        )?;
        if let Some(age) = self.average_age {
            write!(f, "\n\n>>> Average content age: {age:.1} years")?;
        }
        if let Some(recent) = self.recent_pct {
            write!(
                f,
                "\n\n>>> {recent:.1}% of content is from the last {RECENT_WINDOW_YEARS} years"
            )?;
        }
        Ok(())
    }
}
