//! Chart implementations and the fixed chart set of an analysis run

pub mod bar;
pub mod histogram;
pub mod line;
pub mod utils;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dv_core::ContentType;
use dv_data::TitleTable;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

pub use bar::{BarChart, Orientation};
pub use histogram::{HistogramPanel, PanelHistogram};
pub use line::YearLineChart;

use crate::export::{export_plot, ChartOptions, ExportablePlot};
use crate::stats::{genre_counts, rating_counts, type_counts};
use utils::{NETFLIX_DARK, NETFLIX_RED};

pub const TYPE_DISTRIBUTION: &str = "type_distribution";
pub const RATINGS_DISTRIBUTION: &str = "ratings_distribution";
pub const TOP_GENRES: &str = "top_genres";
pub const CONTENT_ADDED_BY_YEAR: &str = "content_added_by_year";
pub const DURATION_ANALYSIS: &str = "duration_analysis";

const MOVIE_DURATION_BINS: usize = 20;
const TV_SEASON_BINS: usize = 10;

/// Captions, axis descriptions and tick labels need a font backend
pub(crate) const DRAW_TEXT: bool = cfg!(feature = "ttf");

/// Upper bound for a count axis, leaving room above the tallest bar
pub(crate) fn headroom(max: u32) -> u32 {
    max.saturating_add(max / 10).saturating_add(1)
}

/// Count as a chart coordinate, saturating at `u32::MAX`
pub(crate) fn count_coord(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Label area sizes of a chart frame, `(x, y)`
pub(crate) type LabelAreas = (u32, u32);

/// Chart frame on `area`. The caption is only set when text can be drawn.
pub(crate) fn chart_frame<'a, 'b, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    title: &str,
    font_size: u32,
    margin: u32,
    (x_area, y_area): LabelAreas,
) -> ChartBuilder<'a, 'b, DB> {
    let mut builder = ChartBuilder::on(area);
    builder.margin(margin);
    if DRAW_TEXT {
        builder
            .caption(title, ("sans-serif", font_size).into_font())
            .x_label_area_size(x_area)
            .y_label_area_size(y_area);
    }
    builder
}

/// What happened to one chart
#[derive(Debug)]
pub enum ChartOutcome {
    Saved(PathBuf),
    Skipped { chart: &'static str, reason: &'static str },
    Failed { chart: &'static str, error: anyhow::Error },
}

impl ChartOutcome {
    pub fn saved_path(&self) -> Option<&Path> {
        match self {
            ChartOutcome::Saved(path) => Some(path),
            _ => None,
        }
    }
}

fn export_or_skip<P: ExportablePlot>(plot: &P, is_empty: bool, reason: &'static str, dir: &Path, options: &ChartOptions) -> ChartOutcome {
    if is_empty {
        info!(chart = plot.file_stem(), reason, "skipping chart");
        return ChartOutcome::Skipped { chart: plot.file_stem(), reason };
    }

    match export_plot(plot, dir, options) {
        Ok(path) => ChartOutcome::Saved(path),
        Err(error) => {
            warn!(chart = plot.file_stem(), "chart failed: {error:#}");
            ChartOutcome::Failed { chart: plot.file_stem(), error }
        }
    }
}

pub fn type_distribution_chart(table: &TitleTable) -> BarChart {
    BarChart::new(
        TYPE_DISTRIBUTION,
        "Distribution of Movies vs TV Shows on Netflix",
        &type_counts(table),
        Orientation::Vertical,
    )
    .with_axes("Content Type", "Count")
    .with_categorical_colors()
}

pub fn ratings_chart(table: &TitleTable) -> BarChart {
    BarChart::new(
        RATINGS_DISTRIBUTION,
        "Distribution of Ratings on Netflix",
        &rating_counts(table),
        Orientation::Horizontal,
    )
    .with_axes("Count", "Rating")
    .with_reds_ramp()
}

pub fn top_genres_chart(table: &TitleTable) -> BarChart {
    BarChart::new(
        TOP_GENRES,
        "Top 10 Genres on Netflix",
        &genre_counts(table).top(10),
        Orientation::Horizontal,
    )
    .with_axes("Count", "Genre")
}

pub fn added_by_year_chart(by_year: &BTreeMap<i32, usize>) -> YearLineChart {
    YearLineChart::new(CONTENT_ADDED_BY_YEAR, "Netflix Content Added by Year", by_year)
        .with_axes("Year", "Number of Titles Added")
}

/// Movie minutes and TV show seasons, side by side. Null durations are left out.
pub fn duration_chart(table: &TitleTable) -> PanelHistogram {
    let durations = |kind: ContentType| -> Vec<f64> {
        table
            .iter()
            .filter(|record| record.content_type() == Some(kind))
            .filter_map(|record| record.duration_value)
            .map(f64::from)
            .collect()
    };

    PanelHistogram::new(
        DURATION_ANALYSIS,
        vec![
            HistogramPanel::new("Movie Duration (minutes)", durations(ContentType::Movie), MOVIE_DURATION_BINS, NETFLIX_RED)
                .with_x_desc("Duration (min)"),
            HistogramPanel::new("TV Show Seasons", durations(ContentType::TvShow), TV_SEASON_BINS, NETFLIX_DARK)
                .with_x_desc("Number of Seasons"),
        ],
    )
}

/// Render the five charts of a run into `dir`.
///
/// Each chart is independent: an empty input skips it and a drawing error is
/// recorded without stopping the others. The year chart is only attempted
/// when `added_by_year` is present.
pub fn render_charts(
    table: &TitleTable,
    added_by_year: Option<&BTreeMap<i32, usize>>,
    dir: &Path,
    options: &ChartOptions,
) -> Vec<ChartOutcome> {
    let mut outcomes = Vec::with_capacity(5);

    let types = type_distribution_chart(table);
    outcomes.push(export_or_skip(&types, types.is_empty(), "no content types", dir, options));

    let ratings = ratings_chart(table);
    outcomes.push(export_or_skip(&ratings, ratings.is_empty(), "no ratings", dir, options));

    let genres = top_genres_chart(table);
    outcomes.push(export_or_skip(&genres, genres.is_empty(), "no genres", dir, options));

    if let Some(by_year) = added_by_year {
        let added = added_by_year_chart(by_year);
        outcomes.push(export_or_skip(&added, added.is_empty(), "no valid added dates", dir, options));
    }

    let durations = duration_chart(table);
    outcomes.push(export_or_skip(&durations, durations.is_empty(), "no durations", dir, options));

    outcomes
}
