//! Exploration, charts and insights for the Netflix titles analysis

pub mod export;
pub mod plots;
pub mod stats;

pub use export::{export_plot, ChartOptions, ExportFormat, ExportablePlot};
pub use plots::{render_charts, ChartOutcome};
pub use stats::{
    added_by_year, country_counts, describe, genre_counts, rating_counts, type_counts, ColumnStats,
    DescribeTable, Insights, SchemaInfo, ValueCounts,
};
