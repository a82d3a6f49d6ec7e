//! The analysis run, stage by stage

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use chrono::{Datelike, NaiveDateTime};
use dv_data::{clean, CleanReport, DatasetOrigin, TitleSource, TitleTable};
use dv_views::{
    added_by_year, country_counts, describe, rating_counts, render_charts, type_counts, ChartOutcome,
    DescribeTable, Insights, SchemaInfo,
};
use tracing::{error, info, warn};

use crate::config::AnalysisConfig;

/// Rows shown in the table preview
const HEAD_ROWS: usize = 5;
const TOP_COUNTRIES: usize = 10;

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// The dataset could not be read; nothing after loading ran
    LoadFailed,
}

#[derive(Debug)]
pub struct RunSummary {
    pub origin: DatasetOrigin,
    pub clean: CleanReport,
    pub charts: Vec<PathBuf>,
    pub insights: Insights,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run every stage, writing the report to `out`.
///
/// Only a failed load stops the run. Later stages that fail are reported
/// and skipped.
pub fn run(config: &AnalysisConfig, out: &mut impl Write, now: NaiveDateTime) -> Result<RunOutcome> {
    writeln!(out, "=== Netflix Data Analysis ===\n")?;
    writeln!(out, "Analysis date: {}\n", now.format("%Y-%m-%d %H:%M:%S"))?;

    // Load
    let source = TitleSource::new(&config.input_path).with_null_config(config.null_config.clone());
    if !source.path().exists() {
        writeln!(out, ">>> {} not found. Creating a sample dataset...\n", source.source_name())?;
    }

    let dataset = match source.obtain(&config.sample) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!(path = %source.path().display(), "failed to load dataset: {e}");
            writeln!(out, ">>> Error loading dataset: {e}\n")?;
            return Ok(RunOutcome::LoadFailed);
        }
    };
    if let DatasetOrigin::Generated { rows } = dataset.origin {
        writeln!(
            out,
            ">>> Sample dataset with {rows} entries created and saved as {}\n",
            source.source_name()
        )?;
    }

    let raw = dataset.table;
    info!(rows = raw.row_count(), columns = raw.column_count(), "dataset loaded");
    writeln!(
        out,
        ">>> Dataset loaded successfully with {} rows and {} columns\n",
        raw.row_count(),
        raw.column_count()
    )?;

    // Clean
    writeln!(out, ">>> Checking missing values before cleaning:")?;
    writeln!(out, "{}\n", raw.null_counts)?;

    let (table, report) = clean(raw);
    writeln!(
        out,
        ">>> Dropped {} rows with missing ratings\n",
        report.dropped_missing_rating
    )?;

    match table.write_csv(&config.cleaned_path) {
        Ok(()) => writeln!(
            out,
            ">>> Data cleaned and saved to {}\n",
            file_name(&config.cleaned_path)
        )?,
        Err(e) => {
            warn!(path = %config.cleaned_path.display(), "failed to save cleaned data: {e}");
            writeln!(out, ">>> Could not save cleaned data: {e}\n")?;
        }
    }

    // Explore
    let by_year = explore(&table, out)?;

    // Visualize
    writeln!(out, ">>> Generating plots...\n")?;
    let outcomes = render_charts(&table, by_year.as_ref(), &config.chart_dir, &config.chart_options);
    let charts = report_charts(&outcomes, out)?;

    // Insights
    writeln!(out, ">>> Additional Insights:\n")?;
    let insights = Insights::compute(&table, now.year());
    writeln!(out, "{insights}\n")?;

    writeln!(out, "=== Analysis Completed ===")?;
    out.flush()?;
    info!(charts = charts.len(), rows = table.len(), "analysis completed");

    Ok(RunOutcome::Completed(RunSummary {
        origin: dataset.origin,
        clean: report,
        charts,
        insights,
    }))
}

/// Print the exploration tables. Returns the per-year added counts.
fn explore(table: &TitleTable, out: &mut impl Write) -> Result<Option<BTreeMap<i32, usize>>> {
    match table.to_record_batch() {
        Ok(batch) => print_batch_summary(&batch, out)?,
        Err(e) => {
            warn!("failed to build columnar view: {e}");
            writeln!(out, ">>> Could not summarize the dataset: {e}\n")?;
        }
    }

    writeln!(out, ">>> Type Distribution (Movie vs TV Show):")?;
    writeln!(out, "{}\n", type_counts(table))?;

    writeln!(out, ">>> Ratings Distribution:")?;
    writeln!(out, "{}\n", rating_counts(table))?;

    writeln!(out, ">>> Top {TOP_COUNTRIES} Countries with most content:")?;
    writeln!(out, "{}\n", country_counts(table).top(TOP_COUNTRIES))?;

    let by_year = added_by_year(table);
    if let Some(years) = &by_year {
        writeln!(out, ">>> Content added by year:")?;
        writeln!(out, "year_added")?;
        for (year, count) in years {
            writeln!(out, "{year:<10}    {count}")?;
        }
        writeln!(out, "Name: count, dtype: int64\n")?;
    }

    Ok(by_year)
}

fn print_batch_summary(batch: &RecordBatch, out: &mut impl Write) -> Result<()> {
    writeln!(out, ">>> Dataset Info:")?;
    writeln!(out, "{}\n", SchemaInfo::from_batch(batch))?;

    writeln!(out, ">>> Summary Statistics:")?;
    let stats = describe(batch);
    writeln!(out, "{}\n", DescribeTable(&stats))?;

    let head = batch.slice(0, HEAD_ROWS.min(batch.num_rows()));
    match pretty_format_batches(&[head]) {
        Ok(preview) => {
            writeln!(out, ">>> First {HEAD_ROWS} rows:")?;
            writeln!(out, "{preview}\n")?;
        }
        Err(e) => warn!("failed to format preview: {e}"),
    }

    Ok(())
}

/// Print what happened to each chart. Returns the files written.
fn report_charts(outcomes: &[ChartOutcome], out: &mut impl Write) -> Result<Vec<PathBuf>> {
    for outcome in outcomes {
        match outcome {
            ChartOutcome::Saved(_) => {}
            ChartOutcome::Skipped { chart, reason } => {
                writeln!(out, ">>> Skipped {chart}: {reason}\n")?;
            }
            ChartOutcome::Failed { chart, error } => {
                writeln!(out, ">>> Could not create {chart}: {error:#}\n")?;
            }
        }
    }

    let saved: Vec<PathBuf> = outcomes
        .iter()
        .filter_map(ChartOutcome::saved_path)
        .map(Path::to_path_buf)
        .collect();
    let names: Vec<String> = saved.iter().map(|path| file_name(path)).collect();
    if names.is_empty() {
        writeln!(out, ">>> No plots saved\n")?;
    } else {
        writeln!(out, ">>> Plots saved: {}\n", names.join(", "))?;
    }

    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    #[test]
    fn test_run_generates_sample_and_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::in_dir(dir.path());
        let mut out = Vec::new();

        let outcome = run(&config, &mut out, now()).unwrap();
        let RunOutcome::Completed(summary) = outcome else {
            panic!("run did not complete");
        };

        assert_eq!(summary.origin, DatasetOrigin::Generated { rows: 100 });
        assert_eq!(summary.clean.rows_before, 100);
        assert!(config.input_path.exists());
        assert!(config.cleaned_path.exists());
        assert_eq!(summary.charts.len(), 5);
        for chart in &summary.charts {
            assert!(chart.exists(), "{}", chart.display());
        }
        assert!((summary.insights.movies_pct + summary.insights.tv_shows_pct - 100.0).abs() < 1e-6);

        let report = String::from_utf8(out).unwrap();
        assert!(report.starts_with("=== Netflix Data Analysis ===\n\nAnalysis date: 2025-03-14 09:30:00\n"));
        assert!(report.contains(">>> Netflix_shows_movies.csv not found. Creating a sample dataset..."));
        assert!(report.contains(">>> Sample dataset with 100 entries created and saved as Netflix_shows_movies.csv"));
        assert!(report.contains(">>> Dataset loaded successfully with 100 rows and 11 columns"));
        assert!(report.contains(">>> Plots saved: type_distribution.png, ratings_distribution.png"));
        assert!(report.trim_end().ends_with("=== Analysis Completed ==="));
    }

    #[test]
    fn test_second_run_loads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::in_dir(dir.path());

        run(&config, &mut Vec::new(), now()).unwrap();
        let first = std::fs::read(&config.input_path).unwrap();

        let mut out = Vec::new();
        let outcome = run(&config, &mut out, now()).unwrap();
        assert!(matches!(
            outcome,
            RunOutcome::Completed(RunSummary { origin: DatasetOrigin::Loaded, .. })
        ));
        assert_eq!(std::fs::read(&config.input_path).unwrap(), first);
        assert!(!String::from_utf8(out).unwrap().contains("not found"));
    }

    #[test]
    fn test_missing_ratings_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::in_dir(dir.path());
        std::fs::write(
            &config.input_path,
            "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in\n\
             s1,Movie,A,,,,\"January 5, 2019\",2018,PG,90 min,Dramas\n\
             s2,TV Show,B,Jo,Al,USA,,2020,,2 Seasons,Kids' TV\n\
             s3,Movie,C,,,,2020-02-01,2015,R,100 min,\"Dramas, Comedies\"\n",
        )
        .unwrap();

        let mut out = Vec::new();
        let RunOutcome::Completed(summary) = run(&config, &mut out, now()).unwrap() else {
            panic!("run did not complete");
        };
        assert_eq!(summary.clean.dropped_missing_rating, 1);

        let cleaned = std::fs::read_to_string(&config.cleaned_path).unwrap();
        let rows: Vec<&str> = cleaned.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("s1,Movie,A,Unknown,Unknown,Unknown,"));
        assert!(rows[1].starts_with("s3,Movie,C,Unknown,Unknown,Unknown,"));

        let report = String::from_utf8(out).unwrap();
        assert!(report.contains(">>> Dropped 1 rows with missing ratings"));
        assert!(report.contains(">>> Content added by year:"));
    }

    #[test]
    fn test_cleaned_file_keeps_fixed_columns() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::in_dir(dir.path());
        std::fs::write(
            &config.input_path,
            "show_id,type,title,rating,duration,description\n\
             s1,Movie,A,PG,90 min,An extra column\n",
        )
        .unwrap();

        let mut out = Vec::new();
        let outcome = run(&config, &mut out, now()).unwrap();
        assert!(matches!(outcome, RunOutcome::Completed(_)));

        let cleaned = std::fs::read_to_string(&config.cleaned_path).unwrap();
        let header = cleaned.lines().next().unwrap();
        assert_eq!(
            header,
            "show_id,type,title,director,cast,country,date_added,release_year,rating,\
             duration,listed_in,date_added_valid,duration_value,duration_type"
        );
        assert!(!cleaned.contains("An extra column"));
    }

    #[test]
    fn test_failed_chart_keeps_running() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::in_dir(dir.path());
        // A directory in place of the PNG makes that save fail
        std::fs::create_dir(dir.path().join("type_distribution.png")).unwrap();

        let mut out = Vec::new();
        let RunOutcome::Completed(summary) = run(&config, &mut out, now()).unwrap() else {
            panic!("run did not complete");
        };
        assert_eq!(summary.charts.len(), 4);
        assert!(dir.path().join("ratings_distribution.png").exists());

        let report = String::from_utf8(out).unwrap();
        assert!(report.contains(">>> Could not create type_distribution"), "{report}");
        assert!(report.contains(">>> Additional Insights:"));
        assert!(report.contains("=== Analysis Completed ==="));
    }

    #[test]
    fn test_no_valid_dates_skips_year_chart() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::in_dir(dir.path());
        std::fs::write(
            &config.input_path,
            "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in\n\
             s1,Movie,A,X,Y,USA,someday,2018,PG,90 min,Dramas\n",
        )
        .unwrap();

        let mut out = Vec::new();
        let RunOutcome::Completed(summary) = run(&config, &mut out, now()).unwrap() else {
            panic!("run did not complete");
        };
        assert_eq!(summary.charts.len(), 4);
        assert!(!dir.path().join("content_added_by_year.png").exists());
        assert!(!String::from_utf8(out).unwrap().contains("Content added by year"));
    }

    #[test]
    fn test_malformed_csv_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::in_dir(dir.path());
        std::fs::write(&config.input_path, "show_id,type\ns1,Movie,extra\n").unwrap();

        let mut out = Vec::new();
        let outcome = run(&config, &mut out, now()).unwrap();
        assert!(matches!(outcome, RunOutcome::LoadFailed));
        assert!(!config.cleaned_path.exists());

        let report = String::from_utf8(out).unwrap();
        assert!(report.contains(">>> Error loading dataset:"));
        assert!(!report.contains("Analysis Completed"));
    }
}
