//! Netflix titles analysis entry point

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod pipeline;
mod tee;

use config::AnalysisConfig;
use pipeline::RunOutcome;
use tee::SessionLog;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_session(config: &AnalysisConfig) -> Result<ExitCode> {
    let mut log = SessionLog::create(&config.log_path)
        .with_context(|| format!("creating {}", config.log_path.display()))?;

    let outcome = pipeline::run(config, &mut log, Local::now().naive_local());
    log.close()
        .with_context(|| format!("closing {}", config.log_path.display()))?;

    match outcome? {
        RunOutcome::Completed(summary) => {
            info!(
                origin = ?summary.origin,
                rows = summary.clean.rows_after(),
                charts = summary.charts.len(),
                most_common_rating = summary.insights.most_common_rating.as_deref().unwrap_or("N/A"),
                "run finished"
            );
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::LoadFailed => Ok(ExitCode::from(1)),
    }
}

fn main() -> ExitCode {
    init_tracing();

    info!("Starting Netflix titles analysis");

    match run_session(&AnalysisConfig::default()) {
        Ok(code) => code,
        Err(e) => {
            error!("analysis aborted: {e:#}");
            ExitCode::FAILURE
        }
    }
}
