//! File names and constants for one analysis run

use std::path::{Path, PathBuf};

use dv_data::{NullConfig, SampleSpec};
use dv_views::ChartOptions;

pub const INPUT_FILE: &str = "Netflix_shows_movies.csv";
pub const CLEANED_FILE: &str = "Netflix_shows_movies_cleaned.csv";
pub const LOG_FILE: &str = "analysis_output.txt";

/// Everything a run reads or writes
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub cleaned_path: PathBuf,
    pub log_path: PathBuf,
    pub chart_dir: PathBuf,
    pub chart_options: ChartOptions,
    pub sample: SampleSpec,
    pub null_config: NullConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl AnalysisConfig {
    /// Fixed file names rooted at `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            input_path: dir.join(INPUT_FILE),
            cleaned_path: dir.join(CLEANED_FILE),
            log_path: dir.join(LOG_FILE),
            chart_dir: dir.to_path_buf(),
            chart_options: ChartOptions::default(),
            sample: SampleSpec::default(),
            null_config: NullConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_working_directory() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_path, Path::new(".").join("Netflix_shows_movies.csv"));
        assert_eq!(config.log_path, Path::new(".").join("analysis_output.txt"));
        assert_eq!(config.sample.rows, 100);
        assert_eq!(config.sample.seed, 42);
        assert_eq!(config.chart_options.width, 1000);
    }

    #[test]
    fn test_in_dir() {
        let config = AnalysisConfig::in_dir("/tmp/run");
        assert_eq!(config.cleaned_path, Path::new("/tmp/run/Netflix_shows_movies_cleaned.csv"));
        assert_eq!(config.chart_dir, Path::new("/tmp/run"));
    }
}
