//! Chart export functionality

use std::path::{Path, PathBuf};

use anyhow::Context;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

/// Export options for charts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    /// Width of the exported image
    pub width: u32,
    /// Height of the exported image
    pub height: u32,
    /// Output format
    pub format: ExportFormat,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            format: ExportFormat::Png,
        }
    }
}

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }
}

/// Trait for exportable charts
pub trait ExportablePlot {
    /// File name without extension
    fn file_stem(&self) -> &'static str;

    /// Draw the chart onto a cleared drawing area
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB::ErrorType: 'static;
}

/// Path a chart is written to
pub fn chart_path(plot: &impl ExportablePlot, dir: &Path, options: &ChartOptions) -> PathBuf {
    dir.join(format!("{}.{}", plot.file_stem(), options.format.extension()))
}

/// Render `plot` to `dir` and return the written path.
///
/// The backend is dropped before returning, so the file is complete.
pub fn export_plot(plot: &impl ExportablePlot, dir: &Path, options: &ChartOptions) -> anyhow::Result<PathBuf> {
    let path = chart_path(plot, dir, options);
    let size = (options.width, options.height);

    match options.format {
        ExportFormat::Png => {
            let root = BitMapBackend::new(&path, size).into_drawing_area();
            render(plot, &root)?;
        }
        ExportFormat::Svg => {
            let root = SVGBackend::new(&path, size).into_drawing_area();
            render(plot, &root)?;
        }
    }

    info!("Exported chart to: {:?}", path);
    Ok(path)
}

fn render<DB: DrawingBackend>(plot: &impl ExportablePlot, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    plot.draw(root)
        .with_context(|| format!("drawing {}", plot.file_stem()))?;
    root.present()
        .with_context(|| format!("saving {}", plot.file_stem()))?;
    Ok(())
}
