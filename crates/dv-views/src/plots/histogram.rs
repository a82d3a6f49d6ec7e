//! Histogram implementation

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::export::ExportablePlot;
use crate::plots::{chart_frame, count_coord, headroom, DRAW_TEXT};
use crate::plots::utils::{histogram_bins, Bin};

/// One histogram panel
#[derive(Debug, Clone)]
pub struct HistogramPanel {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub num_bins: usize,
    pub color: RGBColor,
    pub values: Vec<f64>,
}

impl HistogramPanel {
    pub fn new(title: impl Into<String>, values: Vec<f64>, num_bins: usize, color: RGBColor) -> Self {
        Self {
            title: title.into(),
            x_desc: String::new(),
            y_desc: "Count".to_string(),
            num_bins,
            color,
            values,
        }
    }

    pub fn with_x_desc(mut self, x_desc: impl Into<String>) -> Self {
        self.x_desc = x_desc.into();
        self
    }

    pub fn bins(&self) -> Vec<Bin> {
        histogram_bins(&self.values, self.num_bins)
    }

    fn draw_on<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB::ErrorType: 'static,
    {
        let bins = self.bins();
        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            // Nothing to plot; the panel stays blank
            return Ok(());
        };
        let max = bins.iter().map(|bin| count_coord(bin.count)).max().unwrap_or(0);

        let mut chart = chart_frame(area, &self.title, 20, 15, (35, 45))
            .build_cartesian_2d(first.start..last.end, 0u32..headroom(max))?;

        if DRAW_TEXT {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_label_formatter(&|x| format!("{x:.0}"))
                .x_desc(self.x_desc.as_str())
                .y_desc(self.y_desc.as_str())
                .draw()?;
        }

        let style = self.color.mix(0.7).filled();
        chart.draw_series(bins.iter().filter(|bin| bin.count > 0).map(|bin| {
            Rectangle::new([(bin.start, 0u32), (bin.end, count_coord(bin.count))], style)
        }))?;

        Ok(())
    }
}

/// Histograms drawn side by side, one panel each
#[derive(Debug, Clone)]
pub struct PanelHistogram {
    file_stem: &'static str,
    pub panels: Vec<HistogramPanel>,
}

impl PanelHistogram {
    pub fn new(file_stem: &'static str, panels: Vec<HistogramPanel>) -> Self {
        Self { file_stem, panels }
    }

    /// True when no panel has any value
    pub fn is_empty(&self) -> bool {
        self.panels.iter().all(|panel| panel.values.is_empty())
    }
}

impl ExportablePlot for PanelHistogram {
    fn file_stem(&self) -> &'static str {
        self.file_stem
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB::ErrorType: 'static,
    {
        if self.panels.is_empty() {
            return Ok(());
        }

        let areas = root.split_evenly((1, self.panels.len()));
        for (panel, area) in self.panels.iter().zip(areas.iter()) {
            panel.draw_on(area)?;
        }

        Ok(())
    }
}
