//! Line chart implementation

use std::collections::BTreeMap;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::export::ExportablePlot;
use crate::plots::{chart_frame, count_coord, headroom, DRAW_TEXT};
use crate::plots::utils::NETFLIX_RED;

/// Yearly counts drawn as a line with point markers
#[derive(Debug, Clone)]
pub struct YearLineChart {
    file_stem: &'static str,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// `(year, count)` ascending by year
    pub points: Vec<(i32, u32)>,
}

impl YearLineChart {
    pub fn new(file_stem: &'static str, title: impl Into<String>, by_year: &BTreeMap<i32, usize>) -> Self {
        Self {
            file_stem,
            title: title.into(),
            x_desc: "Year".to_string(),
            y_desc: "Count".to_string(),
            points: by_year.iter().map(|(year, count)| (*year, count_coord(*count))).collect(),
        }
    }

    pub fn with_axes(mut self, x_desc: impl Into<String>, y_desc: impl Into<String>) -> Self {
        self.x_desc = x_desc.into();
        self.y_desc = y_desc.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Year range with at least one year of width
    fn year_range(&self) -> std::ops::Range<i32> {
        let first = self.points.first().map(|(year, _)| *year).unwrap_or(0);
        let last = self.points.last().map(|(year, _)| *year).unwrap_or(first);
        first..last.max(first + 1)
    }
}

impl ExportablePlot for YearLineChart {
    fn file_stem(&self) -> &'static str {
        self.file_stem
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB::ErrorType: 'static,
    {
        let max = self.points.iter().map(|(_, count)| *count).max().unwrap_or(0);
        let years = self.year_range();

        let mut chart = chart_frame(root, &self.title, 24, 20, (40, 60))
            .build_cartesian_2d(years.clone(), 0u32..headroom(max))?;

        if DRAW_TEXT {
            chart
                .configure_mesh()
                .x_labels(years.len() + 1)
                .x_label_formatter(&|year| year.to_string())
                .light_line_style(BLACK.mix(0.05))
                .x_desc(self.x_desc.as_str())
                .y_desc(self.y_desc.as_str())
                .draw()?;
        }

        chart.draw_series(LineSeries::new(
            self.points.iter().copied(),
            NETFLIX_RED.stroke_width(2),
        ))?;
        chart.draw_series(
            self.points
                .iter()
                .map(|&point| Circle::new(point, 4, NETFLIX_RED.filled())),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{export_plot, ChartOptions};

    #[test]
    fn test_points_follow_years() {
        let by_year = BTreeMap::from([(2019, 4), (2017, 2), (2021, 1)]);
        let chart = YearLineChart::new("added", "Added", &by_year);
        assert_eq!(chart.points, vec![(2017, 2), (2019, 4), (2021, 1)]);
        assert_eq!(chart.year_range(), 2017..2021);
    }

    #[test]
    fn test_single_year_range_is_widened() {
        let chart = YearLineChart::new("added", "Added", &BTreeMap::from([(2020, 3)]));
        assert_eq!(chart.year_range(), 2020..2021);

        let dir = tempfile::tempdir().unwrap();
        let path = export_plot(&chart, dir.path(), &ChartOptions::default()).unwrap();
        assert!(path.exists());
    }
}
