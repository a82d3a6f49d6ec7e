//! Bar chart implementation

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::export::ExportablePlot;
use crate::plots::utils::{categorical_color, reds_reversed_palette, NETFLIX_RED};
use crate::plots::{chart_frame, count_coord, headroom, DRAW_TEXT};
use crate::stats::ValueCounts;

/// Direction the bars grow in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along X, counts up the Y axis
    Vertical,
    /// Categories down the Y axis, most frequent at the top
    Horizontal,
}

/// Bar chart of category counts
#[derive(Debug, Clone)]
pub struct BarChart {
    file_stem: &'static str,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub orientation: Orientation,
    /// Bars in display order, most frequent first
    pub bars: Vec<(String, u32)>,
    /// One color per bar
    pub colors: Vec<RGBColor>,
}

impl BarChart {
    pub fn new(file_stem: &'static str, title: impl Into<String>, counts: &ValueCounts, orientation: Orientation) -> Self {
        let bars: Vec<(String, u32)> = counts
            .iter()
            .map(|(label, count)| (label.to_string(), count_coord(count)))
            .collect();
        let colors = vec![NETFLIX_RED; bars.len()];

        Self {
            file_stem,
            title: title.into(),
            x_desc: String::new(),
            y_desc: String::new(),
            orientation,
            bars,
            colors,
        }
    }

    pub fn with_axes(mut self, x_desc: impl Into<String>, y_desc: impl Into<String>) -> Self {
        self.x_desc = x_desc.into();
        self.y_desc = y_desc.into();
        self
    }

    /// Alternate through the brand colors
    pub fn with_categorical_colors(mut self) -> Self {
        self.colors = (0..self.bars.len()).map(categorical_color).collect();
        self
    }

    /// Shade bars from dark to pale red in display order
    pub fn with_reds_ramp(mut self) -> Self {
        self.colors = reds_reversed_palette(self.bars.len());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    fn max_count(&self) -> u32 {
        self.bars.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }

    /// Bar index drawn at axis slot `slot`
    fn bar_at(&self, slot: u32) -> Option<usize> {
        let slot = slot as usize;
        let idx = match self.orientation {
            Orientation::Vertical => Some(slot),
            // Slot 0 is the bottom of the Y axis
            Orientation::Horizontal => self.bars.len().checked_sub(slot + 1),
        };
        idx.filter(|idx| *idx < self.bars.len())
    }

    fn slot_label(&self, value: &SegmentValue<u32>) -> String {
        match value {
            SegmentValue::CenterOf(slot) | SegmentValue::Exact(slot) => self
                .bar_at(*slot)
                .map(|idx| self.bars[idx].0.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        }
    }

    fn slot_style(&self, value: &SegmentValue<u32>) -> ShapeStyle {
        let color = match value {
            SegmentValue::CenterOf(slot) | SegmentValue::Exact(slot) => self
                .bar_at(*slot)
                .and_then(|idx| self.colors.get(idx).copied()),
            SegmentValue::Last => None,
        };
        color.unwrap_or(NETFLIX_RED).filled()
    }

    /// `(slot, count)` pairs in axis order
    fn slots(&self) -> Vec<(u32, u32)> {
        (0..count_coord(self.bars.len()))
            .filter_map(|slot| self.bar_at(slot).map(|idx| (slot, self.bars[idx].1)))
            .collect()
    }

    fn draw_vertical<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB::ErrorType: 'static,
    {
        let slots = count_coord(self.bars.len());
        let mut chart = chart_frame(root, &self.title, 24, 20, (40, 60))
            .build_cartesian_2d((0u32..slots).into_segmented(), 0u32..headroom(self.max_count()))?;

        if DRAW_TEXT {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(self.bars.len())
                .x_label_formatter(&|value| self.slot_label(value))
                .x_desc(self.x_desc.as_str())
                .y_desc(self.y_desc.as_str())
                .draw()?;
        }

        chart.draw_series(
            Histogram::vertical(&chart)
                .style_func(|value, _| self.slot_style(value))
                .margin(40)
                .data(self.slots()),
        )?;

        Ok(())
    }

    fn draw_horizontal<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB::ErrorType: 'static,
    {
        let slots = count_coord(self.bars.len());
        let mut chart = chart_frame(root, &self.title, 24, 20, (40, 160))
            .build_cartesian_2d(0u32..headroom(self.max_count()), (0u32..slots).into_segmented())?;

        if DRAW_TEXT {
            chart
                .configure_mesh()
                .disable_y_mesh()
                .y_labels(self.bars.len())
                .y_label_formatter(&|value| self.slot_label(value))
                .x_desc(self.x_desc.as_str())
                .y_desc(self.y_desc.as_str())
                .draw()?;
        }

        chart.draw_series(
            Histogram::horizontal(&chart)
                .style_func(|value, _| self.slot_style(value))
                .margin(6)
                .data(self.slots()),
        )?;

        Ok(())
    }
}

impl ExportablePlot for BarChart {
    fn file_stem(&self) -> &'static str {
        self.file_stem
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB::ErrorType: 'static,
    {
        match self.orientation {
            Orientation::Vertical => self.draw_vertical(root),
            Orientation::Horizontal => self.draw_horizontal(root),
        }
    }
}
