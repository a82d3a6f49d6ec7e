//! Utilities for chart rendering

pub mod colors;
pub mod stats;

// Re-export commonly used items
pub use colors::{categorical_color, reds_reversed, reds_reversed_palette, NETFLIX_DARK, NETFLIX_RED};
pub use stats::{calculate_quartiles, histogram_bins, mean, sample_std_dev, Bin};
