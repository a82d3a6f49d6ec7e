//! Statistical utilities for charts and summaries

/// Calculate quartiles using linear interpolation
pub fn calculate_quartiles(values: &[f64]) -> (f64, f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    
    let n = sorted.len();
    if n == 0 {
        return (0.0, 0.0, 0.0);
    }
    
    let q1_idx = (n - 1) as f64 * 0.25;
    let q2_idx = (n - 1) as f64 * 0.5;
    let q3_idx = (n - 1) as f64 * 0.75;
    
    let q1 = interpolate(&sorted, q1_idx);
    let q2 = interpolate(&sorted, q2_idx);
    let q3 = interpolate(&sorted, q3_idx);
    
    (q1, q2, q3)
}

fn interpolate(sorted: &[f64], idx: f64) -> f64 {
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;
    
    if lower == upper || upper >= sorted.len() {
        sorted[lower]
    } else {
        let fraction = idx - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with one degree of freedom removed; `None` below two values
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// One histogram bin, `[start, end)` except the last which is closed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split `values` into `num_bins` equal-width bins spanning min..=max.
///
/// A constant input gets a unit-wide range centred on the value.
pub fn histogram_bins(values: &[f64], num_bins: usize) -> Vec<Bin> {
    if values.is_empty() || num_bins == 0 {
        return Vec::new();
    }
    
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    
    let bin_width = (max - min) / num_bins as f64;
    let mut bins: Vec<Bin> = (0..num_bins)
        .map(|i| Bin {
            start: min + i as f64 * bin_width,
            end: min + (i + 1) as f64 * bin_width,
            count: 0,
        })
        .collect();
    
    for &value in values {
        let idx = (((value - min) / bin_width) as usize).min(num_bins - 1);
        bins[idx].count += 1;
    }
    
    bins
}
