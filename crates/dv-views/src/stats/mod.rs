//! Summary statistics over the cleaned table

mod counts;
mod insights;

pub use counts::{added_by_year, country_counts, genre_counts, rating_counts, type_counts, ValueCounts};
pub use insights::{Insights, RECENT_WINDOW_YEARS};

use std::collections::HashMap;
use std::fmt;

use arrow::array::{Array, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::plots::utils::{calculate_quartiles, mean, sample_std_dev};

/// Per-column statistics
#[derive(Debug, Clone)]
pub struct ColumnStats {
    pub name: String,
    pub data_type: DataType,
    /// Non-null values
    pub count: usize,
    pub null_count: usize,
    pub numeric_stats: Option<NumericStats>,
    pub categorical_stats: Option<CategoricalStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericStats {
    pub mean: f64,
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalStats {
    pub unique_count: usize,
    pub top: String,
    pub freq: usize,
}

/// Column layout and non-null counts of a batch
#[derive(Debug, Clone)]
pub struct SchemaInfo {
    pub row_count: usize,
    pub columns: Vec<(String, DataType, usize)>,
}

impl SchemaInfo {
    pub fn from_batch(batch: &RecordBatch) -> Self {
        let columns = batch
            .schema()
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, column)| {
                (
                    field.name().clone(),
                    field.data_type().clone(),
                    column.len() - column.null_count(),
                )
            })
            .collect();

        Self {
            row_count: batch.num_rows(),
            columns,
        }
    }
}

impl fmt::Display for SchemaInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RecordBatch: {} entries", self.row_count)?;
        writeln!(f, "Data columns (total {} columns):", self.columns.len())?;
        writeln!(f, " {:<3} {:<18} {:<16} {}", "#", "Column", "Non-Null Count", "Dtype")?;
        for (idx, (name, data_type, non_null)) in self.columns.iter().enumerate() {
            writeln!(f, " {:<3} {:<18} {:<16} {:?}", idx, name, format!("{non_null} non-null"), data_type)?;
        }

        let mut by_type: Vec<(String, usize)> = Vec::new();
        for (_, data_type, _) in &self.columns {
            let label = format!("{data_type:?}");
            match by_type.iter_mut().find(|(existing, _)| *existing == label) {
                Some((_, count)) => *count += 1,
                None => by_type.push((label, 1)),
            }
        }
        let summary: Vec<String> = by_type.iter().map(|(label, count)| format!("{label}({count})")).collect();
        write!(f, "dtypes: {}", summary.join(", "))
    }
}

/// Describe every column of `batch`: numeric columns get moments and
/// quartiles, everything else unique/top/freq
pub fn describe(batch: &RecordBatch) -> Vec<ColumnStats> {
    let mut stats = Vec::new();

    for (idx, field) in batch.schema().fields().iter().enumerate() {
        let column = batch.column(idx);
        let mut col_stats = ColumnStats {
            name: field.name().clone(),
            data_type: field.data_type().clone(),
            count: column.len() - column.null_count(),
            null_count: column.null_count(),
            numeric_stats: None,
            categorical_stats: None,
        };

        match field.data_type() {
            DataType::Float64 | DataType::Int64 => {
                col_stats.numeric_stats = calculate_numeric_stats(column.as_ref());
            }
            _ => {
                col_stats.categorical_stats = calculate_categorical_stats(column.as_ref());
            }
        }

        stats.push(col_stats);
    }

    stats
}

fn calculate_numeric_stats(column: &dyn Array) -> Option<NumericStats> {
    // Convert to f64 for statistics
    let values: Vec<f64> = match column.data_type() {
        DataType::Float64 => {
            let array = column.as_any().downcast_ref::<Float64Array>()?;
            array.iter().flatten().collect()
        }
        DataType::Int64 => {
            let array = column.as_any().downcast_ref::<Int64Array>()?;
            array.iter().flatten().map(|v| v as f64).collect()
        }
        _ => return None,
    };

    if values.is_empty() {
        return None;
    }

    let (q1, median, q3) = calculate_quartiles(&values);
    Some(NumericStats {
        mean: mean(&values)?,
        std_dev: sample_std_dev(&values),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        q1,
        median,
        q3,
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

/// Text form of every non-null value, for frequency counting
fn categorical_values(column: &dyn Array) -> Option<Vec<String>> {
    let values = match column.data_type() {
        DataType::Utf8 => {
            let array = column.as_any().downcast_ref::<StringArray>()?;
            array.iter().flatten().map(str::to_string).collect()
        }
        DataType::Boolean => {
            let array = column.as_any().downcast_ref::<BooleanArray>()?;
            array.iter().flatten().map(|v| v.to_string()).collect()
        }
        DataType::Date32 => {
            let array = column.as_any().downcast_ref::<Date32Array>()?;
            (0..array.len())
                .filter_map(|i| array.value_as_date(i).filter(|_| array.is_valid(i)))
                .map(|date| date.to_string())
                .collect()
        }
        _ => return None,
    };
    Some(values)
}

fn calculate_categorical_stats(column: &dyn Array) -> Option<CategoricalStats> {
    let values = categorical_values(column)?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    // First-seen order decides ties for `top`
    let mut order: Vec<&str> = Vec::new();
    for value in &values {
        let count = counts.entry(value.as_str()).or_insert(0);
        if *count == 0 {
            order.push(value.as_str());
        }
        *count += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for value in order {
        let freq = counts[value];
        if top.map_or(true, |(_, best)| freq > best) {
            top = Some((value, freq));
        }
    }

    top.map(|(value, freq)| CategoricalStats {
        unique_count: counts.len(),
        top: value.to_string(),
        freq,
    })
}

/// Describe output laid out as one row per statistic, one column per column
pub struct DescribeTable<'a>(pub &'a [ColumnStats]);

impl fmt::Display for DescribeTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const ROWS: [&str; 11] = ["count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max"];
        const WIDTH: usize = 14;

        let cell = |stats: &ColumnStats, row: &str| -> String {
            let numeric = stats.numeric_stats.as_ref();
            let categorical = stats.categorical_stats.as_ref();
            let text = match row {
                "count" => Some(stats.count.to_string()),
                "unique" => categorical.map(|c| c.unique_count.to_string()),
                "top" => categorical.map(|c| c.top.clone()),
                "freq" => categorical.map(|c| c.freq.to_string()),
                "mean" => numeric.map(|n| format!("{:.2}", n.mean)),
                "std" => numeric.map(|n| n.std_dev.map_or("NaN".to_string(), |s| format!("{s:.2}"))),
                "min" => numeric.map(|n| format!("{:.2}", n.min)),
                "25%" => numeric.map(|n| format!("{:.2}", n.q1)),
                "50%" => numeric.map(|n| format!("{:.2}", n.median)),
                "75%" => numeric.map(|n| format!("{:.2}", n.q3)),
                "max" => numeric.map(|n| format!("{:.2}", n.max)),
                _ => None,
            };
            let mut text = text.unwrap_or_else(|| "NaN".to_string());
            if text.chars().count() > WIDTH {
                text = text.chars().take(WIDTH - 3).collect::<String>() + "...";
            }
            text
        };

        write!(f, "{:<8}", "")?;
        for stats in self.0 {
            let mut name = stats.name.clone();
            if name.chars().count() > WIDTH {
                name = name.chars().take(WIDTH).collect();
            }
            write!(f, " {name:>WIDTH$}")?;
        }
        for row in ROWS {
            writeln!(f)?;
            write!(f, "{row:<8}")?;
            for stats in self.0 {
                write!(f, " {:>WIDTH$}", cell(stats, row))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use arrow::array::ArrayRef;
    use arrow::datatypes::{Field, Schema};

    fn batch() -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("release_year", DataType::Int64, true),
            Field::new("rating", DataType::Utf8, false),
            Field::new("valid", DataType::Boolean, false),
            Field::new("added", DataType::Date32, true),
        ]);
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![Some(2000), Some(2010), None, Some(2020)])),
            Arc::new(StringArray::from(vec!["PG", "R", "R", "PG"])),
            Arc::new(BooleanArray::from(vec![true, false, true, true])),
            Arc::new(Date32Array::from(vec![Some(0), None, Some(0), Some(1)])),
        ];
        RecordBatch::try_new(Arc::new(schema), columns).unwrap()
    }

    #[test]
    fn test_numeric_describe() {
        let stats = describe(&batch());
        let year = &stats[0];
        assert_eq!(year.count, 3);
        assert_eq!(year.null_count, 1);

        let numeric = year.numeric_stats.as_ref().unwrap();
        assert_eq!(numeric.mean, 2010.0);
        assert_eq!(numeric.min, 2000.0);
        assert_eq!(numeric.median, 2010.0);
        assert_eq!(numeric.q1, 2005.0);
        assert_eq!(numeric.max, 2020.0);
        assert!((numeric.std_dev.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_categorical_describe() {
        let stats = describe(&batch());

        let rating = stats[1].categorical_stats.as_ref().unwrap();
        assert_eq!(rating.unique_count, 2);
        // Tie broken by first appearance
        assert_eq!(rating.top, "PG");
        assert_eq!(rating.freq, 2);

        let valid = stats[2].categorical_stats.as_ref().unwrap();
        assert_eq!(valid.top, "true");
        assert_eq!(valid.freq, 3);

        let added = stats[3].categorical_stats.as_ref().unwrap();
        assert_eq!(added.top, "1970-01-01");
        assert_eq!(added.unique_count, 2);
        assert_eq!(stats[3].count, 3);
    }

    #[test]
    fn test_schema_info() {
        let info = SchemaInfo::from_batch(&batch());
        assert_eq!(info.row_count, 4);
        assert_eq!(info.columns[0].2, 3);

        let text = info.to_string();
        assert!(text.contains("Data columns (total 4 columns):"));
        assert!(text.contains("3 non-null"));
        assert!(text.ends_with("dtypes: Int64(1), Utf8(1), Boolean(1), Date32(1)"));
    }

    #[test]
    fn test_describe_table_renders_every_statistic() {
        let stats = describe(&batch());
        let text = DescribeTable(&stats).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].contains("release_year"));
        assert!(lines[5].trim_start().starts_with("mean"));
        assert!(lines[5].contains("2010.00"));
    }
}
