//! Data-quality inspection: missing values and duplicate rows

use polars::prelude::*;
use serde::Serialize;

use super::frame::unique_rows;
use crate::error::Result;

/// Read-only snapshot of a table's missing values and duplicates
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityReport {
    pub row_count: usize,
    /// Column names in table order
    pub column_names: Vec<String>,
    /// Null cells per column, in table order
    pub missing_count_by_column: Vec<(String, usize)>,
    /// Null cells per column as a percentage of rows, rounded to 2 dp
    pub missing_pct_by_column: Vec<(String, f64)>,
    /// Rows equal to an earlier row across every column
    pub duplicate_row_count: usize,
    /// Rows with at least one null cell
    pub rows_with_any_missing: usize,
}

impl QualityReport {
    pub fn missing_count(&self, column: &str) -> Option<usize> {
        self.missing_count_by_column
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
    }

    pub fn missing_pct(&self, column: &str) -> Option<f64> {
        self.missing_pct_by_column
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, pct)| *pct)
    }

    /// Columns with at least one missing value, in table order
    pub fn columns_with_missing(&self) -> Vec<&str> {
        self.missing_count_by_column
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn total_missing(&self) -> usize {
        self.missing_count_by_column.iter().map(|(_, c)| c).sum()
    }

    pub fn has_issues(&self) -> bool {
        self.duplicate_row_count > 0 || self.rows_with_any_missing > 0
    }
}

/// Inspect a table for missing values and duplicate rows without changing it
pub fn analyze_quality(df: &DataFrame) -> Result<QualityReport> {
    let row_count = df.height();
    let mut column_names = Vec::with_capacity(df.width());
    let mut missing_count_by_column = Vec::with_capacity(df.width());
    let mut missing_pct_by_column = Vec::with_capacity(df.width());
    let mut row_has_missing = vec![false; row_count];

    for column in df.get_columns() {
        let name = column.name().to_string();
        let series = column.as_materialized_series();
        let null_count = series.null_count();

        if null_count > 0 {
            let nulls = series.is_null();
            for (idx, is_null) in nulls.into_iter().enumerate() {
                if is_null.unwrap_or(false) {
                    row_has_missing[idx] = true;
                }
            }
        }

        column_names.push(name.clone());
        missing_pct_by_column.push((name.clone(), missing_percentage(null_count, row_count)));
        missing_count_by_column.push((name, null_count));
    }

    Ok(QualityReport {
        row_count,
        column_names,
        missing_count_by_column,
        missing_pct_by_column,
        duplicate_row_count: count_duplicate_rows(df)?,
        rows_with_any_missing: row_has_missing.iter().filter(|m| **m).count(),
    })
}

/// Count rows that repeat an earlier row exactly
pub fn count_duplicate_rows(df: &DataFrame) -> Result<usize> {
    Ok(df.height() - unique_rows(df)?.height())
}

/// `count / rows * 100` rounded to 2 dp; zero for an empty table
pub fn missing_percentage(count: usize, rows: usize) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    let pct = count as f64 / rows as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
