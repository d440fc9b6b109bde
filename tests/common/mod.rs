//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use reelclean::pipeline::{load_dataset, LoadOptions};
use std::path::PathBuf;
use tempfile::TempDir;

/// A small review table exercising every recognized column.
///
/// - rows 0 and 1 only differ by whitespace and case in `movie_title`
/// - row 3 has an unparseable `review_date`
/// - row 4 has no review text and no rating
pub const SAMPLE_REVIEWS_CSV: &str = "\
movie_title,review_text,reviewer,rating,review_date,category
 Matrix ,A mind bending classic with stunning action and style,Alice,9,2024-01-15,scifi
matrix,A mind bending classic with stunning action and style,Alice,9,2024-01-15,scifi
Inception,\"Dreams within dreams, a stunning puzzle full of action\",Bob,8.5,2024-02-03,scifi
Cats,Terrible pacing and awful effects,Carol,2,bad-date,musical
Heat,,Dave,,2024-03-10,crime
Heat,Tense heist drama with great action,Erin,6,2024/03/22,crime
";

/// Create a temporary directory holding `contents` as `reviews.csv`
pub fn create_temp_csv(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("reviews.csv");
    std::fs::write(&csv_path, contents).unwrap();
    (temp_dir, csv_path)
}

/// Load CSV text through the real loader
pub fn load_csv_str(contents: &str) -> DataFrame {
    let (_temp_dir, csv_path) = create_temp_csv(contents);
    load_dataset(&csv_path, &LoadOptions::default()).unwrap()
}

/// The sample table as the loader would return it
pub fn sample_reviews() -> DataFrame {
    load_csv_str(SAMPLE_REVIEWS_CSV)
}

/// A text-only table built in memory, as loaded (all strings, nulls for empty fields)
pub fn create_review_dataframe() -> DataFrame {
    df! {
        "movie_title" => [Some(" Matrix "), Some("matrix"), Some("Alien"), None],
        "review_text" => [Some("Great action"), Some("Great action"), Some("Slow but tense"), Some("Fine")],
        "rating" => [Some("9"), Some("9"), Some("not rated"), Some("5")],
    }
    .unwrap()
}

/// Read a text column into owned strings
pub fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::String)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

/// Read a numeric column as floats
pub fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

/// Read a boolean column
pub fn bools(df: &DataFrame, name: &str) -> Vec<Option<bool>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .bool()
        .unwrap()
        .into_iter()
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
