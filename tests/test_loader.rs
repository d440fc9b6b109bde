//! Tests for the dataset loader

use polars::prelude::*;
use reelclean::error::PipelineError;
use reelclean::pipeline::{dataset_shape, get_column_names, load_dataset, LoadOptions};
use std::path::Path;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_load_csv_reads_every_column_as_text() {
    let (_temp_dir, csv_path) = create_temp_csv("movie_title,rating\nAlien,9\nHeat,7.5\n");

    let df = load_dataset(&csv_path, &LoadOptions::default()).unwrap();

    assert_shape(&df, 2, 2);
    for column in df.get_columns() {
        assert_eq!(
            column.dtype(),
            &DataType::String,
            "Column '{}' should load as text",
            column.name()
        );
    }
    assert_eq!(strings(&df, "rating"), vec![Some("9".to_string()), Some("7.5".to_string())]);
}

#[test]
fn test_load_empty_fields_become_null() {
    let (_temp_dir, csv_path) = create_temp_csv("movie_title,rating\nAlien,\n,8\n");

    let df = load_dataset(&csv_path, &LoadOptions::default()).unwrap();

    assert_eq!(df.column("rating").unwrap().null_count(), 1);
    assert_eq!(df.column("movie_title").unwrap().null_count(), 1);
}

#[test]
fn test_load_missing_file_is_not_found() {
    let err = load_dataset(Path::new("/nonexistent/reviews.csv"), &LoadOptions::default())
        .unwrap_err();

    assert!(
        matches!(err, PipelineError::NotFound { .. }),
        "Expected NotFound, got {:?}",
        err
    );
    assert!(err.is_fatal_load_error());
    assert!(err.to_string().contains("/nonexistent/reviews.csv"));
}

#[test]
fn test_load_ragged_rows_is_malformed() {
    let (_temp_dir, csv_path) = create_temp_csv("a,b\n1,2\n3,4,5,6\n");

    let err = load_dataset(&csv_path, &LoadOptions::default()).unwrap_err();

    assert!(
        matches!(err, PipelineError::MalformedInput { .. }),
        "Expected MalformedInput, got {:?}",
        err
    );
    assert!(err.is_fatal_load_error());
    assert!(err.to_string().contains("reviews.csv"));
}

#[test]
fn test_load_empty_file_is_malformed() {
    let (_temp_dir, csv_path) = create_temp_csv("");

    let err = load_dataset(&csv_path, &LoadOptions::default()).unwrap_err();

    assert!(matches!(err, PipelineError::MalformedInput { .. }));
}

#[test]
fn test_load_custom_delimiter() {
    let (_temp_dir, csv_path) =
        create_temp_csv("movie_title;review_text\nAlien;tense, dark and slow\n");
    let options = LoadOptions {
        delimiter: b';',
        ..LoadOptions::default()
    };

    let df = load_dataset(&csv_path, &options).unwrap();

    assert_shape(&df, 1, 2);
    assert_eq!(
        strings(&df, "review_text"),
        vec![Some("tense, dark and slow".to_string())]
    );
}

#[test]
fn test_get_column_names_reads_header() {
    let (_temp_dir, csv_path) = create_temp_csv(SAMPLE_REVIEWS_CSV);

    let names = get_column_names(&csv_path, &LoadOptions::default()).unwrap();

    assert_eq!(
        names,
        vec!["movie_title", "review_text", "reviewer", "rating", "review_date", "category"]
    );
}

#[test]
fn test_get_column_names_missing_file() {
    let result = get_column_names(Path::new("/nonexistent/file.csv"), &LoadOptions::default());
    assert!(matches!(result, Err(PipelineError::NotFound { .. })));
}

#[test]
fn test_dataset_shape() {
    let df = sample_reviews();

    let shape = dataset_shape(&df);

    assert_eq!(shape.rows, 6);
    assert_eq!(shape.columns, 6);
    assert!(shape.memory_mb >= 0.0);
}
