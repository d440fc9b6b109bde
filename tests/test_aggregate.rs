//! Tests for summary metrics and grouped series

use polars::prelude::*;
use reelclean::pipeline::{
    aggregate, derive_features, high_rated_reviews, monthly_counts, normalize, Aggregates,
    CleaningPolicy, FeatureConfig,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

fn aggregate_table(raw: DataFrame) -> (DataFrame, Aggregates) {
    let cleaned = normalize(raw, &CleaningPolicy::default()).unwrap();
    let derived = derive_features(cleaned, &FeatureConfig::default()).unwrap();
    let aggregates = aggregate(&derived.table).unwrap();
    (derived.table, aggregates)
}

fn points(aggregates: &Aggregates, name: &str) -> Vec<(String, f64)> {
    aggregates
        .series(name)
        .unwrap_or_else(|| panic!("series '{}' missing", name))
        .points
        .clone()
}

fn pairs(expected: &[(&str, f64)]) -> Vec<(String, f64)> {
    expected.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_summary_metrics_for_sample() {
    let (_, aggregates) = aggregate_table(sample_reviews());
    let summary = &aggregates.summary;

    assert_eq!(summary.get("count_reviews"), Some(Some(5.0)));
    assert_eq!(summary.get("unique_movies"), Some(Some(4.0)));
    assert_eq!(summary.get("rating_mean"), Some(Some(6.375)));
    assert_eq!(summary.get("rating_median"), Some(Some(7.25)));
    assert_eq!(summary.get("rating_min"), Some(Some(2.0)));
    assert_eq!(summary.get("rating_max"), Some(Some(9.0)));
    assert_eq!(summary.get("count_high_rated"), Some(Some(2.0)));
    assert_eq!(summary.get("sentiment_positive"), Some(Some(2.0)));
    assert_eq!(summary.get("sentiment_neutral"), Some(Some(1.0)));
    assert_eq!(summary.get("sentiment_negative"), Some(Some(1.0)));
    assert_eq!(summary.get("sentiment_unknown"), Some(Some(1.0)));
    assert_eq!(summary.get("no_such_metric"), None);

    let mean = summary.get("word_count_mean").unwrap().unwrap();
    assert!((mean - 5.8).abs() < 1e-9);
    assert!(summary.get("word_count_std").unwrap().is_some());
    assert!(summary.get("word_count_p95").unwrap().is_some());
}

#[test]
fn test_summary_metric_order_is_stable() {
    let (_, aggregates) = aggregate_table(sample_reviews());

    let names: Vec<&str> = aggregates
        .summary
        .metrics()
        .iter()
        .map(|m| m.metric.as_str())
        .collect();
    assert_eq!(&names[..3], &["count_reviews", "unique_movies", "rating_mean"]);
    assert_eq!(names.last(), Some(&"sentiment_unknown"));
}

#[test]
fn test_per_movie_series() {
    let (_, aggregates) = aggregate_table(sample_reviews());

    assert_eq!(
        points(&aggregates, "reviews_per_movie"),
        pairs(&[("heat", 2.0), ("matrix", 1.0), ("inception", 1.0), ("cats", 1.0)])
    );
    assert_eq!(
        points(&aggregates, "avg_rating_per_movie"),
        pairs(&[("matrix", 9.0), ("inception", 8.5), ("heat", 6.0), ("cats", 2.0)])
    );
}

#[test]
fn test_grouping_series() {
    let (_, aggregates) = aggregate_table(sample_reviews());

    assert_eq!(
        points(&aggregates, "count_per_category"),
        pairs(&[("scifi", 2.0), ("crime", 2.0), ("musical", 1.0)])
    );
    let category = aggregates.series("count_per_category").unwrap();
    assert_eq!(category.get("musical"), Some(1.0));
    assert_eq!(category.get("western"), None);
    assert_eq!(aggregates.series("count_per_reviewer").unwrap().points.len(), 5);
    assert!(aggregates.series("count_per_author").is_none());
}

#[test]
fn test_monthly_buckets_skip_bad_date() {
    let df = df! {
        "review_date" => ["2024-01-15", "2024-02-03", "bad-date"],
    }
    .unwrap();

    let (table, aggregates) = aggregate_table(df);

    assert_eq!(table.height(), 3, "Row with bad date stays in the table");
    assert_eq!(
        points(&aggregates, "monthly_review_date"),
        pairs(&[("2024-01-01", 1.0), ("2024-02-01", 1.0)])
    );
}

#[test]
fn test_monthly_counts_fill_gaps() {
    let (_, aggregates) = aggregate_table(sample_reviews());

    assert_eq!(
        points(&aggregates, "monthly_review_date"),
        pairs(&[("2024-01-01", 1.0), ("2024-02-01", 1.0), ("2024-03-01", 2.0)])
    );

    let dates = [
        chrono::NaiveDate::from_ymd_opt(2023, 11, 30),
        None,
        chrono::NaiveDate::from_ymd_opt(2024, 1, 2),
    ];
    assert_eq!(
        monthly_counts(&dates),
        pairs(&[("2023-11-01", 1.0), ("2023-12-01", 0.0), ("2024-01-01", 1.0)])
    );
}

#[test]
fn test_sentiment_series() {
    let (_, aggregates) = aggregate_table(sample_reviews());

    assert_eq!(
        points(&aggregates, "avg_word_count_by_sentiment"),
        pairs(&[("negative", 5.0), ("neutral", 6.0), ("positive", 9.0), ("unknown", 0.0)])
    );

    let positive = points(&aggregates, "top_keywords_positive");
    assert_eq!(&positive[..2], &pairs(&[("stunning", 2.0), ("action", 2.0)])[..]);
    assert!(positive.len() <= 10);

    let negative = points(&aggregates, "top_keywords_negative");
    assert_eq!(negative[0], ("terrible".to_string(), 1.0));
}

#[test]
fn test_rating_histogram_counts_every_rating() {
    let (_, aggregates) = aggregate_table(sample_reviews());

    let histogram = aggregates.series("rating_histogram").unwrap();
    assert_eq!(histogram.points.len(), 10);
    assert_eq!(histogram.values().sum::<f64>(), 4.0);
    // 8.5 and the maximum 9 share the last, closed bin
    assert_eq!(histogram.points[9].1, 2.0);
    assert_eq!(histogram.points[0].1, 1.0);
}

#[test]
fn test_empty_table_gives_null_statistics() {
    let df = df! {
        "movie_title" => Vec::<&str>::new(),
        "review_text" => Vec::<&str>::new(),
        "rating" => Vec::<&str>::new(),
    }
    .unwrap();

    let (_, aggregates) = aggregate_table(df);
    let summary = &aggregates.summary;

    assert_eq!(summary.get("count_reviews"), Some(Some(0.0)));
    assert_eq!(summary.get("unique_movies"), Some(Some(0.0)));
    for metric in [
        "rating_mean",
        "rating_median",
        "rating_min",
        "rating_max",
        "word_count_mean",
        "word_count_std",
        "word_count_p95",
    ] {
        assert_eq!(summary.get(metric), Some(None), "{} should be null", metric);
    }

    let table = summary.to_dataframe().unwrap();
    let names: Vec<&str> = table.get_column_names().iter().map(|s| s.as_str()).collect();
    assert_eq!(names, vec!["metric", "value"]);
    assert_eq!(table.height(), summary.len());
    assert!(aggregates.series("rating_histogram").unwrap().is_empty());
}

#[test]
fn test_missing_columns_give_null_metrics() {
    let df = df! { "review_text" => ["short and sweet"] }.unwrap();

    let (_, aggregates) = aggregate_table(df);

    assert_eq!(aggregates.summary.get("unique_movies"), Some(None));
    assert_eq!(aggregates.summary.get("rating_mean"), Some(None));
    assert_eq!(aggregates.summary.get("sentiment_unknown"), Some(Some(1.0)));
    assert!(aggregates.series("reviews_per_movie").is_none());
    assert!(aggregates.series("rating_histogram").is_none());
}

#[test]
fn test_high_rated_reviews() {
    let (table, _) = aggregate_table(sample_reviews());

    let high = high_rated_reviews(&table, 8.0).unwrap();

    let names: Vec<&str> = high.get_column_names().iter().map(|s| s.as_str()).collect();
    assert_eq!(names, vec!["movie_title", "rating"]);
    assert_eq!(
        strings(&high, "movie_title"),
        vec![Some("matrix".to_string()), Some("inception".to_string())]
    );

    let no_rating = df! { "movie_title" => ["alien"] }.unwrap();
    assert_eq!(high_rated_reviews(&no_rating, 8.0).unwrap().height(), 0);
}
