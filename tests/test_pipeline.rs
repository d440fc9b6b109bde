//! Integration tests for the full cleaning pipeline

use polars::prelude::*;
use reelclean::pipeline::*;
use reelclean::report::{write_run_report, RunReportParams};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_full_pipeline_on_sample() {
    let raw = sample_reviews();

    let output = process(raw, &CleaningPolicy::default(), &FeatureConfig::default()).unwrap();

    // Quality describes the table as loaded
    assert_eq!(output.quality.row_count, 6);
    assert_eq!(output.quality.total_missing(), 2);

    let table = &output.derived.table;
    assert_shape(table, 5, 11);
    assert_has_columns(
        table,
        &[
            "movie_title",
            "review_text",
            "reviewer",
            "rating",
            "review_date",
            "category",
            "word_count",
            "keywords",
            "is_short_text",
            "is_long_text",
            "sentiment_proxy",
        ],
    );

    assert_eq!(output.aggregates.summary.get("count_reviews"), Some(Some(5.0)));
    assert!(output.aggregates.series("reviews_per_movie").is_some());
    assert!(output.aggregates.series("monthly_review_date").is_some());
}

#[test]
fn test_pipeline_capabilities_follow_columns() {
    let output = process(sample_reviews(), &CleaningPolicy::default(), &FeatureConfig::default())
        .unwrap();

    let caps = Capabilities::detect(&output.derived.table);
    assert!(caps.supports(Feature::RatingStats));
    assert!(caps.supports(Feature::KeywordStats));
    assert!(caps.supports(Feature::AverageRatingPerMovie));

    let bare = df! { "notes" => ["nothing recognized here"] }.unwrap();
    let output = process(bare, &CleaningPolicy::default(), &FeatureConfig::default()).unwrap();
    let caps = Capabilities::detect(&output.derived.table);
    assert!(!caps.supports(Feature::RatingStats));
    assert!(!caps.supports(Feature::WordCountStats));
    assert!(caps.supports(Feature::SentimentBreakdown));
    assert_eq!(output.aggregates.summary.get("sentiment_unknown"), Some(Some(1.0)));
}

#[test]
fn test_pipeline_keep_policies_keep_rows() {
    let policy = CleaningPolicy {
        duplicates: DuplicatePolicy::Keep,
        missing: MissingPolicy::Keep,
    };

    let output = process(sample_reviews(), &policy, &FeatureConfig::default()).unwrap();

    assert_eq!(output.derived.table.height(), 6);
    assert_eq!(output.aggregates.summary.get("count_reviews"), Some(Some(6.0)));
}

#[test]
fn test_pipeline_sentiment_thresholds_are_configurable() {
    let config = FeatureConfig {
        sentiment: SentimentThresholds::new(9.0, 2.0),
        ..FeatureConfig::default()
    };

    let output = process(sample_reviews(), &CleaningPolicy::default(), &config).unwrap();

    // 9 positive, 8.5 and 6 neutral, 2 negative, absent unknown
    let summary = &output.aggregates.summary;
    assert_eq!(summary.get("sentiment_positive"), Some(Some(1.0)));
    assert_eq!(summary.get("sentiment_neutral"), Some(Some(2.0)));
    assert_eq!(summary.get("sentiment_negative"), Some(Some(1.0)));
    assert_eq!(summary.get("sentiment_unknown"), Some(Some(1.0)));
}

#[test]
fn test_pipeline_tokenize_matches_row_keywords() {
    let output = process(sample_reviews(), &CleaningPolicy::default(), &FeatureConfig::default())
        .unwrap();

    let texts = strings(&output.derived.table, "review_text");
    let tokens: Vec<Vec<String>> = texts
        .iter()
        .map(|t| tokenize(t.as_deref().unwrap_or("")))
        .collect();
    let rebuilt = KeywordVocabulary::build(&tokens, DEFAULT_TOP_KEYWORDS);
    assert_eq!(rebuilt, output.derived.vocabulary);
}

#[test]
fn test_run_report_json() {
    let output = process(sample_reviews(), &CleaningPolicy::default(), &FeatureConfig::default())
        .unwrap();
    let temp_dir = TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.json");
    let params = RunReportParams {
        input_file: "reviews.csv",
        output_file: "reviews_cleaned.csv",
        summary_file: "reviews_summary.csv",
        policy: CleaningPolicy::default(),
        features: FeatureConfig::default(),
    };

    write_run_report(&output, &params, &report_path).unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["metadata"]["input_file"], "reviews.csv");
    assert_eq!(report["metadata"]["features"]["top_keywords"], 20);
    assert_eq!(report["metadata"]["policy"]["missing"], "fill");
    assert_eq!(report["rows_after_cleaning"], 5);
    assert_eq!(report["summary"][0]["metric"], "count_reviews");
    assert!(report["vocabulary"]["entries"].as_array().unwrap().len() <= 20);
}
