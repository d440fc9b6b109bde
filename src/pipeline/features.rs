//! Derived columns: word counts, keywords, length flags and sentiment proxy
//!
//! Expects a normalized table: word counts and keyword extraction assume the
//! body text is already trimmed and lowercased.

use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::capabilities::{select_text_column, Capabilities, Feature};
use super::columns::*;
use super::frame::{float_values, list_series, text_values};
use super::keywords::{tokenize, KeywordVocabulary, DEFAULT_TOP_KEYWORDS};
use super::sentiment::{SentimentLabel, SentimentThresholds};
use super::stats::quantile;
use crate::error::Result;

/// Texts with fewer words than this are flagged short
pub const DEFAULT_SHORT_TEXT_THRESHOLD: u32 = 10;

/// Texts above this word-count quantile are flagged long
pub const DEFAULT_LONG_TEXT_QUANTILE: f64 = 0.9;

/// Tunables for feature derivation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureConfig {
    pub top_keywords: usize,
    pub short_text_threshold: u32,
    pub long_text_quantile: f64,
    pub sentiment: SentimentThresholds,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            top_keywords: DEFAULT_TOP_KEYWORDS,
            short_text_threshold: DEFAULT_SHORT_TEXT_THRESHOLD,
            long_text_quantile: DEFAULT_LONG_TEXT_QUANTILE,
            sentiment: SentimentThresholds::default(),
        }
    }
}

/// A table with derived columns plus the values computed alongside it
#[derive(Debug, Clone)]
pub struct DerivedTable {
    pub table: DataFrame,
    /// Global top-N keywords of this table
    pub vocabulary: KeywordVocabulary,
    /// Body-text column the text features were computed from
    pub text_column: Option<String>,
    /// Word count above which a row is flagged long
    pub long_text_threshold: Option<f64>,
}

/// Add derived columns to a normalized table.
///
/// Without a body-text column the text features are skipped and only the
/// sentiment proxy is added. Without a rating column every row is `unknown`.
pub fn derive_features(df: DataFrame, config: &FeatureConfig) -> Result<DerivedTable> {
    let mut df = df;
    let mut vocabulary = KeywordVocabulary::default();
    let text_column = select_text_column(&df);

    match text_column {
        Some(column) => {
            info!(column, "using text column for text-based features");
            let texts: Vec<String> = text_values(&df, column)?
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect();

            let word_counts: Vec<u32> = texts.iter().map(|t| word_count(t)).collect();
            df.with_column(Series::new(WORD_COUNT.into(), word_counts))?;

            let tokens: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
            vocabulary = KeywordVocabulary::build(&tokens, config.top_keywords);
            debug!(size = vocabulary.len(), "built keyword vocabulary");

            let keywords: Vec<Vec<String>> =
                tokens.iter().map(|row| vocabulary.row_keywords(row)).collect();
            df.with_column(list_series(KEYWORDS, &keywords))?;
        }
        None => {
            warn!(
                candidates = ?TEXT_FIELD_CANDIDATES,
                "no text column found; skipping word count, keywords and length flags"
            );
        }
    }

    let long_text_threshold = if Capabilities::detect(&df).supports(Feature::LengthFlags) {
        add_length_flags(&mut df, config)?
    } else {
        None
    };

    add_sentiment_proxy(&mut df, &config.sentiment)?;

    Ok(DerivedTable {
        table: df,
        vocabulary,
        text_column: text_column.map(str::to_string),
        long_text_threshold,
    })
}

/// Number of non-empty whitespace-separated tokens
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Add `is_short_text` and `is_long_text`; returns the long-text cut-off
fn add_length_flags(df: &mut DataFrame, config: &FeatureConfig) -> Result<Option<f64>> {
    let counts: Vec<f64> = float_values(df, WORD_COUNT)?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();

    let long_threshold = quantile(&counts, config.long_text_quantile);
    let short_threshold = f64::from(config.short_text_threshold);

    let is_short: Vec<bool> = counts.iter().map(|c| *c < short_threshold).collect();
    let is_long: Vec<bool> = match long_threshold {
        Some(threshold) => counts.iter().map(|c| *c > threshold).collect(),
        None => vec![false; counts.len()],
    };

    debug!(
        short = is_short.iter().filter(|f| **f).count(),
        long = is_long.iter().filter(|f| **f).count(),
        ?long_threshold,
        "flagged text length outliers"
    );

    df.with_column(Series::new(IS_SHORT_TEXT.into(), is_short))?;
    df.with_column(Series::new(IS_LONG_TEXT.into(), is_long))?;
    Ok(long_threshold)
}

fn add_sentiment_proxy(df: &mut DataFrame, thresholds: &SentimentThresholds) -> Result<()> {
    let labels: Vec<&str> = if Capabilities::detect(df).supports(Feature::RatingStats) {
        float_values(df, RATING)?
            .into_iter()
            .map(|rating| thresholds.classify(rating).as_str())
            .collect()
    } else {
        info!("no rating column; sentiment proxy set to unknown");
        vec![SentimentLabel::Unknown.as_str(); df.height()]
    };

    df.with_column(Series::new(SENTIMENT_PROXY.into(), labels))?;
    Ok(())
}
