//! Feature gating by column presence
//!
//! Each optional feature declares the columns it needs once, here. Stages ask
//! for a [`Capabilities`] set instead of probing the table at every call site.

use std::collections::BTreeSet;
use std::fmt;

use polars::prelude::DataFrame;
use serde::Serialize;

use super::columns::*;
use super::frame::has_column;

/// Optional behaviours that depend on which columns a table carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    RatingStats,
    SentimentProxy,
    ReviewsPerMovie,
    AverageRatingPerMovie,
    UniqueMovies,
    WordCountStats,
    LengthFlags,
    KeywordStats,
    SentimentBreakdown,
    SentimentWordCounts,
}

/// Column requirements per feature. An empty list means "always on".
pub const FEATURE_REQUIREMENTS: &[(Feature, &[&str])] = &[
    (Feature::RatingStats, &[RATING]),
    (Feature::SentimentProxy, &[]),
    (Feature::ReviewsPerMovie, &[MOVIE_TITLE]),
    (Feature::AverageRatingPerMovie, &[MOVIE_TITLE, RATING]),
    (Feature::UniqueMovies, &[MOVIE_TITLE]),
    (Feature::WordCountStats, &[WORD_COUNT]),
    (Feature::LengthFlags, &[WORD_COUNT]),
    (Feature::KeywordStats, &[KEYWORDS, SENTIMENT_PROXY]),
    (Feature::SentimentBreakdown, &[SENTIMENT_PROXY]),
    (Feature::SentimentWordCounts, &[SENTIMENT_PROXY, WORD_COUNT]),
];

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The set of features a given table supports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    enabled: BTreeSet<Feature>,
}

impl Capabilities {
    /// Evaluate every requirement against the table's columns
    pub fn detect(df: &DataFrame) -> Self {
        let enabled = FEATURE_REQUIREMENTS
            .iter()
            .filter(|(_, required)| required.iter().all(|col| has_column(df, col)))
            .map(|(feature, _)| *feature)
            .collect();
        Self { enabled }
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.enabled.contains(&feature)
    }

    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.enabled.iter().copied()
    }
}

/// Pick the first body-text column present, in priority order
pub fn select_text_column(df: &DataFrame) -> Option<&'static str> {
    TEXT_FIELD_CANDIDATES
        .iter()
        .copied()
        .find(|name| has_column(df, name))
}

/// Date columns present in the table
pub fn present_date_columns(df: &DataFrame) -> Vec<&'static str> {
    DATE_COLUMNS
        .iter()
        .copied()
        .filter(|name| has_column(df, name))
        .collect()
}

/// Grouping columns present in the table
pub fn present_grouping_columns(df: &DataFrame) -> Vec<&'static str> {
    GROUPING_COLUMNS
        .iter()
        .copied()
        .filter(|name| has_column(df, name))
        .collect()
}
