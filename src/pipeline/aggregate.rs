//! Grouped statistics and the long-format summary table
//!
//! Everything here is read-only over the enriched table. Statistics that
//! cannot be computed (absent column, no values) are reported as `None`.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::Serialize;

use super::capabilities::{
    present_date_columns, present_grouping_columns, Capabilities, Feature,
};
use super::columns::*;
use super::frame::{date_values, filter_rows, float_values, list_values, text_values};
use super::keywords::KeywordVocabulary;
use super::normalize::parse_date;
use super::sentiment::SentimentLabel;
use super::stats::{self, round_to};
use crate::error::Result;

/// Ratings at or above this count as highly rated
pub const HIGH_RATING_THRESHOLD: f64 = 8.0;

/// Keywords listed per sentiment label
pub const TOP_KEYWORDS_PER_SENTIMENT: usize = 10;

/// Bins in the rating histogram
pub const RATING_HISTOGRAM_BINS: usize = 10;

/// One named statistic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetric {
    pub metric: String,
    pub value: Option<f64>,
}

/// Long-format `metric, value` table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryTable {
    metrics: Vec<SummaryMetric>,
}

impl SummaryTable {
    pub fn push(&mut self, metric: impl Into<String>, value: Option<f64>) {
        self.metrics.push(SummaryMetric {
            metric: metric.into(),
            value,
        });
    }

    /// Value of a metric: outer `None` when the metric is not listed
    pub fn get(&self, metric: &str) -> Option<Option<f64>> {
        self.metrics
            .iter()
            .find(|m| m.metric == metric)
            .map(|m| m.value)
    }

    pub fn metrics(&self) -> &[SummaryMetric] {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Two-column `metric` / `value` DataFrame
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let names: Vec<&str> = self.metrics.iter().map(|m| m.metric.as_str()).collect();
        let values: Vec<Option<f64>> = self.metrics.iter().map(|m| m.value).collect();
        Ok(df! {
            "metric" => names,
            "value" => values,
        }?)
    }
}

/// A labelled series for a chart or table, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedSeries {
    pub name: String,
    pub points: Vec<(String, f64)>,
}

impl GroupedSeries {
    pub fn new(name: impl Into<String>, points: Vec<(String, f64)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, value)| *value)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.points
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Summary metrics plus the grouped series a visualizer consumes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    pub summary: SummaryTable,
    pub series: Vec<GroupedSeries>,
}

impl Aggregates {
    pub fn series(&self, name: &str) -> Option<&GroupedSeries> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// Compute the summary table and grouped series for an enriched table
pub fn aggregate(df: &DataFrame) -> Result<Aggregates> {
    let caps = Capabilities::detect(df);
    let mut summary = SummaryTable::default();
    let mut series = Vec::new();

    let titles = if caps.supports(Feature::ReviewsPerMovie) {
        Some(text_values(df, MOVIE_TITLE)?)
    } else {
        None
    };
    let ratings: Option<Vec<Option<f64>>> = if caps.supports(Feature::RatingStats) {
        Some(float_values(df, RATING)?)
    } else {
        None
    };
    let present_ratings: Vec<f64> = ratings.iter().flatten().flatten().copied().collect();
    let word_counts: Option<Vec<f64>> = if caps.supports(Feature::WordCountStats) {
        Some(float_values(df, WORD_COUNT)?.into_iter().flatten().collect())
    } else {
        None
    };
    let sentiments: Option<Vec<String>> = if caps.supports(Feature::SentimentBreakdown) {
        Some(
            text_values(df, SENTIMENT_PROXY)?
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect(),
        )
    } else {
        None
    };

    summary.push("count_reviews", Some(df.height() as f64));
    summary.push(
        "unique_movies",
        titles.as_ref().map(|t| count_distinct(t) as f64),
    );

    let rating_stat = |f: fn(&[f64]) -> Option<f64>| {
        ratings.as_ref().and_then(|_| f(&present_ratings))
    };
    summary.push("rating_mean", rating_stat(stats::mean));
    summary.push("rating_median", rating_stat(stats::median));
    summary.push("rating_min", rating_stat(stats::min));
    summary.push("rating_max", rating_stat(stats::max));
    summary.push(
        "count_high_rated",
        ratings.as_ref().map(|_| {
            present_ratings
                .iter()
                .filter(|r| **r >= HIGH_RATING_THRESHOLD)
                .count() as f64
        }),
    );

    let wc = word_counts.as_deref();
    summary.push("word_count_mean", wc.and_then(stats::mean));
    summary.push("word_count_std", wc.and_then(stats::sample_std));
    summary.push("word_count_p95", wc.and_then(|v| stats::quantile(v, 0.95)));

    for label in SentimentLabel::ALL {
        let count = sentiments
            .as_ref()
            .map(|s| s.iter().filter(|l| l.as_str() == label.as_str()).count() as f64);
        summary.push(format!("sentiment_{}", label), count);
    }

    if let Some(titles) = &titles {
        series.push(GroupedSeries::new(
            "reviews_per_movie",
            value_counts(titles.iter().map(|t| t.as_deref())),
        ));
    }

    if let (Some(titles), Some(ratings)) = (&titles, &ratings) {
        series.push(GroupedSeries::new(
            "avg_rating_per_movie",
            average_by_group(titles, ratings),
        ));
    }

    for column in present_grouping_columns(df) {
        let values = text_values(df, column)?;
        series.push(GroupedSeries::new(
            format!("count_per_{}", column),
            value_counts(values.iter().map(|v| v.as_deref())),
        ));
    }

    for column in present_date_columns(df) {
        let dates = read_dates(df, column)?;
        series.push(GroupedSeries::new(
            format!("monthly_{}", column),
            monthly_counts(&dates),
        ));
    }

    if caps.supports(Feature::SentimentWordCounts) {
        if let Some(sentiments) = &sentiments {
            let counts = float_values(df, WORD_COUNT)?;
            series.push(GroupedSeries::new(
                "avg_word_count_by_sentiment",
                average_word_count_by_sentiment(sentiments, &counts),
            ));
        }
    }

    if caps.supports(Feature::KeywordStats) {
        if let Some(sentiments) = &sentiments {
            let keywords = list_values(df, KEYWORDS)?;
            for label in [SentimentLabel::Positive, SentimentLabel::Negative] {
                series.push(GroupedSeries::new(
                    format!("top_keywords_{}", label),
                    top_keywords_for(sentiments, &keywords, label),
                ));
            }
        }
    }

    if ratings.is_some() {
        series.push(GroupedSeries::new(
            "rating_histogram",
            rating_histogram(&present_ratings, RATING_HISTOGRAM_BINS),
        ));
    }

    Ok(Aggregates { summary, series })
}

/// Rows with a rating at or above `threshold`, keeping title and rating
pub fn high_rated_reviews(df: &DataFrame, threshold: f64) -> Result<DataFrame> {
    if !Capabilities::detect(df).supports(Feature::RatingStats) {
        return Ok(DataFrame::empty());
    }

    let mask: Vec<bool> = float_values(df, RATING)?
        .into_iter()
        .map(|r| r.is_some_and(|r| r >= threshold))
        .collect();
    let filtered = filter_rows(df, &mask)?;

    let columns: Vec<&str> = [MOVIE_TITLE, RATING]
        .into_iter()
        .filter(|c| filtered.column(c).is_ok())
        .collect();
    Ok(filtered.select(columns)?)
}

/// Distinct non-empty values
fn count_distinct(values: &[Option<String>]) -> usize {
    values
        .iter()
        .flatten()
        .filter(|v| !v.is_empty())
        .collect::<std::collections::HashSet<_>>()
        .len()
}

/// Occurrences per non-empty value, count descending, ties in first-seen order
fn value_counts<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<(String, f64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.flatten().filter(|v| !v.is_empty()) {
        let count = counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        });
        *count += 1;
    }

    let mut points: Vec<(String, f64)> = order
        .into_iter()
        .map(|v| (v.to_string(), counts[v] as f64))
        .collect();
    points.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    points
}

/// Mean rating per title, descending; titles without ratings are left out
fn average_by_group(titles: &[Option<String>], ratings: &[Option<f64>]) -> Vec<(String, f64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
    for (title, rating) in titles.iter().zip(ratings) {
        let (Some(title), Some(rating)) = (title.as_deref(), rating) else {
            continue;
        };
        if title.is_empty() {
            continue;
        }
        groups
            .entry(title)
            .or_insert_with(|| {
                order.push(title);
                Vec::new()
            })
            .push(*rating);
    }

    let mut points: Vec<(String, f64)> = order
        .into_iter()
        .filter_map(|t| stats::mean(&groups[t]).map(|m| (t.to_string(), m)))
        .collect();
    points.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    points
}

/// Dates from a `Date` column, or parsed leniently from text
fn read_dates(df: &DataFrame, column: &str) -> Result<Vec<Option<NaiveDate>>> {
    if df.column(column)?.dtype() == &DataType::Date {
        return date_values(df, column);
    }
    Ok(text_values(df, column)?
        .iter()
        .map(|v| v.as_deref().and_then(parse_date))
        .collect())
}

/// Calendar-month buckets keyed by the first of the month, ascending.
///
/// Months between the first and last observed month are included with a
/// zero count; absent dates are ignored.
pub fn monthly_counts(dates: &[Option<NaiveDate>]) -> Vec<(String, f64)> {
    let mut buckets: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in dates.iter().flatten() {
        if let Some(month) = first_of_month(*date) {
            *buckets.entry(month).or_insert(0) += 1;
        }
    }

    let (Some(first), Some(last)) = (
        buckets.keys().next().copied(),
        buckets.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let mut points = Vec::new();
    let mut month = first;
    while month <= last {
        let count = buckets.get(&month).copied().unwrap_or(0);
        points.push((month.format("%Y-%m-%d").to_string(), count as f64));
        month = match next_month(month) {
            Some(next) => next,
            None => break,
        };
    }
    points
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

fn next_month(month: NaiveDate) -> Option<NaiveDate> {
    if month.month() == 12 {
        NaiveDate::from_ymd_opt(month.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(month.year(), month.month() + 1, 1)
    }
}

/// Mean word count per sentiment label, rounded to 1 dp, labels sorted
fn average_word_count_by_sentiment(
    sentiments: &[String],
    word_counts: &[Option<f64>],
) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (label, count) in sentiments.iter().zip(word_counts) {
        if let Some(count) = count {
            groups.entry(label.as_str()).or_default().push(*count);
        }
    }
    groups
        .into_iter()
        .filter_map(|(label, counts)| {
            stats::mean(&counts).map(|m| (label.to_string(), round_to(m, 1)))
        })
        .collect()
}

/// Most common keywords among rows carrying `label`
fn top_keywords_for(
    sentiments: &[String],
    keywords: &[Vec<String>],
    label: SentimentLabel,
) -> Vec<(String, f64)> {
    let rows: Vec<Vec<String>> = sentiments
        .iter()
        .zip(keywords)
        .filter(|(s, _)| s.as_str() == label.as_str())
        .map(|(_, k)| k.clone())
        .collect();
    KeywordVocabulary::build(&rows, TOP_KEYWORDS_PER_SENTIMENT)
        .entries()
        .iter()
        .map(|(token, count)| (token.clone(), *count as f64))
        .collect()
}

/// Equal-width histogram over `[min, max]`; the last bin is closed.
///
/// A single distinct value is centred in a unit-wide range.
pub fn rating_histogram(ratings: &[f64], bins: usize) -> Vec<(String, f64)> {
    let (Some(lo), Some(hi)) = (stats::min(ratings), stats::max(ratings)) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for rating in ratings {
        let idx = (((rating - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = lo + width * i as f64;
            let end = start + width;
            (format!("{:.2}-{:.2}", start, end), count as f64)
        })
        .collect()
}
