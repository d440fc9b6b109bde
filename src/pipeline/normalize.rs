//! Table normalization: deduplication, missing-value fill and type coercion
//!
//! Steps run in a fixed order, each on the output of the previous one:
//! dedupe, fill, dates, free text, rating, and a final dedupe for rows that
//! only became identical once their text and numbers were normalized.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::columns::{DATE_COLUMNS, NORMALIZED_TEXT_COLUMNS, RATING};
use super::frame::{date_series, float_values, has_column, text_values, unique_rows};
use crate::error::Result;

/// Date-only layouts tried in order
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Timestamp layouts whose date part is kept
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// What to do with exact-duplicate rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first occurrence, drop the rest
    #[default]
    Drop,
    /// Leave duplicates in place
    Keep,
}

/// What to do with null cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Text nulls become `""`; non-text nulls stay as their typed absent marker
    #[default]
    Fill,
    /// Leave text nulls in place
    Keep,
}

/// Cleaning decisions made before the pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CleaningPolicy {
    pub duplicates: DuplicatePolicy,
    pub missing: MissingPolicy,
}

/// Normalize a raw table.
///
/// Unparseable dates and non-numeric ratings become absent values; missing
/// recognized columns are skipped. Nothing here aborts a run on bad data.
pub fn normalize(df: DataFrame, policy: &CleaningPolicy) -> Result<DataFrame> {
    let mut df = df;

    if policy.duplicates == DuplicatePolicy::Drop {
        df = drop_duplicate_rows(&df)?;
    }

    if policy.missing == MissingPolicy::Fill {
        fill_missing(&mut df)?;
    }

    for name in DATE_COLUMNS {
        if has_column(&df, name) {
            coerce_date_column(&mut df, name)?;
        }
    }

    for name in NORMALIZED_TEXT_COLUMNS {
        if has_column(&df, name) {
            normalize_text_column(&mut df, name)?;
        }
    }

    if has_column(&df, RATING) {
        coerce_rating_column(&mut df)?;
    }

    if policy.duplicates == DuplicatePolicy::Drop {
        df = drop_duplicate_rows(&df)?;
    }

    Ok(df)
}

/// Remove rows equal to an earlier row, keeping the first occurrence
pub fn drop_duplicate_rows(df: &DataFrame) -> Result<DataFrame> {
    let unique = unique_rows(df)?;
    let dropped = df.height() - unique.height();
    if dropped > 0 {
        info!(dropped, "removed duplicate rows");
    }
    Ok(unique)
}

/// Replace text nulls with `""` and NaN floats with null.
///
/// Every other dtype keeps its typed null as the absent marker. Recognized
/// date and rating columns are left for their own coercion step.
fn fill_missing(df: &mut DataFrame) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for name in names {
        if name == RATING || DATE_COLUMNS.contains(&name.as_str()) {
            continue;
        }
        let dtype = df.column(&name)?.dtype().clone();
        match dtype {
            DataType::String => {
                if df.column(&name)?.null_count() == 0 {
                    continue;
                }
                let filled: Vec<String> = text_values(df, &name)?
                    .into_iter()
                    .map(Option::unwrap_or_default)
                    .collect();
                df.with_column(Series::new(name.as_str().into(), filled))?;
            }
            DataType::Float32 | DataType::Float64 => {
                let values = float_values(df, &name)?;
                df.with_column(Series::new(name.as_str().into(), values))?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn coerce_date_column(df: &mut DataFrame, name: &str) -> Result<()> {
    match df.column(name)?.dtype() {
        DataType::Date => return Ok(()),
        DataType::Datetime(_, _) => {
            let dates = df
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::Date)?;
            df.with_column(dates)?;
            return Ok(());
        }
        _ => {}
    }

    let raw = text_values(df, name)?;
    let parsed: Vec<Option<NaiveDate>> = raw
        .iter()
        .map(|v| v.as_deref().and_then(parse_date))
        .collect();

    let unparseable = raw
        .iter()
        .zip(&parsed)
        .filter(|(raw, parsed)| {
            parsed.is_none() && raw.as_deref().is_some_and(|v| !v.trim().is_empty())
        })
        .count();
    if unparseable > 0 {
        info!(column = name, unparseable, "unparseable dates set to absent");
    }

    df.with_column(date_series(name, &parsed)?)?;
    Ok(())
}

fn normalize_text_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let values: Vec<Option<String>> = text_values(df, name)?
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_lowercase()))
        .collect();
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

fn coerce_rating_column(df: &mut DataFrame) -> Result<()> {
    let dtype = df.column(RATING)?.dtype().clone();
    let ratings = if dtype != DataType::String {
        float_values(df, RATING)?
    } else {
        let raw = text_values(df, RATING)?;
        let parsed: Vec<Option<f64>> = raw
            .iter()
            .map(|v| v.as_deref().and_then(parse_rating))
            .collect();

        let invalid = raw
            .iter()
            .zip(&parsed)
            .filter(|(raw, parsed)| {
                parsed.is_none() && raw.as_deref().is_some_and(|v| !v.trim().is_empty())
            })
            .count();
        if invalid > 0 {
            info!(invalid, "non-numeric ratings set to absent");
        }
        parsed
    };

    debug!(
        present = ratings.iter().filter(|r| r.is_some()).count(),
        "coerced rating column"
    );
    df.with_column(Series::new(RATING.into(), ratings))?;
    Ok(())
}

/// Parse a calendar date from the accepted layouts; `None` when none match
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Parse a rating; NaN and non-numeric text are absent
pub fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}
