//! Column access helpers shared by the pipeline stages
//!
//! Stages read recognized columns into plain vectors, transform them, and
//! write a freshly built series back. These helpers keep the casting rules
//! in one place.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::Result;

/// Days between 0001-01-01 (CE day 1) and 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Whether the table holds a column with this name
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Read a column as optional strings, casting non-text columns
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Read a column as optional floats; NaN is reported as absent
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Read a `Date` column as optional calendar dates
pub fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    Ok(series
        .i32()?
        .into_iter()
        .map(|v| v.and_then(days_to_date))
        .collect())
}

/// Build a `Date` series from optional calendar dates
pub fn date_series(name: &str, values: &[Option<NaiveDate>]) -> Result<Series> {
    let days: Vec<Option<i32>> = values.iter().map(|v| v.map(date_to_days)).collect();
    Ok(Series::new(name.into(), days).cast(&DataType::Date)?)
}

/// Read a list-of-text column as a vector of token lists
pub fn list_values(df: &DataFrame, name: &str) -> Result<Vec<Vec<String>>> {
    let series = df.column(name)?.as_materialized_series().clone();
    let mut rows = Vec::with_capacity(series.len());
    for entry in series.list()?.into_iter() {
        let tokens = match entry {
            Some(inner) => inner
                .str()?
                .into_iter()
                .flatten()
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };
        rows.push(tokens);
    }
    Ok(rows)
}

/// Build a `List(String)` series from token lists
pub fn list_series(name: &str, rows: &[Vec<String>]) -> Series {
    let inner: Vec<Series> = rows
        .iter()
        .map(|tokens| Series::new(PlSmallStr::EMPTY, tokens.as_slice()))
        .collect();
    if inner.is_empty() {
        return Series::new_empty(name.into(), &DataType::List(Box::new(DataType::String)));
    }
    Series::new(name.into(), inner)
}

/// Drop rows equal to an earlier row, keeping the first occurrence in order.
///
/// Nulls only match nulls, and float cells compare by value so `0.0` and
/// `-0.0` are the same cell.
pub fn unique_rows(df: &DataFrame) -> Result<DataFrame> {
    if df.width() == 0 || df.height() < 2 {
        return Ok(df.clone());
    }
    Ok(df.unique_stable(None, UniqueKeepStrategy::First, None)?)
}

/// Keep only the rows whose mask entry is true, preserving order
pub fn filter_rows(df: &DataFrame, mask: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("mask".into(), mask);
    Ok(df.filter(&mask)?)
}

fn date_to_days(date: NaiveDate) -> i32 {
    use chrono::Datelike;
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}
