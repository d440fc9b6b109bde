//! CSV export of the enriched table and the summary table

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::info;

use crate::pipeline::frame::list_values;
use crate::pipeline::SummaryTable;

/// Separator used when a list-of-text cell is written as a single field
pub const LIST_SEPARATOR: &str = ", ";

/// Destinations for the two output tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub table: PathBuf,
    pub summary: PathBuf,
}

impl OutputPaths {
    /// `<stem>_cleaned.csv` and `<stem>_summary.csv` next to the input
    pub fn derive_from_input(input: &Path) -> Self {
        let parent = input.parent().unwrap_or_else(|| Path::new("."));
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        Self {
            table: parent.join(format!("{}_cleaned.csv", stem)),
            summary: parent.join(format!("{}_summary.csv", stem)),
        }
    }
}

/// Result of each export destination, reported independently
#[derive(Debug)]
pub struct ExportOutcome {
    pub table: Result<()>,
    pub summary: Result<()>,
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        self.table.is_ok() && self.summary.is_ok()
    }
}

/// Write both outputs. A failure on one destination does not stop the other.
///
/// The enriched table uses the input's `delimiter`; the summary is always
/// comma-separated.
pub fn export_outputs(
    df: &DataFrame,
    summary: &SummaryTable,
    paths: &OutputPaths,
    delimiter: u8,
) -> ExportOutcome {
    let table = write_table_csv(df, &paths.table, delimiter);
    let summary = write_summary_csv(summary, &paths.summary);
    ExportOutcome { table, summary }
}

/// Write the enriched table; list columns are joined into one field each
pub fn write_table_csv(df: &DataFrame, path: &Path, delimiter: u8) -> Result<()> {
    let mut flat = flatten_list_columns(df)?;
    write_csv(&mut flat, path, delimiter)?;
    info!(path = %path.display(), rows = flat.height(), "wrote cleaned table");
    Ok(())
}

/// Write the long-format `metric,value` table
pub fn write_summary_csv(summary: &SummaryTable, path: &Path) -> Result<()> {
    let mut df = summary.to_dataframe()?;
    write_csv(&mut df, path, b',')?;
    info!(path = %path.display(), metrics = summary.len(), "wrote summary table");
    Ok(())
}

/// Replace every `List(String)` column with a joined text column
pub fn flatten_list_columns(df: &DataFrame) -> Result<DataFrame> {
    let mut flat = df.clone();
    let list_columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|c| matches!(c.dtype(), DataType::List(_)))
        .map(|c| c.name().to_string())
        .collect();

    for name in list_columns {
        let joined: Vec<String> = list_values(df, &name)?
            .into_iter()
            .map(|tokens| tokens.join(LIST_SEPARATOR))
            .collect();
        flat.with_column(Series::new(name.as_str().into(), joined))?;
    }
    Ok(flat)
}

/// Split a joined list field back into tokens
pub fn split_list_field(field: &str) -> Vec<String> {
    field
        .split(LIST_SEPARATOR.trim())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn write_csv(df: &mut DataFrame, path: &Path, separator: u8) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(separator)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}
