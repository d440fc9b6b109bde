//! Dataset loader for delimited text files

use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Options controlling how the input file is read
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field separator byte
    pub delimiter: u8,
    /// Whether the first line holds column names
    pub has_header: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

/// Basic shape information about a loaded dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetShape {
    pub rows: usize,
    pub columns: usize,
    pub memory_mb: f64,
}

/// Load a delimited text file into a DataFrame.
///
/// Every column is read as text; the normalizer owns type coercion, so a
/// stray value in a numeric-looking column never fails the load. Empty
/// fields become nulls.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    if !path.exists() {
        return Err(PipelineError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(options.has_header)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_separator(options.delimiter))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| PipelineError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded dataset"
    );

    Ok(df)
}

/// Read only the header of a delimited file and return its column names
pub fn get_column_names(path: &Path, options: &LoadOptions) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(PipelineError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(options.has_header)
        .with_infer_schema_length(Some(0))
        .with_n_rows(Some(1))
        .with_parse_options(CsvParseOptions::default().with_separator(options.delimiter))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| PipelineError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect())
}

/// Rows, columns and estimated in-memory size of a table
pub fn dataset_shape(df: &DataFrame) -> DatasetShape {
    let (rows, columns) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    DatasetShape {
        rows,
        columns,
        memory_mb,
    }
}
