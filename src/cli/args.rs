//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{
    CleaningPolicy, DuplicatePolicy, FeatureConfig, LoadOptions, MissingPolicy,
    SentimentThresholds, DEFAULT_LONG_TEXT_QUANTILE,
};
use crate::report::OutputPaths;

/// reelclean - Clean a movie-review CSV and compute summary statistics
#[derive(Parser, Debug)]
#[command(name = "reelclean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path for the cleaned and enriched table.
    /// Defaults to the input directory with a '_cleaned' suffix (e.g., reviews.csv -> reviews_cleaned.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output path for the long-format summary table.
    /// Defaults to the input directory with a '_summary' suffix.
    #[arg(short, long)]
    pub summary_output: Option<PathBuf>,

    /// Also write a JSON run report (quality, metrics, series, vocabulary) to this path
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Field delimiter of the input file (single ASCII character, or "tab")
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Keep exact-duplicate rows instead of dropping them
    #[arg(long, default_value = "false")]
    pub keep_duplicates: bool,

    /// Keep null cells instead of filling them with a type-appropriate empty value
    #[arg(long, default_value = "false")]
    pub keep_missing: bool,

    /// Size of the global keyword vocabulary
    #[arg(long, default_value = "20")]
    pub top_keywords: usize,

    /// Reviews with fewer words than this are flagged as short
    #[arg(long, default_value = "10")]
    pub short_threshold: u32,

    /// Ratings at or above this value are labelled positive
    #[arg(long, default_value = "8.0")]
    pub positive_threshold: f64,

    /// Ratings at or below this value are labelled negative
    #[arg(long, default_value = "4.0")]
    pub negative_threshold: f64,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Emit debug diagnostics on stderr (RUST_LOG overrides)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Number of cleaned rows to print after feature derivation (0 disables)
    #[arg(long, default_value = "5")]
    pub preview_rows: usize,
}

impl Cli {
    /// Output destinations, falling back to paths derived from the input
    pub fn output_paths(&self) -> OutputPaths {
        let derived = OutputPaths::derive_from_input(&self.input);
        OutputPaths {
            table: self.output.clone().unwrap_or(derived.table),
            summary: self.summary_output.clone().unwrap_or(derived.summary),
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
            ..LoadOptions::default()
        }
    }

    /// Policy implied by the flags alone, before any prompt
    pub fn cleaning_policy(&self) -> CleaningPolicy {
        CleaningPolicy {
            duplicates: if self.keep_duplicates {
                DuplicatePolicy::Keep
            } else {
                DuplicatePolicy::Drop
            },
            missing: if self.keep_missing {
                MissingPolicy::Keep
            } else {
                MissingPolicy::Fill
            },
        }
    }

    pub fn feature_config(&self) -> FeatureConfig {
        FeatureConfig {
            top_keywords: self.top_keywords,
            short_text_threshold: self.short_threshold,
            long_text_quantile: DEFAULT_LONG_TEXT_QUANTILE,
            sentiment: SentimentThresholds::new(self.positive_threshold, self.negative_threshold),
        }
    }

    /// Reject threshold combinations that would make the labels overlap
    pub fn validate(&self) -> Result<(), String> {
        if self.negative_threshold >= self.positive_threshold {
            return Err(format!(
                "negative threshold ({}) must be below positive threshold ({})",
                self.negative_threshold, self.positive_threshold
            ));
        }
        Ok(())
    }
}

/// Parser for the --delimiter flag
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let bytes = s.as_bytes();
            if bytes.len() == 1 && bytes[0].is_ascii() {
                Ok(bytes[0])
            } else {
                Err(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    s
                ))
            }
        }
    }
}
