//! JSON run report
//!
//! Bundles the quality snapshot, summary metrics, grouped series and the
//! keyword vocabulary of one run into a single machine-readable document.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    Aggregates, CleaningPolicy, FeatureConfig, GroupedSeries, KeywordVocabulary, PipelineOutput,
    QualityReport, SummaryMetric,
};

/// Metadata about the run
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (RFC 3339)
    pub timestamp: String,
    pub reelclean_version: String,
    pub input_file: String,
    pub output_file: String,
    pub summary_file: String,
    pub policy: CleaningPolicy,
    pub features: FeatureConfig,
}

/// Complete report for one run
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub metadata: RunMetadata,
    pub quality: &'a QualityReport,
    pub rows_after_cleaning: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_column: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_text_threshold: Option<f64>,
    pub vocabulary: &'a KeywordVocabulary,
    pub summary: &'a [SummaryMetric],
    pub series: &'a [GroupedSeries],
}

/// Parameters describing where a run read from and wrote to
pub struct RunReportParams<'a> {
    pub input_file: &'a str,
    pub output_file: &'a str,
    pub summary_file: &'a str,
    pub policy: CleaningPolicy,
    pub features: FeatureConfig,
}

impl<'a> RunReport<'a> {
    pub fn new(output: &'a PipelineOutput, params: &RunReportParams) -> Self {
        let Aggregates { summary, series } = &output.aggregates;
        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                reelclean_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: params.input_file.to_string(),
                output_file: params.output_file.to_string(),
                summary_file: params.summary_file.to_string(),
                policy: params.policy,
                features: params.features,
            },
            quality: &output.quality,
            rows_after_cleaning: output.derived.table.height(),
            text_column: output.derived.text_column.as_deref(),
            long_text_threshold: output.derived.long_text_threshold,
            vocabulary: &output.derived.vocabulary,
            summary: summary.metrics(),
            series: series.as_slice(),
        }
    }
}

/// Write the run report as pretty-printed JSON
pub fn write_run_report(
    output: &PipelineOutput,
    params: &RunReportParams,
    path: &Path,
) -> Result<()> {
    let report = RunReport::new(output, params);
    let json = serde_json::to_string_pretty(&report)
        .context("Failed to serialize run report to JSON")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write run report: {}", path.display()))?;
    Ok(())
}
