//! Pipeline module - load, inspect, normalize, derive and aggregate

pub mod aggregate;
pub mod capabilities;
pub mod columns;
pub mod features;
pub mod frame;
pub mod keywords;
pub mod loader;
pub mod normalize;
pub mod quality;
pub mod sentiment;
pub mod stats;

pub use aggregate::*;
pub use capabilities::{Capabilities, Feature};
pub use features::*;
pub use keywords::{tokenize, KeywordVocabulary, DEFAULT_TOP_KEYWORDS};
pub use loader::*;
pub use normalize::*;
pub use quality::*;
pub use sentiment::{SentimentLabel, SentimentThresholds};

use polars::prelude::DataFrame;

use crate::error::Result;

/// Everything one run produces after loading
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Quality snapshot of the table as loaded
    pub quality: QualityReport,
    pub derived: DerivedTable,
    pub aggregates: Aggregates,
}

/// Run every stage after loading, threading the table through each one
pub fn process(
    raw: DataFrame,
    policy: &CleaningPolicy,
    config: &FeatureConfig,
) -> Result<PipelineOutput> {
    let quality = analyze_quality(&raw)?;
    let normalized = normalize(raw, policy)?;
    let derived = derive_features(normalized, config)?;
    let aggregates = aggregate(&derived.table)?;
    Ok(PipelineOutput {
        quality,
        derived,
        aggregates,
    })
}
