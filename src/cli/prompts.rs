//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::Confirm;

use crate::pipeline::{CleaningPolicy, DuplicatePolicy, MissingPolicy, QualityReport};

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Ask how to handle the issues found in the quality report.
///
/// Only issues that are actually present are asked about, and only while
/// `base` would still act on them; a `--keep-*` flag is never overridden.
pub fn choose_cleaning_policy(
    report: &QualityReport,
    base: CleaningPolicy,
) -> Result<CleaningPolicy> {
    let mut policy = base;

    if report.duplicate_row_count > 0 && base.duplicates == DuplicatePolicy::Drop {
        let message = format!(
            "Drop {} duplicated row(s)?",
            report.duplicate_row_count
        );
        if !confirm_step(&message)? {
            policy.duplicates = DuplicatePolicy::Keep;
        }
    }

    let total_missing = report.total_missing();
    if total_missing > 0 && base.missing == MissingPolicy::Fill {
        let message = format!(
            "Fill {} missing cell(s) across {} column(s)?",
            total_missing,
            report.columns_with_missing().len()
        );
        if !confirm_step(&message)? {
            policy.missing = MissingPolicy::Keep;
        }
    }

    Ok(policy)
}
