//! reelclean: Movie Review Cleaning CLI Tool
//!
//! Loads a review CSV, reports its quality, normalizes it, derives text and
//! sentiment features and writes an enriched table plus a summary table.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use reelclean::cli::{choose_cleaning_policy, Cli};
use reelclean::pipeline::{
    aggregate, analyze_quality, dataset_shape, derive_features, load_dataset, normalize,
    Capabilities, DuplicatePolicy, MissingPolicy, PipelineOutput,
};
use reelclean::report::{
    display_quality_report, display_series, display_summary, display_table_preview,
    display_vocabulary, export_outputs, write_run_report, RunReportParams,
};
use reelclean::utils::{
    create_spinner, finish_with_failure, finish_with_success, finish_with_warning,
    init_logging, print_banner, print_completion, print_config, print_count, print_failure,
    print_info, print_step_header, print_step_time, print_success, RunConfigView,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            print_failure(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if let Err(msg) = cli.validate() {
        anyhow::bail!(msg);
    }

    let paths = cli.output_paths();
    let base_policy = cli.cleaning_policy();
    let feature_config = cli.feature_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&RunConfigView {
        input: &cli.input,
        output: &paths.table,
        summary: &paths.summary,
        drop_duplicates: base_policy.duplicates == DuplicatePolicy::Drop,
        fill_missing: base_policy.missing == MissingPolicy::Fill,
        positive_threshold: feature_config.sentiment.positive,
        negative_threshold: feature_config.sentiment.negative,
    });

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading input file...");
    let raw = match load_dataset(&cli.input, &cli.load_options()) {
        Ok(df) => df,
        Err(e) if e.is_fatal_load_error() => {
            finish_with_failure(&spinner, "Could not load dataset");
            print_failure(&e.diagnostic());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };
    finish_with_success(&spinner, "Dataset loaded");

    let shape = dataset_shape(&raw);
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", shape.rows);
    println!("      Columns: {}", shape.columns);
    println!("      Estimated memory: {:.2} MB", shape.memory_mb);
    print_step_time(step_start.elapsed());

    // Step 2: Data quality
    print_step_header(2, "Data Quality");
    let step_start = Instant::now();
    let quality = analyze_quality(&raw)?;
    display_quality_report(&quality);

    let policy = if quality.has_issues() && !cli.no_confirm {
        println!();
        choose_cleaning_policy(&quality, base_policy)?
    } else {
        base_policy
    };
    if !quality.has_issues() {
        print_info("No missing values or duplicated rows found");
    }
    print_step_time(step_start.elapsed());

    // Step 3: Normalize
    print_step_header(3, "Normalize");
    let step_start = Instant::now();
    let spinner = create_spinner("Cleaning values...");
    let rows_before = raw.height();
    let normalized = normalize(raw, &policy)?;
    finish_with_success(&spinner, "Normalization complete");
    let removed = rows_before - normalized.height();
    if removed > 0 {
        print_count("duplicated row(s) removed", removed, None);
    }
    print_step_time(step_start.elapsed());

    // Step 4: Derive features
    print_step_header(4, "Derive Features");
    let step_start = Instant::now();
    let spinner = create_spinner("Computing word counts, keywords and sentiment...");
    let derived = derive_features(normalized, &feature_config)?;
    match &derived.text_column {
        Some(column) => finish_with_success(
            &spinner,
            &format!("Features derived from '{}'", column),
        ),
        None => finish_with_warning(&spinner, "No text column found, text features skipped"),
    }
    let capabilities = Capabilities::detect(&derived.table);
    print_count("supported feature(s)", capabilities.features().count(), None);
    display_vocabulary(&derived.vocabulary);
    display_table_preview(&derived.table, cli.preview_rows);
    print_step_time(step_start.elapsed());

    // Step 5: Aggregate
    print_step_header(5, "Aggregate");
    let step_start = Instant::now();
    let aggregates = aggregate(&derived.table)?;
    display_summary(&aggregates.summary);
    display_series(&aggregates.series);
    print_step_time(step_start.elapsed());

    let output = PipelineOutput {
        quality,
        derived,
        aggregates,
    };

    // Step 6: Export
    print_step_header(6, "Save Results");
    let step_start = Instant::now();
    let outcome = export_outputs(
        &output.derived.table,
        &output.aggregates.summary,
        &paths,
        cli.delimiter,
    );

    match &outcome.table {
        Ok(()) => print_success(&format!("Saved table to {}", paths.table.display())),
        Err(e) => print_failure(&format!("{:#}", e)),
    }
    match &outcome.summary {
        Ok(()) => print_success(&format!("Saved summary to {}", paths.summary.display())),
        Err(e) => print_failure(&format!("{:#}", e)),
    }

    let mut report_ok = true;
    if let Some(report_path) = &cli.report_json {
        let input_file = cli.input.display().to_string();
        let output_file = paths.table.display().to_string();
        let summary_file = paths.summary.display().to_string();
        let params = RunReportParams {
            input_file: &input_file,
            output_file: &output_file,
            summary_file: &summary_file,
            policy,
            features: feature_config,
        };
        match write_run_report(&output, &params, report_path) {
            Ok(()) => print_success(&format!("Run report saved to {}", report_path.display())),
            Err(e) => {
                report_ok = false;
                print_failure(&format!("{:#}", e));
            }
        }
    }
    print_step_time(step_start.elapsed());

    if !outcome.is_success() || !report_ok {
        return Ok(ExitCode::FAILURE);
    }

    print_completion();
    Ok(ExitCode::SUCCESS)
}
