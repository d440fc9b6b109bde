//! Console rendering of quality reports and summary statistics

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::DataFrame;

use crate::pipeline::{GroupedSeries, KeywordVocabulary, QualityReport, SummaryTable};

/// Rows shown per grouped series
const SERIES_PREVIEW_ROWS: usize = 10;

fn section_header(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Render missing values and duplicates found in the raw table
pub fn display_quality_report(report: &QualityReport) {
    section_header("🔍", "DATA QUALITY");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Missing").add_attribute(Attribute::Bold),
        Cell::new("Missing %").add_attribute(Attribute::Bold),
    ]);

    for ((name, count), (_, pct)) in report
        .missing_count_by_column
        .iter()
        .zip(&report.missing_pct_by_column)
    {
        let color = if *count == 0 { Color::White } else { Color::Yellow };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(count).fg(color),
            Cell::new(format!("{:.2} %", pct)).fg(color),
        ]);
    }
    print_indented(&table);

    println!();
    println!(
        "      Duplicated rows: {}",
        style(report.duplicate_row_count).yellow().bold()
    );
    println!(
        "      Rows with any missing value: {}",
        style(report.rows_with_any_missing).yellow().bold()
    );
}

/// Render the long-format summary metrics
pub fn display_summary(summary: &SummaryTable) {
    section_header("📋", "SUMMARY");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    for metric in summary.metrics() {
        let value = match metric.value {
            Some(v) if v.fract() == 0.0 => Cell::new(format!("{}", v as i64)),
            Some(v) => Cell::new(format!("{:.3}", v)),
            None => Cell::new("null").fg(Color::DarkGrey),
        };
        table.add_row(vec![Cell::new(&metric.metric), value]);
    }
    print_indented(&table);
}

/// Render the first rows of each non-empty grouped series
pub fn display_series(series: &[GroupedSeries]) {
    for s in series.iter().filter(|s| !s.is_empty()) {
        println!();
        println!(
            "      {} {}",
            style(&s.name).yellow(),
            style(format!("({})", s.points.len())).dim()
        );
        for (label, value) in s.points.iter().take(SERIES_PREVIEW_ROWS) {
            println!("        {} {:<32} {}", style("•").dim(), label, value);
        }
    }
}

/// Print the first `rows` rows of the enriched table
pub fn display_table_preview(df: &DataFrame, rows: usize) {
    if rows == 0 || df.height() == 0 {
        return;
    }
    section_header("🎬", "CLEANED TABLE PREVIEW");
    for line in df.head(Some(rows)).to_string().lines() {
        println!("    {}", line);
    }
}

/// Render the global keyword vocabulary on one line
pub fn display_vocabulary(vocabulary: &KeywordVocabulary) {
    if vocabulary.is_empty() {
        return;
    }
    let tokens: Vec<&str> = vocabulary.tokens().collect();
    println!();
    println!(
        "      {} {}",
        style(format!("Top {} keywords:", tokens.len())).cyan(),
        tokens.join(", ")
    );
}
