//! Console rendering for stage summaries. Data shaping lives in the dataset
//! modules; everything here is plain aligned text on stdout, with per-file
//! errors on stderr.

use crate::dataset::{
    AnalysisReport, CleanSummary, CollectionReport, NumberingAnalysis, ValidationSummary,
};

/// Short status column for one analysis row: `ok`, or a comma list of what
/// is wrong with the numbering.
pub fn numbering_flags(analysis: &NumberingAnalysis) -> String {
    if analysis.is_sequential {
        return "ok".to_string();
    }
    let mut flags = Vec::new();
    if analysis.has_duplicates {
        flags.push("duplicates");
    }
    if analysis.has_missing {
        flags.push("gaps");
    }
    if analysis.has_zero_or_negative {
        flags.push("non-positive");
    }
    if flags.is_empty() {
        flags.push("out-of-order");
    }
    flags.join(",")
}

pub fn print_analysis(report: &AnalysisReport) {
    println!("numbering check:");
    for analysis in &report.analyses {
        println!(
            "  {:<16} {:>5} hadist | no {}..{} | {:<24} | {}",
            analysis.filename,
            analysis.record_count,
            analysis.min_no,
            analysis.max_no,
            numbering_flags(analysis),
            analysis.collection
        );
    }
    for failure in &report.failures {
        eprintln!("  {:<16} {}", failure.filename, failure.message);
    }
    if report.analyses.is_empty() {
        println!("  no collection files found");
    }
}

pub fn print_clean(summary: &CleanSummary) {
    println!("cleaning:");
    for file in &summary.cleaned {
        println!(
            "  {:<16} renumbered {} hadist",
            file.filename, file.record_count
        );
    }
    for failure in &summary.failures {
        eprintln!("  {:<16} {}", failure.filename, failure.message);
    }
    println!(
        "  {} of {} files cleaned",
        summary.success_count(),
        summary.total_files()
    );
}

pub fn print_validation(summary: &ValidationSummary) {
    println!("validation:");
    for check in &summary.checks {
        println!(
            "  {:<16} {:>5} hadist | {:<24} | {}",
            check.filename,
            check.record_count,
            check.collection,
            if check.is_valid { "ok" } else { "OUT OF SEQUENCE" }
        );
    }
    for failure in &summary.failures {
        eprintln!("  {:<16} {}", failure.filename, failure.message);
    }
    println!(
        "  total: {} hadist in {} files",
        summary.total_records(),
        summary.total_files()
    );
    if summary.all_valid() {
        println!("  all files valid");
    } else {
        println!("  {} file(s) invalid", summary.invalid_count());
    }
}

pub fn print_report(report: &CollectionReport) {
    println!("collections:");
    for collection in &report.collections {
        println!(
            "  {} ({} files, {} hadist)",
            collection.collection,
            collection.files.len(),
            collection.total_records
        );
        for file in &collection.files {
            println!("    {:<16} {:>5} hadist", file.filename, file.record_count);
        }
    }
    for failure in &report.failures {
        eprintln!("  {:<16} {}", failure.filename, failure.message);
    }
    println!(
        "  grand total: {} hadist in {} files",
        report.total_records, report.total_files
    );
}
