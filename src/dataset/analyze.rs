//! Read-only numbering analysis. Runs before any mutation and is the only
//! signal the pipeline uses to decide whether cleaning is needed at all.

use std::collections::HashSet;

use serde::Serialize;

use crate::dataset::document::{self, CollectionDocument};
use crate::dataset::error::{DatasetError, FileError, FileFailure};
use crate::dataset::CleanerConfig;

/// Numbering summary for one collection file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberingAnalysis {
    pub filename: String,
    pub record_count: usize,
    pub min_no: i64,
    pub max_no: i64,
    pub has_duplicates: bool,
    pub has_missing: bool,
    pub has_zero_or_negative: bool,
    pub is_sequential: bool,
    pub collection: String,
}

/// Batch analysis over a folder. `skipped` holds files without a `hadist`
/// array (present but not collection documents); `failures` holds files
/// that could not be read or parsed.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analyses: Vec<NumberingAnalysis>,
    pub skipped: Vec<String>,
    pub failures: Vec<FileFailure>,
}

impl AnalysisReport {
    /// Files the clean stage would rewrite.
    pub fn files_needing_cleaning(&self) -> usize {
        self.analyses
            .iter()
            .filter(|analysis| !analysis.is_sequential)
            .count()
    }

    pub fn needs_cleaning(&self) -> bool {
        self.files_needing_cleaning() > 0
    }

    /// True when not a single file parsed as a collection document.
    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty()
    }
}

pub fn analyze_document(filename: &str, doc: &CollectionDocument) -> NumberingAnalysis {
    let numbers = doc.record_numbers();
    let unique: HashSet<i64> = numbers.iter().copied().collect();
    let min_no = numbers.iter().copied().min().unwrap_or(0);
    let max_no = numbers.iter().copied().max().unwrap_or(0);
    // Gaps exist when the distinct numbers cannot fill the [min, max] range.
    let span = max_no as i128 - min_no as i128 + 1;
    NumberingAnalysis {
        filename: filename.to_string(),
        record_count: numbers.len(),
        min_no,
        max_no,
        has_duplicates: unique.len() != numbers.len(),
        has_missing: !numbers.is_empty() && (unique.len() as i128) < span,
        has_zero_or_negative: numbers.iter().any(|&no| no <= 0),
        is_sequential: is_sequential(&numbers),
        collection: doc.collection_name().to_string(),
    }
}

/// The invariant the whole tool exists to enforce: numbers are exactly
/// `1, 2, .., count` in file order. An empty list satisfies it.
pub(crate) fn is_sequential(numbers: &[i64]) -> bool {
    numbers.iter().copied().eq(1..=numbers.len() as i64)
}

/// Analyze every matching file in the folder, in name order.
pub fn analyze_folder(config: &CleanerConfig) -> Result<AnalysisReport, DatasetError> {
    let files = document::list_collection_files(&config.folder, &config.extension)?;
    let mut report = AnalysisReport {
        analyses: Vec::new(),
        skipped: Vec::new(),
        failures: Vec::new(),
    };
    for path in files {
        let filename = document::file_label(&path);
        match CollectionDocument::load(&path) {
            Ok(doc) => report.analyses.push(analyze_document(&filename, &doc)),
            Err(FileError::MissingHadist) => report.skipped.push(filename),
            Err(err) => report.failures.push(FileFailure::new(filename, &err)),
        }
    }
    Ok(report)
}
