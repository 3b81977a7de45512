//! Validate stage: re-read every file from disk and check that its numbers
//! run exactly `1..count`. Reading back instead of trusting the clean stage
//! catches anything that went wrong between renumbering and the write.

use serde::Serialize;

use crate::dataset::analyze::is_sequential;
use crate::dataset::document::{self, CollectionDocument};
use crate::dataset::error::{DatasetError, FileFailure};
use crate::dataset::CleanerConfig;

/// Verdict for one file that parsed as a collection document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileValidation {
    pub filename: String,
    pub record_count: usize,
    pub is_valid: bool,
    pub collection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_total: Option<i64>,
}

/// Folder-wide verdict. Files that cannot be read, parsed, or lack a
/// `hadist` array land in `failures` and fail the whole folder.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub checks: Vec<FileValidation>,
    pub failures: Vec<FileFailure>,
}

impl ValidationSummary {
    pub fn all_valid(&self) -> bool {
        self.failures.is_empty() && self.checks.iter().all(|check| check.is_valid)
    }

    pub fn invalid_count(&self) -> usize {
        self.checks.iter().filter(|check| !check.is_valid).count() + self.failures.len()
    }

    pub fn total_records(&self) -> usize {
        self.checks.iter().map(|check| check.record_count).sum()
    }

    pub fn total_files(&self) -> usize {
        self.checks.len() + self.failures.len()
    }
}

pub fn validate_document(filename: &str, doc: &CollectionDocument) -> FileValidation {
    let numbers = doc.record_numbers();
    FileValidation {
        filename: filename.to_string(),
        record_count: numbers.len(),
        is_valid: is_sequential(&numbers),
        collection: doc.collection_name().to_string(),
        metadata_total: doc.metadata_total(),
    }
}

/// Check every matching file in the folder, in name order.
pub fn validate_folder(config: &CleanerConfig) -> Result<ValidationSummary, DatasetError> {
    let files = document::list_collection_files(&config.folder, &config.extension)?;
    let mut summary = ValidationSummary {
        checks: Vec::new(),
        failures: Vec::new(),
    };
    for path in files {
        let filename = document::file_label(&path);
        match CollectionDocument::load(&path) {
            Ok(doc) => summary.checks.push(validate_document(&filename, &doc)),
            Err(err) => summary.failures.push(FileFailure::new(filename, &err)),
        }
    }
    Ok(summary)
}
