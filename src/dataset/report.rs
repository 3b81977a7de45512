//! Collection report: file and record counts grouped by
//! `metadata.collection`, with a grand total for the folder.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::document::{self, CollectionDocument};
use crate::dataset::error::{DatasetError, FileError, FileFailure};
use crate::dataset::CleanerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCount {
    pub filename: String,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub collection: String,
    pub files: Vec<FileCount>,
    pub total_records: usize,
}

/// Per-collection totals for a folder. Collections are sorted by name;
/// files inside each collection stay in filename order.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionReport {
    pub collections: Vec<CollectionSummary>,
    pub skipped: Vec<String>,
    pub failures: Vec<FileFailure>,
    pub total_records: usize,
    pub total_files: usize,
}

/// Count every matching file in the folder. Files without a `hadist` array
/// are skipped the same way analysis skips them.
pub fn build_report(config: &CleanerConfig) -> Result<CollectionReport, DatasetError> {
    let files = document::list_collection_files(&config.folder, &config.extension)?;
    let total_files = files.len();

    let mut groups: BTreeMap<String, Vec<FileCount>> = BTreeMap::new();
    let mut skipped = Vec::new();
    let mut failures = Vec::new();

    for path in files {
        let filename = document::file_label(&path);
        match CollectionDocument::load(&path) {
            Ok(doc) => groups
                .entry(doc.collection_name().to_string())
                .or_default()
                .push(FileCount {
                    filename,
                    record_count: doc.record_count(),
                }),
            Err(FileError::MissingHadist) => skipped.push(filename),
            Err(err) => failures.push(FileFailure::new(filename, &err)),
        }
    }

    let mut total_records = 0usize;
    let collections = groups
        .into_iter()
        .map(|(collection, files)| {
            let subtotal = files.iter().map(|file| file.record_count).sum::<usize>();
            total_records += subtotal;
            CollectionSummary {
                collection,
                files,
                total_records: subtotal,
            }
        })
        .collect();

    Ok(CollectionReport {
        collections,
        skipped,
        failures,
        total_records,
        total_files,
    })
}
