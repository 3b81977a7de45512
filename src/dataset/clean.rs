//! Clean stage: rewrite record numbers to `1..count` in file order and sync
//! `metadata.total_hadist`. Only runs after a successful backup.

use std::path::Path;

use serde::Serialize;

use crate::dataset::document::{self, CollectionDocument};
use crate::dataset::error::{DatasetError, FileError, FileFailure};
use crate::dataset::CleanerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedFile {
    pub filename: String,
    pub record_count: usize,
}

/// What the clean stage did to a folder. A failed file is recorded and left
/// as it was on disk; the rest of the batch still runs.
#[derive(Debug, Clone, Serialize)]
pub struct CleanSummary {
    pub cleaned: Vec<CleanedFile>,
    pub failures: Vec<FileFailure>,
}

impl CleanSummary {
    pub fn success_count(&self) -> usize {
        self.cleaned.len()
    }

    pub fn total_files(&self) -> usize {
        self.cleaned.len() + self.failures.len()
    }

    pub fn total_records(&self) -> usize {
        self.cleaned.iter().map(|file| file.record_count).sum()
    }
}

/// Renumber one file in place. Returns the record count written back.
pub fn clean_file(path: &Path) -> Result<usize, FileError> {
    let mut doc = CollectionDocument::load(path)?;
    let count = doc.renumber();
    doc.save(path)?;
    Ok(count)
}

/// Clean every matching file in the folder. Renumbering is unconditional;
/// an already-sequential file is rewritten to the same numbers.
pub fn clean_folder(config: &CleanerConfig) -> Result<CleanSummary, DatasetError> {
    let files = document::list_collection_files(&config.folder, &config.extension)?;
    let mut summary = CleanSummary {
        cleaned: Vec::new(),
        failures: Vec::new(),
    };
    for path in files {
        let filename = document::file_label(&path);
        match clean_file(&path) {
            Ok(record_count) => summary.cleaned.push(CleanedFile {
                filename,
                record_count,
            }),
            Err(err) => summary.failures.push(FileFailure::new(filename, &err)),
        }
    }
    Ok(summary)
}
