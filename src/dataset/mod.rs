//! The dataset stages: analyze, backup, clean, validate, report. Each stage
//! works on one folder of collection JSON files and returns a summary value;
//! printing is left to the callers.

pub mod analyze;
pub mod backup;
pub mod clean;
pub mod document;
pub mod error;
pub mod report;
pub mod validate;

use std::path::PathBuf;

pub use analyze::{analyze_document, analyze_folder, AnalysisReport, NumberingAnalysis};
pub use backup::{backup_destination, backup_folder, BackupSummary};
pub use clean::{clean_file, clean_folder, CleanSummary, CleanedFile};
pub use document::{file_label, list_collection_files, CollectionDocument, UNKNOWN_COLLECTION};
pub use error::{DatasetError, FileError, FileErrorKind, FileFailure};
pub use report::{build_report, CollectionReport, CollectionSummary, FileCount};
pub use validate::{validate_document, validate_folder, FileValidation, ValidationSummary};

pub const DEFAULT_DATA_FOLDER: &str = "data";
pub const DEFAULT_EXTENSION: &str = "json";

/// Which folder to work on and which files in it count as dataset files.
/// The defaults match the layout of the hadist API repo this tool tidies:
/// a `data/` folder of `*.json` collection files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanerConfig {
    pub folder: PathBuf,
    pub extension: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from(DEFAULT_DATA_FOLDER),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl CleanerConfig {
    /// Config for `folder` with the default extension filter.
    pub fn for_folder(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            ..Self::default()
        }
    }
}
