//! Error types for dataset runs. Per-file problems are collected into batch
//! summaries at the file boundary; folder-level problems abort the run.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Why a single collection file could not be processed. These never abort
/// the surrounding stage; callers record them and move to the next file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read file: {0}")]
    Read(io::Error),
    #[error("failed to parse JSON: {0}")]
    Parse(serde_json::Error),
    #[error("missing 'hadist' array")]
    MissingHadist,
    #[error("failed to write file: {0}")]
    Write(io::Error),
}

impl FileError {
    pub fn kind(&self) -> FileErrorKind {
        match self {
            Self::Read(_) => FileErrorKind::Read,
            Self::Parse(_) => FileErrorKind::Parse,
            Self::MissingHadist => FileErrorKind::MissingHadist,
            Self::Write(_) => FileErrorKind::Write,
        }
    }
}

/// Stable machine-readable name for a [`FileError`], carried in JSON output
/// next to the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorKind {
    Read,
    Parse,
    MissingHadist,
    Write,
}

/// One failed file inside a batch summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub filename: String,
    pub kind: FileErrorKind,
    pub message: String,
}

impl FileFailure {
    pub fn new(filename: impl Into<String>, error: &FileError) -> Self {
        Self {
            filename: filename.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Folder-level failures. Any of these ends the run; in particular a failed
/// backup must stop the pipeline before a single file is rewritten.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),
    #[error("failed to scan folder {}: {source}", .path.display())]
    Scan { path: PathBuf, source: io::Error },
    #[error("backup failed: {0}")]
    Backup(io::Error),
    #[error("backup destination already exists: {}", .0.display())]
    BackupExists(PathBuf),
}
