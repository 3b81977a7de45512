//! One collection file on disk: a JSON object with a `hadist` array of
//! records and an optional `metadata` block. The parsed value is kept whole
//! so fields the cleaner does not interpret survive a rewrite untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::dataset::error::{DatasetError, FileError};

/// Collection name reported for files whose metadata does not carry one.
pub const UNKNOWN_COLLECTION: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct CollectionDocument {
    value: Value,
}

impl CollectionDocument {
    /// Parse a document from raw JSON text. Anything without a top-level
    /// `hadist` array is not a collection document.
    pub fn from_json(raw: &str) -> Result<Self, FileError> {
        let value: Value = serde_json::from_str(raw).map_err(FileError::Parse)?;
        match value.get("hadist") {
            Some(Value::Array(_)) => Ok(Self { value }),
            _ => Err(FileError::MissingHadist),
        }
    }

    pub fn load(path: &Path) -> Result<Self, FileError> {
        let raw = fs::read_to_string(path).map_err(FileError::Read)?;
        Self::from_json(&raw)
    }

    pub fn record_count(&self) -> usize {
        self.records().map_or(0, |records| records.len())
    }

    /// The `no` of every record in file order. A missing or non-integer
    /// `no` reads as 0, which no valid sequence contains.
    pub fn record_numbers(&self) -> Vec<i64> {
        self.records()
            .map(|records| {
                records
                    .iter()
                    .map(|record| record.get("no").and_then(Value::as_i64).unwrap_or(0))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Overwrite every record's `no` with its 1-based position and, when a
    /// `metadata` block exists, set `metadata.total_hadist` to the record
    /// count. No other field is touched. Returns the record count.
    pub fn renumber(&mut self) -> usize {
        let count = match self.value.get_mut("hadist").and_then(Value::as_array_mut) {
            Some(records) => {
                for (index, record) in records.iter_mut().enumerate() {
                    if let Some(fields) = record.as_object_mut() {
                        fields.insert("no".to_string(), Value::from(index as u64 + 1));
                    }
                }
                records.len()
            }
            None => 0,
        };
        if let Some(metadata) = self.value.get_mut("metadata").and_then(Value::as_object_mut) {
            metadata.insert("total_hadist".to_string(), Value::from(count as u64));
        }
        count
    }

    /// `metadata.collection`, or [`UNKNOWN_COLLECTION`] when absent.
    pub fn collection_name(&self) -> &str {
        self.value
            .get("metadata")
            .and_then(|metadata| metadata.get("collection"))
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_COLLECTION)
    }

    /// `metadata.total_hadist` as recorded in the file, if any.
    pub fn metadata_total(&self) -> Option<i64> {
        self.value
            .get("metadata")
            .and_then(|metadata| metadata.get("total_hadist"))
            .and_then(Value::as_i64)
    }

    /// Serialize in the on-disk format: two-space indent, key order as
    /// parsed, non-ASCII text written verbatim.
    pub fn to_pretty_json(&self) -> Result<String, FileError> {
        serde_json::to_string_pretty(&self.value).map_err(FileError::Parse)
    }

    pub fn save(&self, path: &Path) -> Result<(), FileError> {
        let pretty = self.to_pretty_json()?;
        fs::write(path, pretty).map_err(FileError::Write)
    }

    fn records(&self) -> Option<&Vec<Value>> {
        self.value.get("hadist").and_then(Value::as_array)
    }
}

/// Every file in `folder` with the given extension, sorted by name so runs
/// are deterministic. Only the folder scan itself can fail here.
pub fn list_collection_files(folder: &Path, extension: &str) -> Result<Vec<PathBuf>, DatasetError> {
    if !folder.is_dir() {
        return Err(DatasetError::FolderNotFound(folder.to_path_buf()));
    }
    let entries = fs::read_dir(folder).map_err(|source| DatasetError::Scan {
        path: folder.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DatasetError::Scan {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File name for report rows and console output.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
