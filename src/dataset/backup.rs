//! Safety copy taken before the clean stage mutates anything. The whole
//! dataset folder is duplicated to a timestamped sibling; an existing
//! destination is never overwritten.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::dataset::error::DatasetError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSummary {
    pub destination: PathBuf,
    pub files_copied: usize,
}

/// Name for a backup taken now, second resolution. Two backups of the same
/// folder within one second collide, and the second one fails instead of
/// overwriting the first.
pub fn backup_dir_name() -> String {
    format!("backup_{}", Utc::now().format("%Y%m%d_%H%M%S"))
}

/// Where a new backup of `folder` goes: a timestamped directory next to it.
pub fn backup_destination(folder: &Path) -> PathBuf {
    match folder.parent() {
        Some(parent) => parent.join(backup_dir_name()),
        None => PathBuf::from(backup_dir_name()),
    }
}

/// Copy `source` recursively into `destination`. Refuses a missing source
/// and an existing destination; any copy failure aborts the backup, and the
/// caller must not mutate the source afterwards.
pub fn backup_folder(source: &Path, destination: &Path) -> Result<BackupSummary, DatasetError> {
    if !source.is_dir() {
        return Err(DatasetError::FolderNotFound(source.to_path_buf()));
    }
    if destination.exists() {
        return Err(DatasetError::BackupExists(destination.to_path_buf()));
    }
    let mut files_copied = 0usize;
    copy_tree(source, destination, &mut files_copied).map_err(DatasetError::Backup)?;
    Ok(BackupSummary {
        destination: destination.to_path_buf(),
        files_copied,
    })
}

fn copy_tree(source: &Path, destination: &Path, files_copied: &mut usize) -> io::Result<()> {
    // The destination may sit inside the source (backing up "."); snapshot
    // the listing before creating it so the copy never sees its own output.
    let mut entries = Vec::new();
    for entry in fs::read_dir(source)? {
        entries.push(entry?);
    }
    fs::create_dir_all(destination)?;
    for entry in entries {
        let from = entry.path();
        let to = destination.join(entry.file_name());
        if from.is_dir() {
            copy_tree(&from, &to, files_copied)?;
        } else {
            fs::copy(&from, &to)?;
            *files_copied += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_names_are_timestamped() {
        let name = backup_dir_name();
        assert!(name.starts_with("backup_"), "got: {name}");
        let stamp = &name["backup_".len()..];
        assert_eq!(stamp.len(), "YYYYMMDD_HHMMSS".len());
        assert!(stamp.chars().all(|c| c.is_ascii_digit() || c == '_'));
    }

    #[test]
    fn destination_is_a_sibling_of_the_source() {
        let dest = backup_destination(Path::new("some/where/data"));
        assert_eq!(dest.parent(), Some(Path::new("some/where")));

        // A bare relative folder backs up next to it in the same directory.
        let dest = backup_destination(Path::new("data"));
        assert!(dest.parent().map_or(true, |p| p.as_os_str().is_empty()));
    }
}
