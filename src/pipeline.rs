//! The full cleaning run. Analysis always happens first and is the only
//! signal for whether anything needs to change; the mutating stages run
//! behind a confirmation gate and never before a successful backup.

use crate::console;
use crate::dataset::{
    analyze_folder, backup_destination, backup_folder, build_report, clean_folder,
    validate_folder, BackupSummary, CleanSummary, CleanerConfig, CollectionReport, DatasetError,
    ValidationSummary,
};

/// How a run ended. Every variant short of `Completed` means the dataset
/// was left exactly as it was found, except that `NothingCleaned` may
/// follow per-file write failures.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every file already numbered `1..count`; nothing written.
    AlreadyClean { report: CollectionReport },
    /// No file in the folder parsed as a collection document.
    NoValidFiles,
    /// The caller declined the confirmation gate.
    Aborted,
    /// Cleaning was confirmed but not one file could be rewritten.
    NothingCleaned { clean: CleanSummary },
    /// The mutating path ran to the end.
    Completed {
        backup: BackupSummary,
        clean: CleanSummary,
        validation: ValidationSummary,
        report: CollectionReport,
    },
}

/// Run the whole pipeline on one folder. `confirm` is asked exactly once,
/// and only when analysis found files to fix; pass a closure returning
/// `true` to run unattended.
pub fn run(
    config: &CleanerConfig,
    mut confirm: impl FnMut() -> bool,
) -> Result<RunOutcome, DatasetError> {
    if !config.folder.is_dir() {
        return Err(DatasetError::FolderNotFound(config.folder.clone()));
    }

    let analysis = analyze_folder(config)?;
    console::print_analysis(&analysis);

    if analysis.is_empty() {
        return Ok(RunOutcome::NoValidFiles);
    }

    if !analysis.needs_cleaning() {
        println!("all files already in sequence, nothing to renumber");
        let report = build_report(config)?;
        console::print_report(&report);
        return Ok(RunOutcome::AlreadyClean { report });
    }

    println!(
        "{} of {} files need cleaning",
        analysis.files_needing_cleaning(),
        analysis.analyses.len()
    );

    if !confirm() {
        println!("aborted, nothing changed");
        return Ok(RunOutcome::Aborted);
    }

    let destination = backup_destination(&config.folder);
    let backup = backup_folder(&config.folder, &destination)?;
    println!(
        "backup created: {} ({} files)",
        backup.destination.display(),
        backup.files_copied
    );

    let clean = clean_folder(config)?;
    console::print_clean(&clean);

    if clean.success_count() == 0 {
        println!("no files were cleaned, skipping validation");
        return Ok(RunOutcome::NothingCleaned { clean });
    }

    let validation = validate_folder(config)?;
    console::print_validation(&validation);

    let report = build_report(config)?;
    console::print_report(&report);

    println!(
        "done: {} files renumbered, backup at {}",
        clean.success_count(),
        backup.destination.display()
    );

    Ok(RunOutcome::Completed {
        backup,
        clean,
        validation,
        report,
    })
}
