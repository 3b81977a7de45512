use std::env;
use std::io::{self, Write as _};
use std::path::PathBuf;

use crate::console;
use crate::dataset::{
    analyze_folder, backup_destination, backup_folder, build_report, validate_folder,
    CleanerConfig, DEFAULT_DATA_FOLDER,
};
use crate::pipeline::{self, RunOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Analyze,
    Clean,
    Validate,
    Report,
    Backup,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("analyze") => Some(Command::Analyze),
        Some("clean") => Some(Command::Clean),
        Some("validate") => Some(Command::Validate),
        Some("report") => Some(Command::Report),
        Some("backup") => Some(Command::Backup),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Analyze) => handle_analyze(args),
        Some(Command::Clean) => handle_clean(args),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Report) => handle_report(args),
        Some(Command::Backup) => handle_backup(args),
        None => {
            eprintln!(
                "usage: rapih <analyze|clean|validate|report|backup> [folder] [--yes] [--json]"
            );
            2
        }
    }
}

fn handle_analyze(args: &[String]) -> i32 {
    let config = config_from_args(args);
    match analyze_folder(&config) {
        Ok(report) => {
            if has_flag(args, "--json") {
                match serde_json::to_string_pretty(&report) {
                    Ok(payload) => println!("{payload}"),
                    Err(err) => {
                        eprintln!("failed to serialize analysis report: {err}");
                        return 1;
                    }
                }
            } else {
                console::print_analysis(&report);
            }
            0
        }
        Err(err) => {
            eprintln!("analyze failed: {err}");
            1
        }
    }
}

fn handle_clean(args: &[String]) -> i32 {
    let config = config_from_args(args);
    let assume_yes = has_flag(args, "--yes");

    match pipeline::run(&config, || assume_yes || prompt_confirmation()) {
        Ok(RunOutcome::Completed { validation, .. }) => {
            if validation.all_valid() {
                0
            } else {
                1
            }
        }
        Ok(RunOutcome::AlreadyClean { .. }) | Ok(RunOutcome::Aborted) => 0,
        Ok(RunOutcome::NoValidFiles) => {
            eprintln!("no collection files found in {}", config.folder.display());
            1
        }
        Ok(RunOutcome::NothingCleaned { .. }) => 1,
        Err(err) => {
            eprintln!("clean failed: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let config = config_from_args(args);
    match validate_folder(&config) {
        Ok(summary) => {
            if has_flag(args, "--json") {
                match serde_json::to_string_pretty(&summary) {
                    Ok(payload) => println!("{payload}"),
                    Err(err) => {
                        eprintln!("failed to serialize validation summary: {err}");
                        return 1;
                    }
                }
            } else {
                console::print_validation(&summary);
            }
            if summary.all_valid() {
                0
            } else {
                1
            }
        }
        Err(err) => {
            eprintln!("validate failed: {err}");
            1
        }
    }
}

fn handle_report(args: &[String]) -> i32 {
    let config = config_from_args(args);
    match build_report(&config) {
        Ok(report) => {
            console::print_report(&report);
            0
        }
        Err(err) => {
            eprintln!("report failed: {err}");
            1
        }
    }
}

fn handle_backup(args: &[String]) -> i32 {
    let config = config_from_args(args);
    let destination = backup_destination(&config.folder);
    match backup_folder(&config.folder, &destination) {
        Ok(summary) => {
            println!(
                "backup created: {} ({} files)",
                summary.destination.display(),
                summary.files_copied
            );
            0
        }
        Err(err) => {
            eprintln!("backup failed: {err}");
            1
        }
    }
}

/// Folder resolution order: first non-flag argument after the subcommand,
/// `RAPIH_DATA_DIR`, then the default `data` folder.
fn config_from_args(args: &[String]) -> CleanerConfig {
    let folder = args
        .iter()
        .skip(2)
        .find(|arg| !arg.starts_with("--"))
        .map(PathBuf::from)
        .or_else(|| env::var("RAPIH_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FOLDER));
    CleanerConfig::for_folder(folder)
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

/// Ask on stdin before anything is mutated. Accepts y, yes, and ya, the way
/// the dataset's maintainers answer. Everything else declines, as does a
/// closed stdin, so a scripted run without `--yes` never mutates.
fn prompt_confirmation() -> bool {
    print!("clean these files? (y/n) ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes" | "ya")
}
