use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rapih::dataset::{clean_file, CleanerConfig, CollectionDocument, DatasetError};
use rapih::pipeline::{run, RunOutcome};

const MESSY: &str = r#"{
  "metadata": {
    "collection": "Sahih Bukhari",
    "total_hadist": 999
  },
  "sumber": "https://example.org/bukhari",
  "hadist": [
    {"no": 5, "arab": "الحديث الأول", "indo": "Hadist pertama"},
    {"no": 5, "arab": "الحديث الثاني", "indo": "Hadist kedua"},
    {"no": 9, "arab": "الحديث الثالث", "indo": "Hadist ketiga"}
  ]
}"#;

const SEQUENTIAL: &str = r#"{
  "metadata": {
    "collection": "Sunan Tirmidzi",
    "total_hadist": 2
  },
  "hadist": [
    {"no": 1, "arab": "حديث", "indo": "Hadist"},
    {"no": 2, "arab": "حديث", "indo": "Hadist"}
  ]
}"#;

fn unique_temp_root(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let root = std::env::temp_dir().join(format!("rapih-{name}-{stamp}"));
    fs::create_dir_all(&root).expect("temp root should be created");
    root
}

/// A fresh dataset folder nested under its own root, so the timestamped
/// backup sibling lands inside the root and is cleaned up with it.
fn seed_dataset(name: &str, files: &[(&str, &str)]) -> (PathBuf, PathBuf) {
    let root = unique_temp_root(name);
    let data = root.join("data");
    fs::create_dir_all(&data).expect("data folder should be created");
    for (filename, contents) in files {
        fs::write(data.join(filename), contents).expect("fixture should be written");
    }
    (root, data)
}

fn find_backup(root: &Path) -> Option<PathBuf> {
    fs::read_dir(root)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| {
            path.file_name()
                .map_or(false, |name| name.to_string_lossy().starts_with("backup_"))
        })
}

#[test]
fn full_run_renumbers_files_and_backs_up_originals() {
    let (root, data) = seed_dataset(
        "full-run",
        &[("hadist1.json", MESSY), ("hadist2.json", SEQUENTIAL)],
    );
    let config = CleanerConfig::for_folder(&data);

    let mut asks = 0;
    let outcome = run(&config, || {
        asks += 1;
        true
    })
    .expect("run should succeed");
    assert_eq!(asks, 1, "confirmation should be asked exactly once");

    let RunOutcome::Completed {
        backup,
        clean,
        validation,
        report,
    } = outcome
    else {
        panic!("expected a completed run");
    };

    assert_eq!(clean.success_count(), 2);
    assert_eq!(clean.total_records(), 5);
    assert!(validation.all_valid());
    assert_eq!(report.total_records, 5);
    assert_eq!(report.total_files, 2);
    assert_eq!(report.collections.len(), 2);
    assert_eq!(report.collections[0].collection, "Sahih Bukhari");

    let doc = CollectionDocument::load(&data.join("hadist1.json")).expect("cleaned file loads");
    assert_eq!(doc.record_numbers(), vec![1, 2, 3]);
    assert_eq!(doc.metadata_total(), Some(3));

    let backup_dir = find_backup(&root).expect("backup folder should exist");
    assert_eq!(backup_dir, backup.destination);
    assert_eq!(backup.files_copied, 2);
    let original = fs::read_to_string(backup_dir.join("hadist1.json")).expect("backup readable");
    assert_eq!(original, MESSY, "backup must keep the pre-clean bytes");

    fs::remove_dir_all(&root).expect("cleanup");
}

#[test]
fn declined_confirmation_leaves_everything_untouched() {
    let (root, data) = seed_dataset("declined", &[("hadist1.json", MESSY)]);
    let config = CleanerConfig::for_folder(&data);

    let outcome = run(&config, || false).expect("run should succeed");
    assert!(matches!(outcome, RunOutcome::Aborted));

    let after = fs::read_to_string(data.join("hadist1.json")).expect("file readable");
    assert_eq!(after, MESSY);
    assert!(find_backup(&root).is_none(), "no backup without consent");

    fs::remove_dir_all(&root).expect("cleanup");
}

#[test]
fn already_sequential_folder_is_never_mutated_or_prompted() {
    let (root, data) = seed_dataset("already-clean", &[("hadist2.json", SEQUENTIAL)]);
    let config = CleanerConfig::for_folder(&data);

    let outcome = run(&config, || panic!("confirmation should not be asked"))
        .expect("run should succeed");
    let RunOutcome::AlreadyClean { report } = outcome else {
        panic!("expected an already-clean run");
    };
    assert_eq!(report.total_records, 2);

    let after = fs::read_to_string(data.join("hadist2.json")).expect("file readable");
    assert_eq!(after, SEQUENTIAL, "clean files keep their exact bytes");
    assert!(find_backup(&root).is_none());

    fs::remove_dir_all(&root).expect("cleanup");
}

#[test]
fn repeated_cleaning_rewrites_identical_bytes() {
    // Floats and exponent literals pin number reserialization: the first
    // rewrite normalizes them, every later rewrite must reproduce it exactly.
    let raw = r#"{
  "metadata": {"collection": "Sahih Bukhari", "total_hadist": 1.0},
  "hadist": [
    {"no": 7, "arab": "حديث", "derajat": 4.5},
    {"no": 7, "arab": "حديث", "derajat": 1e3}
  ]
}"#;
    let (root, data) = seed_dataset("rewrite-stable", &[("hadist1.json", raw)]);
    let path = data.join("hadist1.json");

    let first = run(&CleanerConfig::for_folder(&data), || true).expect("run should succeed");
    assert!(matches!(first, RunOutcome::Completed { .. }));
    let after_first = fs::read(&path).expect("file readable");
    let doc = CollectionDocument::load(&path).expect("cleaned file loads");
    assert_eq!(doc.record_numbers(), vec![1, 2], "first pass must rewrite");

    // The rewrite itself is unconditional; a direct second pass must not
    // change a byte even though it writes the whole file again.
    clean_file(&path).expect("second clean should succeed");
    let after_second = fs::read(&path).expect("file readable");
    assert_eq!(after_first, after_second);

    fs::remove_dir_all(&root).expect("cleanup");
}

#[test]
fn unrelated_fields_and_unicode_survive_cleaning() {
    let (root, data) = seed_dataset("preserve", &[("hadist1.json", MESSY)]);
    let config = CleanerConfig::for_folder(&data);

    run(&config, || true).expect("run should succeed");

    let raw = fs::read_to_string(data.join("hadist1.json")).expect("file readable");
    assert!(raw.contains("الحديث الأول"), "arabic must stay verbatim");
    assert!(
        raw.contains("https://example.org/bukhari"),
        "unrelated top-level fields must survive"
    );
    let metadata_at = raw.find("\"metadata\"").expect("metadata key present");
    let hadist_at = raw.find("\"hadist\"").expect("hadist key present");
    assert!(metadata_at < hadist_at, "top-level key order must survive");
    let no_at = raw.find("\"no\"").expect("no key present");
    let arab_at = raw.find("\"arab\"").expect("arab key present");
    assert!(no_at < arab_at, "record key order must survive");

    let cleaned: serde_json::Value = serde_json::from_str(&raw).expect("cleaned file parses");
    let original: serde_json::Value = serde_json::from_str(MESSY).expect("fixture parses");
    assert_eq!(cleaned["hadist"][1]["arab"], original["hadist"][1]["arab"]);
    assert_eq!(cleaned["hadist"][1]["indo"], original["hadist"][1]["indo"]);
    assert_eq!(cleaned["metadata"]["collection"], original["metadata"]["collection"]);

    fs::remove_dir_all(&root).expect("cleanup");
}

#[test]
fn broken_and_foreign_files_fail_per_file_not_per_run() {
    let (root, data) = seed_dataset(
        "mixed",
        &[
            ("hadist1.json", MESSY),
            ("notes.json", r#"{"todo": ["rename files"]}"#),
            ("broken.json", "{not json"),
        ],
    );
    let config = CleanerConfig::for_folder(&data);

    let outcome = run(&config, || true).expect("run should succeed");
    let RunOutcome::Completed {
        clean, validation, ..
    } = outcome
    else {
        panic!("expected a completed run");
    };

    assert_eq!(clean.success_count(), 1);
    assert_eq!(clean.failures.len(), 2);
    assert!(!validation.all_valid(), "unparseable files fail validation");

    let doc = CollectionDocument::load(&data.join("hadist1.json")).expect("cleaned file loads");
    assert_eq!(doc.record_numbers(), vec![1, 2, 3]);

    let notes = fs::read_to_string(data.join("notes.json")).expect("file readable");
    assert_eq!(notes, r#"{"todo": ["rename files"]}"#, "failed files keep their bytes");

    fs::remove_dir_all(&root).expect("cleanup");
}

#[test]
fn folder_without_collection_files_is_reported_not_cleaned() {
    let (root, data) = seed_dataset("no-valid", &[("notes.json", r#"{"todo": []}"#)]);
    let config = CleanerConfig::for_folder(&data);

    let outcome = run(&config, || panic!("nothing to confirm")).expect("run should succeed");
    assert!(matches!(outcome, RunOutcome::NoValidFiles));
    assert!(find_backup(&root).is_none());

    fs::remove_dir_all(&root).expect("cleanup");
}

#[test]
fn missing_folder_is_a_fatal_error() {
    let root = unique_temp_root("missing");
    let config = CleanerConfig::for_folder(root.join("nope"));

    let err = run(&config, || true).expect_err("run should fail");
    assert!(matches!(err, DatasetError::FolderNotFound(_)));

    fs::remove_dir_all(&root).expect("cleanup");
}
