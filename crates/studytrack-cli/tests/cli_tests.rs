//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn studytrack(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("studytrack").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("STUDYTRACK_RECORDS");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn compact_catalog() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../catalogs/compact.toml")
}

const PHYSICS_CHAPTER_ONE: &str = r#"[
  {"subject_id": "physics1st", "chapter_id": 1, "activity": "Lecture", "status": "Done", "updated_at": "2026-03-02T09:00:00Z"},
  {"subject_id": "physics1st", "chapter_id": 1, "activity": "Notes", "status": "Done", "updated_at": "2026-03-02T10:00:00Z"},
  {"subject_id": "physics1st", "chapter_id": 1, "activity": "Notes", "status": "Not Started", "updated_at": "2026-02-01T10:00:00Z"}
]"#;

#[test]
fn validate_builtin_catalog() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in catalog"))
        .stdout(predicate::str::contains("Catalog valid."));
}

#[test]
fn validate_compact_catalog() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path())
        .arg("validate")
        .arg("--catalog")
        .arg(compact_catalog())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 subjects"));
}

#[test]
fn validate_reports_unbalanced_catalog() {
    let dir = TempDir::new().unwrap();
    let broken = std::fs::read_to_string(compact_catalog())
        .unwrap()
        .replace("[configs.science.mcq]\nmax = 20", "[configs.science.mcq]\nmax = 25");
    let path = write(&dir, "broken.toml", &broken);

    studytrack(dir.path())
        .arg("validate")
        .arg("--catalog")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("[science]"))
        .stderr(predicate::str::contains("issue(s) found"));
}

#[test]
fn validate_nonexistent_catalog() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path())
        .arg("validate")
        .arg("--catalog")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn subjects_lists_families() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path())
        .arg("subjects")
        .assert()
        .success()
        .stdout(predicate::str::contains("Family: science"))
        .stdout(predicate::str::contains("physics1st - Physics 1st Paper (10 chapters"))
        .stdout(predicate::str::contains("Family: language_writing"));
}

#[test]
fn subjects_family_filter() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path())
        .arg("subjects")
        .arg("--family")
        .arg("math")
        .assert()
        .success()
        .stdout(predicate::str::contains("highermath1st"))
        .stdout(predicate::str::contains("physics1st").not());
}

#[test]
fn subjects_unknown_family() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path())
        .arg("subjects")
        .arg("--family")
        .arg("history")
        .assert()
        .failure();
}

#[test]
fn score_text_summary() {
    let dir = TempDir::new().unwrap();
    let records = write(&dir, "records.json", PHYSICS_CHAPTER_ONE);

    // Chapter 1 scores 30 of 100; the other nine chapters score 0.
    studytrack(dir.path())
        .arg("score")
        .arg("--records")
        .arg(&records)
        .arg("--subjects")
        .arg("physics1st")
        .assert()
        .success()
        .stdout(predicate::str::contains("Physics 1st Paper"))
        .stdout(predicate::str::contains("30.0%"))
        .stdout(predicate::str::contains("Overall: 3.0%"));
}

#[test]
fn score_json_output() {
    let dir = TempDir::new().unwrap();
    let records = write(&dir, "records.json", PHYSICS_CHAPTER_ONE);

    let output = studytrack(dir.path())
        .arg("score")
        .arg("--records")
        .arg(&records)
        .arg("--subjects")
        .arg("physics1st,chemistry1st")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["subjects"].as_array().unwrap().len(), 2);
    assert_eq!(report["subjects"][0]["chapters"][0]["score"], 30.0);
    assert_eq!(report["subjects"][1]["score"], 0.0);
    assert!((report["overall"].as_f64().unwrap() - 1.5).abs() < 1e-9);
}

#[test]
fn score_saves_report_to_output_dir() {
    let dir = TempDir::new().unwrap();
    let records = write(&dir, "records.json", PHYSICS_CHAPTER_ONE);
    let out = dir.path().join("reports");

    studytrack(dir.path())
        .arg("score")
        .arg("--records")
        .arg(&records)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved to"));

    let saved: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
    assert_eq!(saved.len(), 1);
}

#[test]
fn score_reads_records_from_env() {
    let dir = TempDir::new().unwrap();
    let records = write(&dir, "records.json", PHYSICS_CHAPTER_ONE);

    studytrack(dir.path())
        .env("STUDYTRACK_RECORDS", &records)
        .arg("score")
        .arg("--subjects")
        .arg("physics1st")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 3.0%"));
}

#[test]
fn score_without_records_fails() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path())
        .arg("score")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no records file given"));
}

#[test]
fn score_with_malformed_records_fails() {
    let dir = TempDir::new().unwrap();
    let records = write(&dir, "records.json", "{ not json");
    studytrack(dir.path())
        .arg("score")
        .arg("--records")
        .arg(&records)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn score_unknown_subjects_only_fails() {
    let dir = TempDir::new().unwrap();
    let records = write(&dir, "records.json", "[]");
    studytrack(dir.path())
        .arg("score")
        .arg("--records")
        .arg(&records)
        .arg("--subjects")
        .arg("astrology")
        .assert()
        .failure()
        .stderr(predicate::str::contains("none of the requested subjects"));
}

#[test]
fn score_with_compact_catalog() {
    let dir = TempDir::new().unwrap();
    let records = write(
        &dir,
        "records.json",
        r#"[
  {"subject_id": "generalmath", "chapter_id": 2, "activity": "Model Test", "status": "Done", "updated_at": "2026-04-01T09:00:00Z"},
  {"subject_id": "generalmath", "chapter_id": 2, "activity": "Lecture Video", "status": "In Progress", "updated_at": "2026-04-01T09:00:00Z"}
]"#,
    );

    // Chapter 2: final 10 + lecture 15 = 25, averaged over two chapters.
    studytrack(dir.path())
        .arg("score")
        .arg("--catalog")
        .arg(compact_catalog())
        .arg("--records")
        .arg(&records)
        .arg("--subjects")
        .arg("generalmath")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 12.5%"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    studytrack(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created studytrack.toml"))
        .stdout(predicate::str::contains("Created catalog.toml"));

    assert!(dir.path().join("studytrack.toml").exists());
    assert!(dir.path().join("catalog.toml").exists());
    assert!(dir.path().join("records/sample.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    studytrack(dir.path()).arg("init").assert().success();

    // Second init should skip
    studytrack(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_then_validate_and_score() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path()).arg("init").assert().success();

    studytrack(dir.path())
        .arg("validate")
        .arg("--catalog")
        .arg("catalog.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog valid."));

    studytrack(dir.path())
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("Higher Math 1st Paper"))
        .stdout(predicate::str::contains("English 1st Paper"))
        .stdout(predicate::str::contains("Overall:"));
}

#[test]
fn compare_nonexistent_report() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path())
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Study progress scoring"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    studytrack(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("studytrack"));
}
