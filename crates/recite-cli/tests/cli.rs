//! CLI command integration tests.
//! Each test uses a temp directory via RECITE_DATA_DIR for full isolation.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn recite_cmd(data_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("recite").unwrap();
    cmd.env("RECITE_DATA_DIR", data_dir.path());
    cmd
}

fn write_wordlist(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn status_fresh_deck() {
    let dir = TempDir::new().unwrap();
    recite_cmd(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("no words in learning"))
        .stdout(predicate::str::contains("learning: 0  mastered: 0"));
}

#[test]
fn import_then_status() {
    let dir = TempDir::new().unwrap();
    let input = write_wordlist(&dir, "words.csv", "apple,苹果\nbook,书\n");

    recite_cmd(&dir)
        .arg("import")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported 2 new word(s)"));

    recite_cmd(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("apple"))
        .stdout(predicate::str::contains("苹果"))
        .stdout(predicate::str::contains("0/4"))
        .stdout(predicate::str::contains("learning: 2  mastered: 0"));
}

#[test]
fn import_skips_duplicates_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let first = write_wordlist(&dir, "first.csv", "apple,苹果\n");
    let second = write_wordlist(&dir, "second.csv", "Apple,苹果\nbook,书\n");

    recite_cmd(&dir).arg("import").arg(&first).assert().success();
    recite_cmd(&dir)
        .arg("import")
        .arg(&second)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported 1 new word(s)"))
        .stdout(predicate::str::contains("1 duplicate(s) skipped"));
}

#[test]
fn import_ignores_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let input = write_wordlist(&dir, "words.csv", "apple,苹果\n\nnocomma\n,empty-term\n");

    recite_cmd(&dir)
        .arg("import")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported 1 new word(s)"));
}

#[test]
fn import_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    recite_cmd(&dir)
        .args(["import", "/nonexistent/words.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn review_empty_deck_is_noninteractive() {
    let dir = TempDir::new().unwrap();
    recite_cmd(&dir)
        .arg("review")
        .assert()
        .success()
        .stdout(predicate::str::contains("no words in learning"));
}

#[test]
fn review_with_nothing_due_is_noninteractive() {
    let dir = TempDir::new().unwrap();
    let snapshot = r#"{
        "version": "2",
        "active": [
            {
                "term": "apple",
                "translation": "苹果",
                "successCount": 2,
                "reviewRound": 1,
                "reviewCount": 2,
                "nextReviewDate": "2999-01-01",
                "example": null
            }
        ],
        "mastered": []
    }"#;
    std::fs::write(dir.path().join("deck.json"), snapshot).unwrap();

    recite_cmd(&dir)
        .arg("review")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing due today"));
}

#[test]
fn refresh_without_mastered_words() {
    let dir = TempDir::new().unwrap();
    recite_cmd(&dir)
        .arg("refresh")
        .assert()
        .success()
        .stdout(predicate::str::contains("no mastered words to refresh"));
}

#[test]
fn menu_survives_failed_import_and_quits_cleanly() {
    let dir = TempDir::new().unwrap();
    recite_cmd(&dir)
        .write_stdin("3\n/nonexistent/words.csv\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("import failed"))
        .stdout(predicate::str::contains("failed to read /nonexistent/words.csv"));
}

#[test]
fn menu_review_consumes_quiz_answers_from_piped_stdin() {
    let dir = TempDir::new().unwrap();
    let input = write_wordlist(&dir, "words.csv", "apple,苹果\n");
    recite_cmd(&dir).arg("import").arg(&input).assert().success();

    recite_cmd(&dir)
        .write_stdin("1\napple\n6\n")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("correct"))
        .stdout(predicate::str::contains("reviewed:  1"));
}

#[test]
fn mastered_listing_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = r#"{
        "version": "2",
        "active": [],
        "mastered": [
            {
                "term": "apple",
                "translation": "苹果",
                "successCount": 4,
                "reviewRound": 3,
                "reviewCount": 6,
                "nextReviewDate": "2026-03-08",
                "example": null
            }
        ]
    }"#;
    std::fs::write(dir.path().join("deck.json"), snapshot).unwrap();

    recite_cmd(&dir)
        .arg("mastered")
        .assert()
        .success()
        .stdout(predicate::str::contains("apple"))
        .stdout(predicate::str::contains("2026-03-08"))
        .stdout(predicate::str::contains("mastered: 1"));
}

#[test]
fn corrupt_snapshot_falls_back_to_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("deck.json"), "{not json").unwrap();

    recite_cmd(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("learning: 0  mastered: 0"));
}

#[test]
fn integrity_violation_is_a_hard_error() {
    let dir = TempDir::new().unwrap();
    let snapshot = r#"{
        "version": "2",
        "active": [
            {
                "term": "apple",
                "translation": "苹果",
                "successCount": 4,
                "reviewRound": 3,
                "reviewCount": 6,
                "nextReviewDate": "2026-03-08",
                "example": null
            }
        ],
        "mastered": []
    }"#;
    std::fs::write(dir.path().join("deck.json"), snapshot).unwrap();

    recite_cmd(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("apple"));
}

#[test]
fn data_dir_flag_overrides_env() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();
    let input = write_wordlist(&flag_dir, "words.csv", "apple,苹果\n");

    recite_cmd(&env_dir)
        .arg("--data-dir")
        .arg(flag_dir.path())
        .arg("import")
        .arg(&input)
        .assert()
        .success();

    assert!(flag_dir.path().join("deck.json").exists());
    assert!(!env_dir.path().join("deck.json").exists());
}
