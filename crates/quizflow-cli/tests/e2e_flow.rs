//! End-to-end flow tests: init → validate → take → review.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizflow() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizflow").unwrap()
}

fn saved_attempt(dir: &std::path::Path) -> std::path::PathBuf {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert_eq!(entries.len(), 1, "expected exactly one saved attempt");
    entries.pop().unwrap()
}

#[test]
fn e2e_submitted_attempt_round_trip() {
    let dir = TempDir::new().unwrap();

    quizflow()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizflow()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--catalog")
        .arg("catalog/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All catalogs valid."));

    // The example catalog's ownership quiz keys: [1, 0, 2].
    quizflow()
        .current_dir(dir.path())
        .arg("take")
        .arg("--catalog")
        .arg("catalog")
        .arg("--course")
        .arg("rust-101")
        .arg("--module")
        .arg("ownership")
        .arg("--answers")
        .arg("1,0,2")
        .arg("--output")
        .arg("attempts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Questions:    3"))
        .stdout(predicate::str::contains("3 / 3 (100%)"));

    let attempt = saved_attempt(&dir.path().join("attempts"));

    quizflow()
        .current_dir(dir.path())
        .arg("review")
        .arg("--attempt")
        .arg(&attempt)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 / 3 (100%)"))
        .stdout(predicate::str::contains("[ok] Q1"));

    // HTML rendering of the same attempt
    quizflow()
        .current_dir(dir.path())
        .arg("review")
        .arg("--attempt")
        .arg(&attempt)
        .arg("--html")
        .arg("review.html")
        .assert()
        .success();
    let html = std::fs::read_to_string(dir.path().join("review.html")).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("Ownership"));
}

#[test]
fn e2e_partial_attempt_times_out_without_review() {
    let dir = TempDir::new().unwrap();

    quizflow()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // One scripted answer out of three; a 1-second budget expires the rest.
    quizflow()
        .current_dir(dir.path())
        .arg("take")
        .arg("--catalog")
        .arg("catalog")
        .arg("--course")
        .arg("rust-101")
        .arg("--module")
        .arg("ownership")
        .arg("--answers")
        .arg("1")
        .arg("--time-limit")
        .arg("1")
        .arg("--output")
        .arg("attempts")
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("Time's up!"))
        .stdout(predicate::str::contains("1 / 3"))
        .stdout(predicate::str::contains(
            "Review is not available for timed-out attempts.",
        ));

    let attempt = saved_attempt(&dir.path().join("attempts"));

    quizflow()
        .current_dir(dir.path())
        .arg("review")
        .arg("--attempt")
        .arg(&attempt)
        .assert()
        .success()
        .stdout(predicate::str::contains("review is not available"));
}
