use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("docchat")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("clear"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("--server"));
}

#[test]
fn test_upload_requires_files() {
    cargo_bin_cmd!("docchat")
        .arg("upload")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FILES"));
}

#[test]
fn test_ask_help_shows_no_rag() {
    cargo_bin_cmd!("docchat")
        .args(["ask", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-rag"));
}

#[test]
fn test_interactive_mode_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("docchat")
        .env("DOCCHAT_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
