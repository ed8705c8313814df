#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn specflow(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("specflow").unwrap();
    cmd.current_dir(dir.path())
        .env("SPECFLOW_CONFIG", dir.path().join(".specflow.yaml"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &TempDir, yaml: &str) {
    std::fs::write(dir.path().join(".specflow.yaml"), yaml).unwrap();
}

// ---------------------------------------------------------------------------
// specflow generate
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_all_documents() {
    let dir = TempDir::new().unwrap();
    specflow(&dir)
        .args(["generate", "Build", "login", "page"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Story 1: Build login page"))
        .stdout(predicate::str::contains("# Design Document"))
        .stdout(predicate::str::contains("- [ ] 1. Set up project structure"))
        .stdout(predicate::str::contains("- [ ] 7. Documentation"));
}

#[test]
fn generate_single_document() {
    let dir = TempDir::new().unwrap();
    specflow(&dir)
        .args(["generate", "Build login page", "--doc", "design"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Performance Requirements"))
        .stdout(predicate::str::contains("# Requirements").not());
}

#[test]
fn generate_json_snapshot() {
    let dir = TempDir::new().unwrap();
    let output = specflow(&dir)
        .args(["--json", "generate", "Build login page"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["title"], "Build login page");
    assert_eq!(value["status"], "in-progress");
    assert_eq!(value["tasks"].as_array().unwrap().len(), 7);
    assert_eq!(value["tasks"][0]["id"], 1);
    assert_eq!(value["tasks"][0]["status"], "pending");
}

#[test]
fn generate_blank_prompt_fails() {
    let dir = TempDir::new().unwrap();
    specflow(&dir)
        .args(["generate", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("prompt is empty"));
}

#[test]
fn generate_unknown_document_fails() {
    let dir = TempDir::new().unwrap();
    specflow(&dir)
        .args(["generate", "x", "--doc", "qa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'qa' for '--doc <DOC>'"))
        .stderr(predicate::str::contains("invalid document 'qa'"));
}

#[test]
fn generate_respects_title_limit() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "title_max_chars: 5\n");
    let output = specflow(&dir)
        .args(["-j", "generate", "Build login page"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["title"], "Build");
}

// ---------------------------------------------------------------------------
// specflow session
// ---------------------------------------------------------------------------

#[test]
fn session_walkthrough_from_stdin() {
    let dir = TempDir::new().unwrap();
    specflow(&dir)
        .arg("session")
        .write_stdin("new Build login page\nstart 1\ncomplete 1\ntasks\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created specification"))
        .stdout(predicate::str::contains("Started task [1]"))
        .stdout(predicate::str::contains("Completed task [1]"))
        .stdout(predicate::str::contains("1/7 completed, 0 in progress"))
        .stdout(predicate::str::contains("Status:   in-progress"));
}

#[test]
fn session_reports_errors_and_continues() {
    let dir = TempDir::new().unwrap();
    specflow(&dir)
        .arg("session")
        .write_stdin("start 1\nnew Something\ncomplete 2\nnext\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error: cannot start task [1]: no active specification"))
        .stdout(predicate::str::contains("invalid transition from pending to completed"))
        .stdout(predicate::str::contains("Next task [1] (pending): Set up project structure"));
}

#[test]
fn session_lenient_config_allows_skipping() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "transitions: lenient\n");
    specflow(&dir)
        .arg("session")
        .write_stdin("new Something\ncomplete 2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed task [2]"));
}

#[test]
fn session_list_marks_active() {
    let dir = TempDir::new().unwrap();
    specflow(&dir)
        .arg("session")
        .write_stdin("new first\nnew second\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"\*\s+\d+\s+in-progress\s+0/7\s+second").unwrap());
}

#[test]
fn session_from_script_file() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("walk.txt");
    std::fs::write(
        &script,
        "# create and finish the first task\nnew Build login page\nstart 1\ncomplete 1\nquit\nstart 2\n",
    )
    .unwrap();

    specflow(&dir)
        .args(["session", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed task [1]"))
        .stdout(predicate::str::contains("Started task [2]").not());
}

#[test]
fn session_missing_script_fails() {
    let dir = TempDir::new().unwrap();
    specflow(&dir)
        .args(["session", "--script", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open nope.txt"));
}

// ---------------------------------------------------------------------------
// specflow servers / config
// ---------------------------------------------------------------------------

#[test]
fn servers_lists_defaults() {
    let dir = TempDir::new().unwrap();
    specflow(&dir)
        .arg("servers")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 connected"))
        .stdout(predicate::str::contains("GitLab"))
        .stdout(predicate::str::contains("3 tools available"))
        .stdout(predicate::str::contains("Database"));
}

#[test]
fn config_init_then_validate() {
    let dir = TempDir::new().unwrap();
    specflow(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join(".specflow.yaml").exists());

    specflow(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    specflow(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "title_max_chars: 0\n");
    specflow(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] title_max_chars must be at least 1"));
}

#[test]
fn commands_refuse_invalid_config() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "title_max_chars: 0\n");
    specflow(&dir)
        .args(["generate", "Build login page"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title_max_chars must be at least 1"));

    specflow(&dir)
        .arg("session")
        .write_stdin("new Build login page\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Created specification").not());
}

#[test]
fn config_show_prints_effective_values() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "status_policy: fixed\n");
    specflow(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("status_policy: fixed"))
        .stdout(predicate::str::contains("title_max_chars: 50"));
}

#[test]
fn invalid_config_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "transitions: sideways\n");
    specflow(&dir)
        .arg("servers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}
