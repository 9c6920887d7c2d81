use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;

fn task_tracker(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("task-tracker").expect("binary");
    cmd.current_dir(dir)
        .env_remove("TASKS_DB")
        .env_remove("TASKS_STRICT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_verbs() {
    let dir = tempfile::tempdir().unwrap();
    task_tracker(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("add"))
        .stdout(contains("mark"));
}

#[test]
fn add_writes_tasks_json_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    task_tracker(dir.path())
        .args(["add", "buy milk"])
        .assert()
        .success()
        .stdout(contains("Task added successfully (ID: 1)"));

    let content = fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert!(content.contains("\"description\": \"buy milk\""));
}

#[test]
fn full_session() {
    let dir = tempfile::tempdir().unwrap();
    let run = |args: &[&str]| task_tracker(dir.path()).args(args).assert().success();

    run(&["add", "buy milk"]);
    run(&["add", "walk dog"]);
    run(&["update", "2", "walk the dog"]).stdout(contains("Task 2 updated."));
    run(&["mark", "2", "in-progress"]).stdout(contains("Task 2 marked as in-progress."));
    run(&["delete", "1"]).stdout(contains("Task 1 deleted."));
    run(&["add", "read book"]).stdout(contains("(ID: 3)"));

    run(&["list"])
        .stdout(contains("walk the dog"))
        .stdout(contains("read book"));
    run(&["list", "done"]).stdout(contains("No tasks with status 'done'."));
}

#[test]
fn unknown_status_is_a_user_error() {
    let dir = tempfile::tempdir().unwrap();
    task_tracker(dir.path()).args(["add", "buy milk"]).assert().success();
    let before = fs::read(dir.path().join("tasks.json")).unwrap();

    task_tracker(dir.path())
        .args(["mark", "1", "finished"])
        .assert()
        .code(2)
        .stderr(contains("unknown status 'finished'"));
    task_tracker(dir.path())
        .args(["list", "blocked"])
        .assert()
        .code(2);

    assert_eq!(fs::read(dir.path().join("tasks.json")).unwrap(), before);
}

#[test]
fn missing_task_is_reported_by_id() {
    let dir = tempfile::tempdir().unwrap();
    task_tracker(dir.path())
        .args(["delete", "9"])
        .assert()
        .code(2)
        .stderr(contains("Task 9 not found"));
    assert!(!dir.path().join("tasks.json").exists());
}

#[test]
fn empty_description_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    task_tracker(dir.path())
        .args(["add", ""])
        .assert()
        .code(2)
        .stderr(contains("cannot be empty"));
}

#[test]
fn corrupted_file_warns_and_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tasks.json"), "garbage").unwrap();

    task_tracker(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No tasks found."))
        .stderr(contains("unreadable"));
    assert!(dir.path().join("tasks.json.corrupt").exists());
}

#[test]
fn strict_mode_fails_on_corrupted_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tasks.json"), "garbage").unwrap();

    task_tracker(dir.path())
        .args(["--strict", "add", "buy milk"])
        .assert()
        .code(4);
    task_tracker(dir.path())
        .env("TASKS_STRICT", "1")
        .arg("list")
        .assert()
        .code(4);
    assert_eq!(fs::read_to_string(dir.path().join("tasks.json")).unwrap(), "garbage");
}

#[test]
fn file_can_be_chosen_by_flag_or_env() {
    let dir = tempfile::tempdir().unwrap();
    let custom = dir.path().join("work.json");

    task_tracker(dir.path())
        .arg("--file")
        .arg(&custom)
        .args(["add", "from flag"])
        .assert()
        .success();
    task_tracker(dir.path())
        .env("TASKS_DB", &custom)
        .args(["add", "from env"])
        .assert()
        .success()
        .stdout(contains("(ID: 2)"));

    assert!(!dir.path().join("tasks.json").exists());
    let content = fs::read_to_string(&custom).unwrap();
    assert!(content.contains("from flag"));
    assert!(content.contains("from env"));
}

#[test]
fn completions_are_generated() {
    let dir = tempfile::tempdir().unwrap();
    task_tracker(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("task-tracker"));
}
