use assert_cmd::Command;
use predicates::prelude::predicate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn gvt(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gvt").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn test_detach_keeps_working_file() {
    let temp = TempDir::new().unwrap();
    let repo_path = temp.path();
    gvt(repo_path).arg("init").assert().success();
    fs::write(repo_path.join("a.txt"), "content").unwrap();
    gvt(repo_path).args(["add", "a.txt"]).assert().success();

    gvt(repo_path)
        .args(["detach", "a.txt"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "File detached successfully. File: a.txt",
        ));

    let store = repo_path.join(".gvt");
    assert!(!store.join("2").join("a.txt").exists());
    assert!(store.join("1").join("a.txt").is_file());
    assert_eq!(fs::read_to_string(repo_path.join("a.txt")).unwrap(), "content");
    assert_eq!(
        fs::read_to_string(store.join("2").join("message.txt")).unwrap(),
        "File detached successfully. File: a.txt"
    );
}

#[test]
fn test_detach_untracked_is_noop() {
    let temp = TempDir::new().unwrap();
    let repo_path = temp.path();
    gvt(repo_path).arg("init").assert().success();

    gvt(repo_path)
        .args(["detach", "ghost.txt", "-m", "ignored"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "File is not added to gvt. File: ghost.txt",
        ));
    assert!(!repo_path.join(".gvt").join("1").exists());
}

#[test]
fn test_detach_without_path() {
    let temp = TempDir::new().unwrap();
    let repo_path = temp.path();
    gvt(repo_path).arg("init").assert().success();

    gvt(repo_path)
        .arg("detach")
        .assert()
        .code(30)
        .stderr(predicate::str::contains("Please specify file to detach."));
}
