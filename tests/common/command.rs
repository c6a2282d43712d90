use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_jot_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("jot").expect("Failed to find jot binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn jot_commit(dir: &Path, message: &str) -> Command {
    run_jot_command(dir, &["commit", "-m", message])
}

/// Write a file, stage it and commit it in one step
pub fn commit_file(dir: &Path, filename: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(filename), content.to_string()));
    run_jot_command(dir, &["add", filename]).assert().success();
    jot_commit(dir, message).assert().success();
}

/// Resolve a commit message to its id through the `find` command
pub fn find_commit_id(dir: &Path, message: &str) -> String {
    let output = run_jot_command(dir, &["find", message])
        .output()
        .expect("Failed to run find");

    String::from_utf8(output.stdout)
        .expect("find printed invalid utf-8")
        .lines()
        .next()
        .expect("find printed no commit id")
        .to_string()
}

/// Number of commit objects in the store
pub fn commit_count(dir: &Path) -> usize {
    std::fs::read_dir(dir.join(".jot").join("commits"))
        .expect("Failed to list commits directory")
        .count()
}
