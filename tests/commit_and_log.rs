use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;
use common::command::{
    commit_count, commit_file, find_commit_id, init_repository_dir, jot_commit, run_jot_command,
};
use common::file::{FileSpec, write_file};

#[rstest]
fn commit_records_staged_changes(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "notes.txt", "one", "add notes");

    assert_eq!(commit_count(dir.path()), 2);
    run_jot_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add notes"));
}

#[rstest]
fn commit_with_empty_message_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("notes.txt"), "one".to_string()));
    run_jot_command(dir.path(), &["add", "notes.txt"])
        .assert()
        .success();

    jot_commit(dir.path(), "")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Please enter a commit message."));
}

#[rstest]
fn commit_without_staged_changes_fails(init_repository_dir: TempDir) {
    jot_commit(init_repository_dir.path(), "empty")
        .assert()
        .failure()
        .stdout(predicate::str::contains("No changes added to the commit."));
}

/// Commits accumulate the parent's tree: a file committed once stays
/// tracked by later commits that never restage it.
#[rstest]
fn commit_carries_forward_the_parent_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "first.txt", "one", "first");
    commit_file(dir.path(), "second.txt", "two", "second");

    let second_id = find_commit_id(dir.path(), "second");
    run_jot_command(dir.path(), &["rm", "first.txt"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["checkout", "--file", "first.txt", "--commit", &second_id])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("first.txt")).unwrap(),
        "one"
    );
}

#[rstest]
fn log_lists_history_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "notes.txt", "one", "older");
    commit_file(dir.path(), "notes.txt", "two", "newer");

    let output = run_jot_command(dir.path(), &["log"])
        .output()
        .expect("Failed to run log");
    let stdout = String::from_utf8(output.stdout).unwrap();

    let newer = stdout.find("newer").expect("newer missing from log");
    let older = stdout.find("older").expect("older missing from log");
    let root = stdout
        .find("initial commit")
        .expect("root missing from log");
    assert!(newer < older && older < root);
}

#[rstest]
fn log_block_format_is_stable(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "notes.txt", "one", "add notes");

    run_jot_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"===\ncommit [0-9a-f]{40}\nDate: \w{3} \w{3} \d{2} \d{2}:\d{2}:\d{2} \d{4} [+-]\d{4}\nadd notes\n",
        ).unwrap());
}

#[rstest]
fn find_prints_ids_of_matching_commits(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "one", "shared message");
    commit_file(dir.path(), "b.txt", "two", "shared message");

    let output = run_jot_command(dir.path(), &["find", "shared message"])
        .output()
        .expect("Failed to run find");
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(stdout.lines().count(), 2);
    for line in stdout.lines() {
        assert_eq!(line.len(), 40);
    }
}

#[rstest]
fn find_with_no_match_fails(init_repository_dir: TempDir) {
    run_jot_command(init_repository_dir.path(), &["find", "never written"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Found no commit with that message.",
        ));
}

/// global-log reports commits from every branch, not just the active one
#[rstest]
fn global_log_spans_all_branches(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "base.txt", "base", "on master");

    run_jot_command(dir.path(), &["branch", "side"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["checkout", "side"])
        .assert()
        .success();
    commit_file(dir.path(), "side.txt", "side", "on side");
    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    run_jot_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on side").not());

    run_jot_command(dir.path(), &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on master"))
        .stdout(predicate::str::contains("on side"));
}
