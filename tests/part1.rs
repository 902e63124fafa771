use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/example.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("visit 41 position(s)"));
}

#[test]
fn part1_fails_if_guard_never_leaves() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/loop.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("never leaves"));
}

#[test]
fn part1_fails_with_multiple_guards() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/two_guards.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("multiple guards"));
}

#[test]
fn part1_fails_with_missing_file() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/no_such_file.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to open given file"));
}
