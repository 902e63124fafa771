use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("tests/data/example.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("There is(are) 6 location(s)"));
}

#[test]
fn part2_fails_if_guard_never_leaves() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("tests/data/loop.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("can't search obstructions"));
}
