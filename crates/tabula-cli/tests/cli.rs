//! Binary smoke tests: argument surface only, no backend required.

use assert_cmd::Command;
use predicates::prelude::*;

fn tbl() -> Command {
    Command::cargo_bin("tbl").expect("binary builds")
}

#[test]
fn help_lists_the_command_groups() {
    tbl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("block"))
        .stdout(predicate::str::contains("row"));
}

#[test]
fn version_prints() {
    tbl().arg("--version").assert().success();
}

#[test]
fn unknown_subcommands_fail() {
    tbl().arg("frobnicate").assert().failure();
}

#[test]
fn block_add_requires_a_label() {
    tbl()
        .args(["block", "add", "tb-p1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--label"));
}
