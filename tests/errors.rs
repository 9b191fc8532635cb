use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command { Command::cargo_bin("robot").unwrap() }

#[test]
fn top_level_help_goes_to_stderr() {
    cargo_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:").and(predicate::str::contains("repl")));
}

#[test]
fn run_help_lists_commands() {
    cargo_bin()
        .args(["run", "-h"])
        .assert()
        .success()
        .stderr(predicate::str::contains("PLACE X,Y,F").and(predicate::str::contains("--file")));
}

#[test]
fn repl_help_lists_meta_commands() {
    cargo_bin()
        .args(["repl", "--help"])
        .assert()
        .success()
        .stderr(predicate::str::contains(":exit").and(predicate::str::contains("ROBOT_REPL_MODE")));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    cargo_bin()
        .args(["run", "--fast"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--fast"));
}

#[test]
fn bare_and_editor_conflict() {
    cargo_bin()
        .args(["repl", "--bare", "--editor"])
        .assert()
        .code(2);
}

#[test]
fn bad_commands_never_fail_the_run() {
    cargo_bin()
        .env_remove("ROBOT_MAX_X")
        .env_remove("ROBOT_MAX_Y")
        .arg("run")
        .write_stdin("FLY\nPLACE\nPLACE 1,2\nPLACE a,b,NORTH\nPLACE 1,1,UP\nplace 1,1,NORTH\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ignoring input").count(6));
}
