use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("robot").unwrap();
    cmd.env_remove("ROBOT_MAX_X").env_remove("ROBOT_MAX_Y").env_remove("ROBOT_LOG");
    cmd
}

fn data(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn script_tempfile(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn scenario_a_move_north() {
    cargo_bin()
        .args(["run", "--file"])
        .arg(data("scenario_a.txt"))
        .assert()
        .success()
        .stdout("0,1,NORTH\n")
        .stderr("PLACE - OK\nMOVE - OK\nREPORT - OK\n");
}

#[test]
fn scenario_b_turn_left() {
    cargo_bin()
        .args(["run", "-f"])
        .arg(data("scenario_b.txt"))
        .assert()
        .success()
        .stdout("0,0,WEST\n");
}

#[test]
fn scenario_c_mixed_walk() {
    cargo_bin()
        .args(["run", "--file"])
        .arg(data("scenario_c.txt"))
        .assert()
        .success()
        .stdout("3,3,NORTH\n");
}

#[test]
fn scenario_d_nothing_before_place() {
    cargo_bin()
        .args(["run", "--file"])
        .arg(data("scenario_d.txt"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(
            "ignoring input - still expecting first PLACE\n\
             ignoring input - still expecting first PLACE\n",
        );
}

#[test]
fn scenario_e_far_corner_holds() {
    cargo_bin()
        .args(["run", "--file"])
        .arg(data("scenario_e.txt"))
        .assert()
        .success()
        .stdout("5,5,NORTH\n")
        .stderr(predicate::str::contains("MOVE - avoid fall"));
}

#[test]
fn mixed_script_survives_every_kind_of_bad_line() {
    cargo_bin()
        .args(["run", "--file"])
        .arg(data("mixed.txt"))
        .assert()
        .success()
        .stdout("0,2,NORTH\n4,4,WEST\n")
        .stderr(
            predicate::str::contains("PLACE - avoid fall")
                .and(predicate::str::contains("ignoring input - no command given"))
                .and(predicate::str::contains("ignoring input - not a valid command: JUMP"))
                .and(predicate::str::contains("malformed PLACE arguments"))
                .and(predicate::str::contains("MOVE - avoid fall")),
        );
}

#[test]
fn reads_commands_from_stdin_without_file() {
    cargo_bin()
        .arg("run")
        .write_stdin("PLACE 0,0,NORTH\nMOVE\nREPORT\n")
        .assert()
        .success()
        .stdout("0,1,NORTH\n");
}

#[test]
fn quiet_suppresses_diagnostics() {
    cargo_bin()
        .args(["run", "--quiet", "--file"])
        .arg(data("mixed.txt"))
        .assert()
        .success()
        .stdout("0,2,NORTH\n4,4,WEST\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn debug_prints_table() {
    cargo_bin()
        .args(["run", "--debug", "--file"])
        .arg(data("scenario_a.txt"))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("STEP | INPUT")
                .and(predicate::str::contains("REPORT - OK -> 0,1,NORTH")),
        )
        .stderr(predicate::str::is_empty());
}

#[test]
fn missing_file_is_an_error() {
    cargo_bin()
        .args(["run", "--file", "/definitely/not/here.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to open command file"));
}

#[test]
fn table_flags_widen_the_table() {
    cargo_bin()
        .args(["run", "-q", "--max-x", "9", "--max-y", "9"])
        .write_stdin("PLACE 9,9,SOUTH\nREPORT\n")
        .assert()
        .success()
        .stdout("9,9,SOUTH\n");
}

#[test]
fn env_bounds_apply_when_no_flag_is_given() {
    cargo_bin()
        .env("ROBOT_MAX_X", "1")
        .env("ROBOT_MAX_Y", "1")
        .args(["run", "-q"])
        .write_stdin("PLACE 2,0,NORTH\nPLACE 1,1,EAST\nMOVE\nREPORT\n")
        .assert()
        .success()
        .stdout("1,1,EAST\n");
}

#[test]
fn config_file_sets_bounds() {
    let cfg = script_tempfile("[table]\nmax_x = 2\nmax_y = 2\n");
    cargo_bin()
        .args(["run", "--config"])
        .arg(cfg.path())
        .write_stdin("PLACE 2,2,NORTH\nMOVE\nREPORT\n")
        .assert()
        .success()
        .stdout("2,2,NORTH\n")
        .stderr(predicate::str::contains("MOVE - avoid fall"));
}

#[test]
fn negative_bound_is_rejected() {
    cargo_bin()
        .args(["run", "--max-x", "-1"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be >= 0"));
}

#[test]
fn invalid_env_bound_is_rejected() {
    cargo_bin()
        .env("ROBOT_MAX_Y", "tall")
        .arg("run")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ROBOT_MAX_Y"));
}

#[test]
fn script_from_tempfile_without_trailing_newline() {
    let tf = script_tempfile("PLACE 3,3,WEST\nLEFT\nREPORT");
    cargo_bin()
        .arg("run")
        .arg("--file")
        .arg(tf.path())
        .assert()
        .success()
        .stdout("3,3,SOUTH\n");
}

#[test]
fn oversized_place_coordinate_is_a_fall_not_a_parse_error() {
    cargo_bin()
        .arg("run")
        .write_stdin("PLACE 99999999999,0,NORTH\nREPORT\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(
            "PLACE - avoid fall\n\
             ignoring input - still expecting first PLACE\n",
        );
}

#[test]
fn move_at_the_integer_edge_is_a_fall() {
    cargo_bin()
        .args(["run", "--max-x", "2147483647"])
        .write_stdin("PLACE 2147483647,0,EAST\nMOVE\nREPORT\n")
        .assert()
        .success()
        .stdout("2147483647,0,EAST\n")
        .stderr(predicate::str::contains("MOVE - avoid fall"));
}
