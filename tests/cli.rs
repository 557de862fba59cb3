use assert_cmd::Command;
use predicates::prelude::*;

fn cellbrush_cmd() -> Command {
    Command::cargo_bin("cellbrush").expect("binary exists")
}

#[test]
fn cellbrush_help_prints_usage() {
    cellbrush_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Multi-resolution pixel painter for the terminal",
        ));
}

#[test]
fn cellbrush_version_includes_package_version() {
    cellbrush_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn width_out_of_range_is_rejected() {
    cellbrush_cmd()
        .args(["--width", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn height_must_be_numeric() {
    cellbrush_cmd()
        .args(["--height", "tall"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
