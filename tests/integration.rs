//! Integration tests for the bfinfo CLI

use assert_cmd::Command;
use predicates::prelude::*;

fn bfinfo() -> Command {
    Command::cargo_bin("bfinfo").expect("binary builds")
}

#[test]
fn help_describes_the_tool() {
    bfinfo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("beamformed"))
        .stdout(predicate::str::contains("--sap"))
        .stdout(predicate::str::contains("--stokes"));
}

#[test]
fn version_flag_works() {
    bfinfo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bfinfo"));
}

#[test]
fn missing_file_argument_fails() {
    bfinfo().assert().failure();
}

#[test]
fn invalid_sap_selector_is_rejected_before_the_file_is_opened() {
    // The file doesn't exist, but the selector error must win: selectors are
    // validated at construction time.
    bfinfo()
        .args(["no-such-file.h5", "--sap", "x2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid selector 'x2'"));
}

#[test]
fn invalid_beam_list_is_rejected() {
    bfinfo()
        .args(["no-such-file.h5", "--beam", "1,two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid selector"));
}

#[test]
fn invalid_stokes_selector_is_rejected() {
    bfinfo()
        .args(["no-such-file.h5", "--stokes", "I;Q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid stokes selector"));
}

#[test]
fn nonexistent_file_reports_a_clean_error() {
    bfinfo()
        .arg("definitely-not-here.h5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open"))
        .stderr(predicate::str::contains("doesn't exist"));
}

#[test]
fn level_out_of_range_is_rejected_by_the_parser() {
    bfinfo()
        .args(["no-such-file.h5", "-L", "7"])
        .assert()
        .failure();
}
