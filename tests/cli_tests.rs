//! CLI integration tests for the `primpoly` binary.
//!
//! These spawn the compiled binary via `assert_cmd` and assert on exit
//! code, stdout, and stderr, exercising the end-to-end scenarios of the
//! external interface contract.

use assert_cmd::Command;
use predicates::prelude::*;

fn primpoly() -> Command {
    Command::cargo_bin("primpoly").unwrap()
}

#[test]
fn finds_the_canonical_primitive_polynomial_mod_2_degree_4() {
    primpoly()
        .args(["2", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x ^ 4 + x + 1, 2"));
}

#[test]
fn tests_a_user_supplied_polynomial_for_primitivity() {
    primpoly()
        .args(["-t", "x^4 + x + 1, 2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x ^ 4 + x + 1, 2 is primitive!"));
}

#[test]
fn lists_both_primitive_quartics_mod_2() {
    primpoly()
        .args(["-a", "2", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x ^ 4 + x + 1, 2"))
        .stdout(predicate::str::contains("x ^ 4 + x ^ 3 + 1, 2"));
}

#[test]
fn reports_a_non_primitive_polynomial_with_its_rejection_reason() {
    primpoly()
        .args(["-t", "x^3 + 3, 5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is not primitive"))
        .stdout(predicate::str::contains("NullityTooHigh"));
}

#[test]
fn stats_flag_prints_an_operation_count_block() {
    primpoly()
        .args(["-s", "2", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("operation counts:"));
}

#[test]
fn confirm_flag_accepts_a_genuinely_primitive_polynomial() {
    primpoly()
        .args(["-c", "2", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x ^ 4 + x + 1, 2"));
}

#[test]
fn concatenated_short_flags_behave_like_the_separated_form() {
    primpoly()
        .args(["-sc", "2", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("operation counts:"));
}

#[test]
fn rejects_a_non_prime_modulus() {
    primpoly().args(["4", "3"]).assert().code(3);
}

#[test]
fn rejects_a_degree_below_two() {
    primpoly().args(["2", "1"]).assert().code(3);
}

#[test]
fn rejects_malformed_polynomial_syntax() {
    primpoly().args(["-t", "x^ + 1, 2"]).assert().code(3);
}

#[test]
#[ignore = "exercises the 13/19 path from the large end-to-end scenario; slow"]
fn finds_a_primitive_polynomial_of_degree_19_mod_13() {
    primpoly()
        .args(["-s", "13", "19"])
        .assert()
        .success()
        .stdout(predicate::str::contains(", 13"));
}
