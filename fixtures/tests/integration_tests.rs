// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

// Drives the memleak fixture the way an analysis harness would and checks the
// process-level guarantees: termination with exit status 0 and no output, for
// any argument vector.

use std::process::{Command, Output};

fn run_fixture(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_memleak"))
        .args(args)
        .output()
        .expect("failed to execute the memleak fixture")
}

fn assert_silent_success(output: &Output) {
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn exits_with_status_zero_and_no_output() {
    assert_silent_success(&run_fixture(&[]));
}

#[test]
fn ignores_arbitrary_arguments() {
    assert_silent_success(&run_fixture(&["--help", "fixture", "argument vector"]));
}

#[test]
fn repeated_runs_are_indistinguishable() {
    let first = run_fixture(&[]);
    for _ in 0..2 {
        let next = run_fixture(&[]);
        assert_eq!(first.status.code(), next.status.code());
        assert_eq!(first.stdout, next.stdout);
        assert_eq!(first.stderr, next.stderr);
    }
}
