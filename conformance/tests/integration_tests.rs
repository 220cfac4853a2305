// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

// Runs the conformance checks against the memleak fixture and against
// synthetic fixture sources that violate the contract in each possible way.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use leakcheck::expected_events::{EventCensus, ExpectedEvents};
use leakcheck::options::Options;
use leakcheck::report::ConformanceReport;
use leakcheck::utils;
use tempfile::TempDir;

fn write_case(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("failed to write test case");
    path
}

#[test]
fn memleak_source_has_one_marked_allocation_and_no_release() {
    let src = utils::find_fixture_source("memleak").expect("fixture source not found");
    let census = EventCensus::new(&src).expect("failed to read the fixture source");
    assert_eq!(census.allocation_sites.len(), 1);
    assert!(census.release_sites.is_empty());
    let expected = ExpectedEvents::new(&src).expect("failed to read the fixture source");
    assert!(expected.check_census(&census));
}

#[test]
fn unmarked_allocation_site_is_rejected() {
    let dir = TempDir::new().expect("failed to create a temp dir");
    let path = write_case(
        &dir,
        "unmarked.rs",
        "fn main() {\n    unsafe {\n        malloc(4);\n    }\n}\n",
    );
    let census = EventCensus::new(&path).unwrap();
    assert_eq!(census.allocation_sites, vec![3]);
    let expected = ExpectedEvents::new(&path).unwrap();
    assert!(!expected.check_census(&census));
}

#[test]
fn release_call_site_is_rejected() {
    let dir = TempDir::new().expect("failed to create a temp dir");
    let path = write_case(
        &dir,
        "released.rs",
        "fn main() {\n    unsafe {\n        let p = malloc(4); //~ unreleased allocation\n        free(p);\n    }\n}\n",
    );
    let census = EventCensus::new(&path).unwrap();
    assert_eq!(census.allocation_sites, vec![3]);
    assert_eq!(census.release_sites, vec![4]);
    let expected = ExpectedEvents::new(&path).unwrap();
    assert!(!expected.check_census(&census));
}

#[test]
fn stale_marker_is_rejected() {
    let dir = TempDir::new().expect("failed to create a temp dir");
    let path = write_case(&dir, "stale.rs", "//~ unreleased allocation\nfn main() {}\n");
    let census = EventCensus::new(&path).unwrap();
    assert!(census.allocation_sites.is_empty());
    let expected = ExpectedEvents::new(&path).unwrap();
    assert!(!expected.check_census(&census));
}

#[test]
fn commented_out_calls_are_not_counted() {
    let dir = TempDir::new().expect("failed to create a temp dir");
    let path = write_case(
        &dir,
        "commented.rs",
        "fn main() {\n    // malloc(4) and free(p) used to live here.\n}\n",
    );
    let census = EventCensus::new(&path).unwrap();
    assert!(census.allocation_sites.is_empty());
    assert!(census.release_sites.is_empty());
}

#[test]
fn options_split_off_the_fixture_argument_vector() {
    let mut options = Options::default();
    let fixture_args = options.parse_from_str("--runs 5 -- one two three");
    assert_eq!(options.runs, 5);
    assert_eq!(fixture_args, vec!["one", "two", "three"]);
}

#[test]
fn options_apply_defaults() {
    let mut options = Options::default();
    let fixture_args = options.parse(&[]);
    assert_eq!(options.runs, 3);
    assert!(options.fixture_bin.is_none());
    assert!(options.report_path.is_none());
    assert!(fixture_args.is_empty());
}

#[test]
fn report_round_trips_as_json() {
    let dir = TempDir::new().expect("failed to create a temp dir");
    let src = utils::find_fixture_source("memleak").expect("fixture source not found");
    let census = EventCensus::new(&src).unwrap();
    let report_path = dir.path().join("memleak.json");
    ConformanceReport::new("memleak", &census, 6, true)
        .save(&report_path)
        .expect("failed to write the report");
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(value["fixture"], "memleak");
    assert_eq!(value["executions"], 6);
    assert_eq!(value["conforming"], true);
    assert_eq!(value["allocation_sites"].as_array().unwrap().len(), 1);
    assert_eq!(value["release_sites"].as_array().unwrap().len(), 0);
}

// The harness binary drives the fixture end to end. The fixture binary is built
// as part of the workspace; resolve it the same way the harness does.
#[test]
fn harness_accepts_the_memleak_fixture() {
    let fixture_bin = utils::find_fixture_binary("memleak")
        .expect("memleak fixture binary not built; run a workspace build first");
    let src = utils::find_fixture_source("memleak").expect("fixture source not found");
    let dir = TempDir::new().expect("failed to create a temp dir");
    let report_path = dir.path().join("report.json");
    let output = Command::new(env!("CARGO_BIN_EXE_leakcheck"))
        .args([
            "--fixture_bin",
            fixture_bin.as_str(),
            "--fixture_src",
            src.to_str().unwrap(),
            "--runs",
            "2",
            "--report",
            report_path.to_str().unwrap(),
            "--",
            "extra",
            "arguments",
        ])
        .output()
        .expect("failed to execute the leakcheck harness");
    assert_eq!(
        output.status.code(),
        Some(0),
        "harness reported a violation: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(value["conforming"], true);
    assert_eq!(value["executions"], 4);
}
