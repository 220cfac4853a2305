// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

// Checks that a leak fixture still satisfies the contract an analyzer relies
// on: one allocation call site carrying a defect marker, no release call site,
// and a process that exits with status 0 and stays silent for any argument
// vector. Invoked as `leakcheck [options] [-- fixture-args...]`; anything after
// the leftmost `--` becomes the argument vector of the fixture process.

use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::Command;

use leakcheck::expected_events::{EventCensus, ExpectedEvents};
use leakcheck::options::Options;
use leakcheck::report::ConformanceReport;
use leakcheck::utils;
use log::info;

const FIXTURE_BASE_NAME: &str = "memleak";

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize loggers.
    if env::var("LEAKCHECK_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("LEAKCHECK_LOG")
            .write_style("LEAKCHECK_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let mut options = Options::default();
    let fixture_args = options.parse(&args);

    let fixture_src = match options
        .fixture_src
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| utils::find_fixture_source(FIXTURE_BASE_NAME))
    {
        Some(path) => path,
        None => {
            eprintln!("Could not locate the fixture source; pass --fixture_src");
            std::process::exit(1);
        }
    };
    let fixture_bin = match options
        .fixture_bin
        .clone()
        .or_else(|| utils::find_fixture_binary(FIXTURE_BASE_NAME))
    {
        Some(path) => path,
        None => {
            eprintln!("Could not locate the compiled fixture binary; build it first or pass --fixture_bin");
            std::process::exit(1);
        }
    };
    let fixture_name = fixture_src
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(FIXTURE_BASE_NAME)
        .to_string();

    let expected = ExpectedEvents::new(&fixture_src)?;
    let census = EventCensus::new(&fixture_src)?;
    let mut conforming = expected.check_census(&census);

    let mut executions = 0;
    for _ in 0..options.runs {
        conforming &= check_execution(&fixture_bin, &[]);
        executions += 1;
        if !fixture_args.is_empty() {
            conforming &= check_execution(&fixture_bin, &fixture_args);
            executions += 1;
        }
    }
    info!("{fixture_name}: {executions} executions, conforming: {conforming}");

    if let Some(report_path) = &options.report_path {
        ConformanceReport::new(&fixture_name, &census, executions, conforming)
            .save(Path::new(report_path))?;
    }
    std::process::exit((!conforming) as i32);
}

// Runs the fixture once with the given argument vector. A conforming fixture
// terminates with exit status 0 and writes nothing to stdout or stderr no
// matter what the argument vector holds.
fn check_execution(binary: &str, args: &[String]) -> bool {
    let output = match Command::new(binary).args(args).output() {
        Ok(output) => output,
        Err(e) => {
            println!("Failed to execute {binary}: {e}");
            return false;
        }
    };
    let mut ok = true;
    if output.status.code() != Some(0) {
        println!("{binary} exited with {} rather than status 0", output.status);
        ok = false;
    }
    if !output.stdout.is_empty() {
        println!(
            "{binary} wrote to stdout: {}",
            String::from_utf8_lossy(&output.stdout)
        );
        ok = false;
    }
    if !output.stderr.is_empty() {
        println!(
            "{binary} wrote to stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        ok = false;
    }
    ok
}
