// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use clap::{App, AppSettings, Arg};
use itertools::Itertools;

/// Creates the clap::App metadata for argument parsing.
fn make_options_parser<'a>() -> App<'a, 'a> {
    // We could put this into lazy_static! with a Mutex around, but we really do not expect
    // to construct this more than once per regular program run.
    App::new("LEAKCHECK")
        .setting(AppSettings::NoBinaryName)
        .version("v0.1.0")
        .arg(Arg::with_name("fixture_bin")
            .long("fixture_bin")
            .takes_value(true)
            .help("Path to the compiled fixture binary.")
            .long_help("When absent, the binary is looked up next to the running executable and then in the target directory."))
        .arg(Arg::with_name("fixture_src")
            .long("fixture_src")
            .takes_value(true)
            .help("Path to the fixture source file.")
            .long_help("When absent, the source is looked up relative to the workspace root and to the conformance package."))
        .arg(Arg::with_name("runs")
            .long("runs")
            .takes_value(true)
            .default_value("3")
            .help("The number of times the fixture is executed.")
            .long_help("Every execution must exit with status 0 and produce no output."))
        .arg(Arg::with_name("report")
            .long("report")
            .takes_value(true)
            .help("Write a JSON conformance report to the given file."))
}

/// Represents options passed to the conformance harness.
#[derive(Debug, Default)]
pub struct Options {
    pub fixture_bin: Option<String>,
    pub fixture_src: Option<String>,
    pub runs: u64,
    pub report_path: Option<String>,
}

impl Options {
    /// Parse options from an argument string. The argument string will be split using unix
    /// shell escaping rules. Any content beyond the leftmost `--` token will be returned
    /// (excluding this token).
    pub fn parse_from_str(&mut self, s: &str) -> Vec<String> {
        self.parse(&shellwords::split(s).unwrap_or_else(|e| {
            eprintln!("Cannot parse argument string: {e:?}");
            std::process::exit(1);
        }))
    }

    /// Parses options from a list of strings. Any content beyond the leftmost `--` token
    /// is not meant for the harness and will be returned (excluding this token) to serve
    /// as the argument vector of the fixture process.
    pub fn parse(&mut self, args: &[String]) -> Vec<String> {
        let mut harness_args_end = args.len();
        let mut fixture_args_start = args.len();
        if let Some((p, _)) = args.iter().find_position(|s| s.as_str() == "--") {
            harness_args_end = p;
            fixture_args_start = p + 1;
        }
        let harness_args = &args[0..harness_args_end];
        let matches = make_options_parser()
            .get_matches_from_safe(harness_args.iter())
            .unwrap_or_else(|e| e.exit());

        if matches.is_present("fixture_bin") {
            self.fixture_bin = matches.value_of("fixture_bin").map(|s| s.to_string());
        }
        if matches.is_present("fixture_src") {
            self.fixture_src = matches.value_of("fixture_src").map(|s| s.to_string());
        }
        if matches.is_present("runs") {
            self.runs = match matches.value_of("runs") {
                Some(s) => match s.parse::<u64>() {
                    Ok(v) => v,
                    Err(_) => {
                        eprintln!("--runs expects an integer");
                        std::process::exit(1);
                    }
                },
                None => self.runs,
            }
        }
        if matches.is_present("report") {
            self.report_path = matches.value_of("report").map(|s| s.to_string());
        }
        args[fixture_args_start..].to_vec()
    }
}
