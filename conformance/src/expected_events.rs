// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use lazy_static::lazy_static;
use log_derive::logfn_inputs;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref ALLOCATION_CALL_RE: Regex = Regex::new(r"\bmalloc\s*\(").unwrap();
    static ref RELEASE_CALL_RE: Regex = Regex::new(r"\bfree\s*\(").unwrap();
}

/// A collection of defect markers that are expected for a fixture.
#[derive(Debug)]
pub struct ExpectedEvents {
    expected_markers: Vec<(usize, String)>,
}

impl ExpectedEvents {
    /// Reads the file at the given path and scans it for instances of "//~ message".
    /// Each message becomes an element of ExpectedEvents together with the 1-based
    /// number of the line it sits on.
    #[logfn_inputs(TRACE)]
    pub fn new(path: &Path) -> std::io::Result<ExpectedEvents> {
        let rdr = BufReader::new(File::open(path)?);
        let tag = "//~";
        let mut expected_markers = Vec::new();
        for (i, line) in rdr.lines().enumerate() {
            if let Some(message) = parse_expected(&line?, tag) {
                expected_markers.push((i + 1, message));
            }
        }
        Ok(ExpectedEvents { expected_markers })
    }

    /// Checks if the given census matches the expected defects: every allocation
    /// site must carry a marker, every marker must sit on an allocation site, and
    /// no release site may be present at all.
    pub fn check_census(&self, census: &EventCensus) -> bool {
        let mut remaining = self.expected_markers.clone();
        for line in &census.allocation_sites {
            match remaining.iter().position(|(marked, _)| marked == line) {
                Some(pos) => {
                    remaining.remove(pos);
                }
                None => {
                    println!("Unmarked allocation site at line {line}. Expected: {remaining:?}");
                    return false;
                }
            }
        }
        if !remaining.is_empty() {
            println!("Expected defects without an allocation site: {remaining:?}");
            return false;
        }
        if !census.release_sites.is_empty() {
            println!(
                "Release call sites at lines {:?}: the unreleased-allocation pattern admits none",
                census.release_sites
            );
            return false;
        }
        true
    }
}

/// Returns the message part of the pattern "//~ message" if there is a match, otherwise None.
#[logfn_inputs(TRACE)]
fn parse_expected(line: &str, tag: &str) -> Option<String> {
    let tag_start = line.find(tag)?;
    Some(String::from(line[tag_start + tag.len()..].trim()))
}

/// A census of the resource-event call sites appearing in a fixture source: one
/// entry per call to the allocation primitive or to the release primitive, keyed
/// by 1-based line number.
#[derive(Debug, Serialize)]
pub struct EventCensus {
    pub allocation_sites: Vec<usize>,
    pub release_sites: Vec<usize>,
}

impl EventCensus {
    /// Reads the file at the given path and records every allocation and release
    /// call site outside of comments. String literals are not considered; the
    /// fixture family does not use any.
    #[logfn_inputs(TRACE)]
    pub fn new(path: &Path) -> std::io::Result<EventCensus> {
        let rdr = BufReader::new(File::open(path)?);
        let mut allocation_sites = Vec::new();
        let mut release_sites = Vec::new();
        for (i, line) in rdr.lines().enumerate() {
            let line = line?;
            let code = line.split("//").next().unwrap_or("");
            for _ in ALLOCATION_CALL_RE.find_iter(code) {
                allocation_sites.push(i + 1);
            }
            for _ in RELEASE_CALL_RE.find_iter(code) {
                release_sites.push(i + 1);
            }
        }
        Ok(EventCensus {
            allocation_sites,
            release_sites,
        })
    }
}
