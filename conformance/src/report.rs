// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::error::Error;
use std::fs::File;
use std::path::Path;

use log_derive::logfn_inputs;
use serde::Serialize;

use crate::expected_events::EventCensus;

/// Summary of one conformance pass over a fixture, persisted for consumers
/// (typically a CI job) that want more than the process exit status.
#[derive(Debug, Serialize)]
pub struct ConformanceReport {
    /// Base name of the fixture the pass ran against.
    pub fixture: String,
    /// Line numbers of the allocation call sites found in the fixture source.
    pub allocation_sites: Vec<usize>,
    /// Line numbers of the release call sites found in the fixture source.
    pub release_sites: Vec<usize>,
    /// The number of times the fixture process was executed.
    pub executions: u64,
    /// True if every source-level and process-level check passed.
    pub conforming: bool,
}

impl ConformanceReport {
    pub fn new(
        fixture: &str,
        census: &EventCensus,
        executions: u64,
        conforming: bool,
    ) -> ConformanceReport {
        ConformanceReport {
            fixture: fixture.to_string(),
            allocation_sites: census.allocation_sites.clone(),
            release_sites: census.release_sites.clone(),
            executions,
            conforming,
        }
    }

    /// Writes the report as pretty-printed JSON to the given path.
    #[logfn_inputs(TRACE)]
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
