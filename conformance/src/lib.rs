// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

// A conformance harness for analyzer input fixtures. Before a fixture is handed
// to a detector, the harness checks the contract every consumer relies on: the
// defect pattern is present in the source exactly as marked, and the compiled
// fixture terminates successfully, silently, and deterministically for any
// argument vector. The harness is not a detector itself; it never inspects the
// heap and never models reachability.

#[macro_use]
extern crate log;

pub mod expected_events;
pub mod options;
pub mod report;
pub mod utils;
