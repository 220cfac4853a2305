// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use log_derive::logfn_inputs;
use walkdir::WalkDir;

/// Returns the location of the compiled fixture binary with the given base name.
/// The usual cargo layout puts workspace binaries next to the harness and test
/// executables, so siblings of the running executable are tried first; a walk of
/// the target directory serves as the fallback.
#[logfn_inputs(TRACE)]
pub fn find_fixture_binary(base_name: &str) -> Option<String> {
    let exe_name = format!("{base_name}.exe");
    if let Ok(exe) = std::env::current_exe() {
        // target/debug for installed binaries, target/debug/deps for test executables.
        for dir in exe.ancestors().skip(1).take(2) {
            for candidate in [dir.join(base_name), dir.join(&exe_name)] {
                if candidate.is_file() {
                    return Some(candidate.to_string_lossy().into_owned());
                }
            }
        }
    }

    let mut target_path = PathBuf::from("target/debug");
    if !target_path.exists() {
        target_path = PathBuf::from("../target/debug");
    }
    for entry in WalkDir::new(target_path)
        .contents_first(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        // On Windows the executable is {base_name}.exe. We match either form.
        let file_name = entry.file_name().to_str().unwrap_or("");
        if file_name != base_name && file_name != exe_name {
            continue;
        }
        if entry.path().to_str().unwrap_or("").contains(".dSYM/") {
            // There might be a directory .dSYM which contains a file with the
            // same name but for a different purpose. Skip this.
            continue;
        }
        debug!("resolving {}", entry.path().display());
        return Some(entry.path().to_string_lossy().into_owned());
    }
    None
}

/// Returns the path of the named fixture's source file. The harness may be
/// invoked from the workspace root or from within the conformance package.
#[logfn_inputs(TRACE)]
pub fn find_fixture_source(base_name: &str) -> Option<PathBuf> {
    let mut path = PathBuf::from(format!("fixtures/src/{base_name}.rs"));
    if !path.exists() {
        path = PathBuf::from(format!("../fixtures/src/{base_name}.rs"));
    }
    path.exists().then_some(path)
}
