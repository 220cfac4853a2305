// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

// A test input that exhibits exactly one unreleased heap allocation. The result
// of the allocation is discarded on purpose: no binding, no null check, no
// release. A detector configured for unreleased allocations must report exactly
// one finding, at the marked call site.

#[cfg(feature = "real-headers")]
use libc::malloc;
#[cfg(all(feature = "bundled", not(feature = "real-headers")))]
use leakcheck_stubs::malloc;

#[cfg(not(any(feature = "bundled", feature = "real-headers")))]
compile_error!(
    "no allocator declarations available: enable the `bundled` feature or the `real-headers` feature"
);

// Both header branches must expose the allocator with the same calling convention.
#[cfg(any(feature = "bundled", feature = "real-headers"))]
const _: unsafe extern "C" fn(usize) -> *mut core::ffi::c_void = malloc;

fn main() {
    unsafe {
        malloc(4); //~ unreleased allocation
    }
}
