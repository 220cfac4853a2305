// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Stand-in declarations for the platform allocation facilities.
//!
//! Analysis harnesses that model allocation semantics themselves do not want
//! fixtures to pull in the full C-library binding just to type-check one call.
//! This crate declares the minimal subset the fixtures need. No definitions are
//! provided; when a fixture is actually linked, the symbols resolve against the
//! platform C library as usual.

#![no_std]

use core::ffi::c_void;

extern "C" {
    /// Acquires `size` bytes of uninitialized storage from the process heap,
    /// or returns a null pointer when the request cannot be satisfied.
    pub fn malloc(size: usize) -> *mut c_void;
}
