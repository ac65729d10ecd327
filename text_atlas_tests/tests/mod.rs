// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `text_atlas`.
//!
//! - The `util` module contains a fake atlas builder, a recording render pass and
//!   frame constructors shared by the tests.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, which makes sharing the utilities easy.
//! - For test naming, put the "topic" of the test at the start of the name, for example
//!   `lazy_atlas_builds_once_per_cycle` rather than `builds_lazy_atlas_once`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod render;
mod util;
