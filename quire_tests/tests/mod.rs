// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `quire`, `quire_flow` and `quire_input`.
//!
//! - The `util` module contains the shared test environment and sample texts.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that every topic module can share `util`.
//! - If you want to add new tests, try to follow these guidelines:
//!   - Put the test into the module of its topic (adjustment, manager, dispatcher, etc.), or
//!     create a new one in case it doesn't exist yet.
//!   - Put the topic at the start of the test name: `manager_copy_spans_selectables` rather
//!     than `copy_spans_selectables_in_manager`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::missing_assert_message, reason = "not critical for testing")]

mod manager;
mod util;
