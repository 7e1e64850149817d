// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

pub(crate) mod env;
pub(crate) mod samples;

pub(crate) use env::{TestEnv, Window, drain};
