// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample texts used across tests.

pub(crate) const PARAGRAPH_A: &str = "The quick brown fox";
pub(crate) const PARAGRAPH_B: &str = "jumps over";
pub(crate) const PARAGRAPH_C: &str = "the lazy dog";

pub(crate) const EDITING: &str = "abc def\n\ngi";

pub(crate) const TWO_PARAGRAPHS: &str = "hello world\nsecond line";
