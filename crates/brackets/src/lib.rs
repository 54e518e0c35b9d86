// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Tokenizer for the bracketed positional record format
//!
//! Event log files are a sequence of records shaped like
//! `{20201005114853,U,{243b06bad83e0,7b3156},71,"text"}`. This crate turns a
//! byte stream into generic [`Node`]s and reports how many bytes each record
//! consumed, so callers can keep exact resume offsets.

mod node;
mod parser;

pub use node::{Node, Value};
pub use parser::{parse_node, Parser};
