// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lgship-storage: per-file read offsets that survive restarts

mod file;
mod journal;

pub use file::FileJournal;
pub use journal::{Journal, JournalError, MemoryJournal};
