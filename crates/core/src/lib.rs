// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lgship-core: event model and incremental decoding
//!
//! A data file (`*.lgp`) holds one bracketed record per event. Most fields
//! are numeric codes that point into a companion dictionary (`1Cv8.lgf`).
//! [`LogReader`] tails a data file, [`ReferenceStore`] resolves the codes,
//! and [`decode`] turns each record into an [`Event`].

pub mod convert;
pub mod decode;
pub mod event;
pub mod objects;
pub mod reader;
pub mod taxonomy;

pub use decode::{decode_event, decode_value, ComplexDataKind};
pub use event::{ComplexData, DataValue, Event, RefObject};
pub use objects::{ObjectKey, ObjectType, ReferenceStore};
pub use reader::{Batch, LogReader, ReaderError, ReaderOptions, Stop, METADATA_FILE_NAME};
pub use taxonomy::{Application, EventType, Severity, TransactionStatus};

#[cfg(test)]
mod testdata;
