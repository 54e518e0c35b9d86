// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Offset-tracked batch reader over one data file
//!
//! The reader owns the data stream, a record parser over it and the
//! [`ReferenceStore`] for the companion dictionary. Every record advances
//! the offset by exactly the bytes it consumed, so the offset can be
//! journaled and used as a seek target later.

use crate::decode::decode_event;
use crate::event::Event;
use crate::objects::ReferenceStore;
use lgship_brackets::{Node, Parser};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Dictionary file expected next to every data file
pub const METADATA_FILE_NAME: &str = "1Cv8.lgf";

const BOM: &str = "\u{feff}";

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("metadata not found: {}", .0.display())]
    MetadataNotFound(PathBuf),
    #[error("read limit must be positive")]
    InvalidLimit,
}

/// Options for [`LogReader::open`]
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Dictionary path; defaults to `1Cv8.lgf` in the data file's directory
    pub metadata_path: Option<PathBuf>,
    /// Starting offset; zero starts after the header
    pub offset: u64,
}

/// Why a batch read returned
#[derive(Debug)]
pub enum Stop {
    Limit,
    Timeout,
    EndOfStream,
    Cancelled,
    Failed(ReaderError),
}

/// Events from one read, in file order
#[derive(Debug)]
pub struct Batch {
    pub events: Vec<Event>,
    pub stop: Stop,
}

trait DataStream: Read + Seek + Send {}

impl<T: Read + Seek + Send> DataStream for T {}

pub struct LogReader {
    path: Option<PathBuf>,
    parser: Parser<Box<dyn DataStream>>,
    store: Arc<ReferenceStore>,
    offset: u64,
    version: String,
    uuid: String,
}

impl LogReader {
    /// Open a data file and its companion dictionary
    pub fn open(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        let metadata_path = match options.metadata_path {
            Some(metadata_path) => metadata_path,
            None => metadata_path_for(path),
        };
        let metadata = match File::open(&metadata_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ReaderError::MetadataNotFound(metadata_path))
            }
            Err(e) => return Err(e.into()),
        };
        let data = File::open(path)?;

        let mut reader = Self::from_streams(data, metadata, options.offset)?;
        reader.path = Some(path.to_path_buf());
        Ok(reader)
    }

    /// Build a reader over already-open streams
    pub fn from_streams(
        data: impl Read + Seek + Send + 'static,
        metadata: impl Read + Send + 'static,
        offset: u64,
    ) -> Result<Self, ReaderError> {
        Self::with_store(data, Arc::new(ReferenceStore::new(metadata)), offset)
    }

    /// Build a reader that shares an existing dictionary
    pub fn with_store(
        data: impl Read + Seek + Send + 'static,
        store: Arc<ReferenceStore>,
        offset: u64,
    ) -> Result<Self, ReaderError> {
        let mut header = BufReader::new(data);
        let mut version = Vec::new();
        let mut uuid = Vec::new();
        let header_len = header.read_until(b'\n', &mut version)? + header.read_until(b'\n', &mut uuid)?;

        let mut data = header.into_inner();
        let start = if offset > 0 { offset } else { header_len as u64 };
        data.seek(SeekFrom::Start(start))?;

        let version = String::from_utf8_lossy(&version);
        let stream: Box<dyn DataStream> = Box::new(data);
        Ok(Self {
            path: None,
            parser: Parser::new(stream),
            store,
            offset: start,
            version: version.trim_start_matches(BOM).trim().to_string(),
            uuid: String::from_utf8_lossy(&uuid).trim().to_string(),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Format line from the file header
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Log identifier from the file header
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn store(&self) -> &Arc<ReferenceStore> {
        &self.store
    }

    /// Byte position just past the last consumed record
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reposition the reader; returns how many bytes the position moved
    pub fn set_offset(&mut self, offset: u64) -> Result<u64, ReaderError> {
        if offset == self.offset {
            return Ok(0);
        }
        self.parser.get_mut().seek(SeekFrom::Start(offset))?;
        self.parser.reset();
        let moved = offset.abs_diff(self.offset);
        self.offset = offset;
        Ok(moved)
    }

    /// Read up to `limit` events; a zero `timeout` means no deadline
    pub fn read(&mut self, limit: usize, timeout: Duration) -> Result<Batch, ReaderError> {
        self.read_with_cancel(limit, timeout, &CancellationToken::new())
    }

    /// Read up to `limit` events, stopping early on the deadline or `cancel`
    ///
    /// Records are pulled sequentially, then decoded in parallel into slots
    /// that keep file order.
    pub fn read_with_cancel(
        &mut self,
        limit: usize,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Batch, ReaderError> {
        if limit == 0 {
            return Err(ReaderError::InvalidLimit);
        }
        let deadline = (!timeout.is_zero()).then(|| Instant::now() + timeout);

        let mut records: Vec<(Node, u64, u64)> = Vec::new();
        let stop = loop {
            if cancel.is_cancelled() {
                break Stop::Cancelled;
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break Stop::Timeout;
            }
            if records.len() == limit {
                break Stop::Limit;
            }
            match self.parser.next_node() {
                Ok(Some((node, len))) => {
                    let start = self.offset;
                    self.offset += len as u64;
                    records.push((node, start, len as u64));
                }
                Ok(None) => break Stop::EndOfStream,
                Err(e) => break Stop::Failed(e.into()),
            }
        };

        let store = &*self.store;
        let events: Vec<Event> = records
            .into_par_iter()
            .map(|(node, offset, size)| Event {
                offset,
                size,
                ..decode_event(&node, store)
            })
            .collect();

        tracing::trace!(
            path = ?self.path,
            offset = self.offset,
            events = events.len(),
            stop = ?stop,
            "read batch"
        );
        Ok(Batch { events, stop })
    }
}

/// Companion dictionary path for a data file
pub fn metadata_path_for(path: &Path) -> PathBuf {
    path.parent()
        .unwrap_or_else(|| Path::new(""))
        .join(METADATA_FILE_NAME)
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
