//! Shared fixtures for behavioral specs

#![allow(dead_code)]

pub use lgship_core::{DataValue, Event, EventType, LogReader, ReaderOptions, Severity, Stop};
pub use std::time::Duration;

use lgship_core::METADATA_FILE_NAME;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const HEADER: &str = "\u{feff}1CV8LOG(ver 2.0)\r\n0c9f7d6e-5b4a-4392-8170-6f5e4d3c2b1a\r\n\r\n";

pub const DICTIONARY: &str = "\u{feff}1CV8LOG(ver 2.0)\r\n0c9f7d6e-5b4a-4392-8170-6f5e4d3c2b1a\r\n\r\n\
{1,bace0cc4-7a56-4443-11ea-edd56d0dbdf8,\"Администратор\",1},\r\n\
{2,\"SRV-APP01\",1},\r\n\
{3,\"1CV8C\",1},\r\n\
{4,\"_$Session$_.Authentication\",1},\r\n\
{4,\"_$Data$_.Update\",2},\r\n\
{1,d00d0000-0000-0000-0000-000000000002,\"Оператор\",2}";

/// Record carrying `connection`, `severity`, `user` and a raw data field
pub fn record_with(connection: i64, severity: &str, user: i32, data: &str) -> String {
    format!(
        "{{20231120101500,N,\r\n{{0,0}},{},1,1,{},1,{},\"\",0,\r\n{},\"\",0,0,0,1,0,\r\n{{0}}\r\n}}",
        user, connection, severity, data
    )
}

pub fn record(connection: i64, severity: &str) -> String {
    record_with(connection, severity, 1, "{\"U\"}")
}

pub fn records(range: std::ops::RangeInclusive<i64>) -> Vec<String> {
    range.map(|n| record(n, "I")).collect()
}

/// Header plus records, separated the way the platform writes them
pub fn data_file(records: &[String]) -> String {
    format!("{}{}", HEADER, records.join(",\r\n"))
}

/// Reader over in-memory data and dictionary
pub fn reader_over(text: &str, offset: u64) -> LogReader {
    LogReader::from_streams(
        Cursor::new(text.as_bytes().to_vec()),
        Cursor::new(DICTIONARY.as_bytes().to_vec()),
        offset,
    )
    .unwrap()
}

/// Read until the reader reports anything but a full batch
pub fn read_all(reader: &mut LogReader, limit: usize) -> Vec<Event> {
    let mut events = Vec::new();
    loop {
        let batch = reader.read(limit, Duration::ZERO).unwrap();
        events.extend(batch.events);
        if !matches!(batch.stop, Stop::Limit) {
            return events;
        }
    }
}

pub fn connections(events: &[Event]) -> Vec<i64> {
    events.iter().map(|e| e.connection).collect()
}

/// Temporary directory holding a dictionary and data files
pub struct LogDir {
    dir: TempDir,
}

impl LogDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(METADATA_FILE_NAME), DICTIONARY).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, records: &[String]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, data_file(records)).unwrap();
        path
    }

    pub fn append_raw(&self, path: &Path, text: &str) {
        let mut file = std::fs::OpenOptions::new().append(true).open(path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
    }

    pub fn append(&self, path: &Path, records: &[String]) {
        for record in records {
            self.append_raw(path, &format!(",\r\n{}", record));
        }
    }
}

pub fn file_len(path: &Path) -> u64 {
    std::fs::metadata(path).unwrap().len()
}
