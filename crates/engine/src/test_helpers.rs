// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log fixtures for engine tests

use lgship_core::{LogReader, ReaderOptions, METADATA_FILE_NAME};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "\u{feff}1CV8LOG(ver 2.0)\r\nf0e1d2c3-0000-0000-0000-00000000abcd\r\n\r\n";

pub const DICTIONARY: &str = "\u{feff}1CV8LOG(ver 2.0)\r\nf0e1d2c3-0000-0000-0000-00000000abcd\r\n\r\n\
{1,bace0cc4-7a56-4443-11ea-edd56d0dbdf8,\"Администратор\",1},\r\n\
{2,\"SRV-APP01\",1},\r\n\
{4,\"_$Session$_.Start\",1}";

/// Record whose connection field carries `n`
pub fn record(n: i64, severity: &str) -> String {
    format!(
        "{{20201005114853,N,\r\n{{0,0}},1,1,0,{},1,{},\"record {}\",0,\r\n{{\"U\"}},\"\",0,0,0,1,0,\r\n{{0}}\r\n}}",
        n, severity, n
    )
}

/// Write a data file (and the dictionary next to it)
pub fn write_log(dir: &Path, name: &str, records: &[String]) -> PathBuf {
    let dictionary = dir.join(METADATA_FILE_NAME);
    if !dictionary.exists() {
        std::fs::write(&dictionary, DICTIONARY).unwrap();
    }
    let path = dir.join(name);
    std::fs::write(&path, format!("{}{}", HEADER, records.join(",\r\n"))).unwrap();
    path
}

/// Append records to an existing data file
pub fn append(path: &Path, records: &[String]) {
    let mut file = std::fs::OpenOptions::new().append(true).open(path).unwrap();
    for record in records {
        write!(file, ",\r\n{}", record).unwrap();
    }
}

pub fn open(path: &Path) -> LogReader {
    LogReader::open(path, ReaderOptions::default()).unwrap()
}

pub fn records(range: std::ops::RangeInclusive<i64>) -> Vec<String> {
    range.map(|n| record(n, "I")).collect()
}
