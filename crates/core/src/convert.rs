// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Field conversions shared by the decoder

use chrono::{DateTime, NaiveDateTime, Utc};

/// Seconds between 0001-01-01 and the unix epoch, as the platform counts them
pub const EPOCH_OFFSET_SECONDS: i64 = 62_135_596_801;

const RECORD_DATE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Parse a base-16 counter, `0` when malformed
pub fn from_hex(raw: &str) -> i64 {
    i64::from_str_radix(raw.trim(), 16).unwrap_or(0)
}

/// Convert platform seconds (counted from year 1) to a UTC timestamp
///
/// Zero means "no date".
pub fn platform_seconds_to_utc(seconds: i64) -> Option<DateTime<Utc>> {
    if seconds == 0 {
        return None;
    }
    DateTime::from_timestamp(seconds - EPOCH_OFFSET_SECONDS, 0)
}

/// Parse a `YYYYMMDDhhmmss` record date
pub fn parse_record_date(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), RECORD_DATE_FORMAT).ok()
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
