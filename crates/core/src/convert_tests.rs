// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{NaiveDate, TimeZone};

#[test]
fn hex_counters() {
    assert_eq!(from_hex("7b3156"), 8_073_558);
    assert_eq!(from_hex("0"), 0);
    assert_eq!(from_hex(""), 0);
    assert_eq!(from_hex("zz"), 0);
}

#[test]
fn platform_seconds_convert_to_utc() {
    let seconds = from_hex("243b06bad83e0") / 10_000;

    assert_eq!(
        platform_seconds_to_utc(seconds),
        Some(Utc.with_ymd_and_hms(2020, 10, 5, 11, 48, 45).unwrap())
    );
}

#[test]
fn zero_seconds_is_no_date() {
    assert_eq!(platform_seconds_to_utc(0), None);
}

#[test]
fn record_date_parses_fixed_width() {
    let expected = NaiveDate::from_ymd_opt(2020, 10, 5)
        .unwrap()
        .and_hms_opt(11, 48, 53)
        .unwrap();

    assert_eq!(parse_record_date("20201005114853"), Some(expected));
    assert_eq!(parse_record_date("2020"), None);
}
