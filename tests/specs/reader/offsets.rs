//! Offset accounting specs
//!
//! Offsets are plain byte positions: they only grow while reading, they
//! add up to the bytes consumed, and a reader opened at any of them picks
//! up exactly where the previous one stopped.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn offset_grows_by_the_size_of_every_record_read() {
    let text = data_file(&records(1..=50));
    let mut reader = reader_over(&text, 0);
    let start = reader.offset();
    let mut previous = start;
    let mut consumed = 0;

    loop {
        let batch = reader.read(7, Duration::ZERO).unwrap();
        consumed += batch.events.iter().map(|e| e.size).sum::<u64>();
        assert!(reader.offset() >= previous);
        previous = reader.offset();
        if !matches!(batch.stop, Stop::Limit) {
            break;
        }
    }

    assert_eq!(reader.offset(), text.len() as u64);
    assert_eq!(reader.offset(), start + consumed);
}

#[test]
fn each_event_ends_where_the_next_begins() {
    let text = data_file(&records(1..=20));
    let events = read_all(&mut reader_over(&text, 0), 6);

    for pair in events.windows(2) {
        assert_eq!(pair[0].end_offset(), pair[1].offset);
    }
    assert_eq!(events.last().unwrap().end_offset(), text.len() as u64);
}

#[test]
fn resuming_at_any_record_boundary_matches_a_single_pass() {
    let text = data_file(&records(1..=30));
    let whole = read_all(&mut reader_over(&text, 0), 8);

    for split in [1, 9, 15, 29] {
        let resume_at = whole[split - 1].end_offset();
        let mut first = read_all(&mut reader_over(&text, 0), 8);
        first.truncate(split);
        let rest = read_all(&mut reader_over(&text, resume_at), 8);

        let mut joined = first;
        joined.extend(rest);
        assert_eq!(joined, whole, "split after {} records", split);
    }
}

#[test]
fn resuming_at_end_of_file_reads_nothing() {
    let text = data_file(&records(1..=3));
    let mut reader = reader_over(&text, text.len() as u64);

    let batch = reader.read(10, Duration::ZERO).unwrap();

    assert!(batch.events.is_empty());
    assert!(matches!(batch.stop, Stop::EndOfStream));
    assert_eq!(reader.offset(), text.len() as u64);
}

#[test]
fn partial_trailing_record_is_read_once_complete() {
    let dir = LogDir::new();
    let path = dir.write("a.lgp", &records(1..=2));
    let mut reader = LogReader::open(&path, ReaderOptions::default()).unwrap();

    let third = record(3, "I");
    let (head, tail) = third.split_at(20);
    dir.append_raw(&path, &format!(",\r\n{}", head));
    let before = read_all(&mut reader, 10);
    let offset_before = reader.offset();
    dir.append_raw(&path, tail);
    let after = read_all(&mut reader, 10);

    assert_eq!(connections(&before), vec![1, 2]);
    assert!(offset_before < file_len(&path));
    assert_eq!(connections(&after), vec![3]);
    assert_eq!(reader.offset(), file_len(&path));
}
