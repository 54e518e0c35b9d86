//! Severity filtering specs
//!
//! An allow-list drops events before they reach the destination; the
//! reader's offset still covers the dropped records.

use crate::prelude::*;
use lgship_engine::{LongPoller, PollOutcome, Poller};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn poll(poller: &LongPoller, records: &[String]) -> (Vec<Event>, u64, u64) {
    let text = data_file(records);
    let mut reader = reader_over(&text, 0);
    let (tx, mut rx) = mpsc::channel(records.len().max(1));

    let outcome = poller.poll(&mut reader, &tx, &CancellationToken::new());
    assert!(matches!(outcome, PollOutcome::Exhausted));

    let mut forwarded = Vec::new();
    while let Ok(event) = rx.try_recv() {
        forwarded.push(event);
    }
    (forwarded, reader.offset(), text.len() as u64)
}

#[test]
fn error_allow_list_forwards_only_errors() {
    let records = vec![record(1, "I"), record(2, "E"), record(3, "W")];
    let poller = LongPoller::default().with_severity([Severity::Error]);

    let (forwarded, offset, len) = poll(&poller, &records);

    assert_eq!(connections(&forwarded), vec![2]);
    assert_eq!(forwarded[0].severity, Severity::Error);
    assert_eq!(offset, len);
}

#[test]
fn empty_allow_list_forwards_everything() {
    let records = vec![record(1, "I"), record(2, "E"), record(3, "W"), record(4, "N")];

    let (forwarded, _, _) = poll(&LongPoller::default(), &records);

    assert_eq!(connections(&forwarded), vec![1, 2, 3, 4]);
}

#[test]
fn allow_list_spans_batches() {
    let records: Vec<String> = (1..=20)
        .map(|n| record(n, if n % 5 == 0 { "W" } else { "I" }))
        .collect();
    let poller = LongPoller::new(3, Duration::ZERO).with_severity([Severity::Warning]);

    let (forwarded, offset, len) = poll(&poller, &records);

    assert_eq!(connections(&forwarded), vec![5, 10, 15, 20]);
    assert_eq!(offset, len);
}
