// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::poller::LongPoller;
use crate::test_helpers;
use lgship_adapters::FakeSink;
use std::time::Duration;

fn poller() -> Arc<dyn Poller> {
    Arc::new(LongPoller::new(4, Duration::ZERO))
}

#[tokio::test]
async fn pushes_every_event_to_every_sink_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_helpers::write_log(dir.path(), "a.lgp", &test_helpers::records(1..=10));
    let first = FakeSink::new();
    let second = FakeSink::new();

    let report = Exporter::new(test_helpers::open(&path))
        .with_poller(poller())
        .with_sink(Arc::new(first.clone()))
        .with_sink(Arc::new(second.clone()))
        .run()
        .await
        .unwrap();

    assert!(matches!(report.outcome, PollOutcome::Exhausted));
    assert_eq!(report.forwarded, 10);
    assert_eq!(report.path.as_deref(), Some(path.as_path()));
    assert_eq!(report.offset, std::fs::metadata(&path).unwrap().len());
    for sink in [&first, &second] {
        let connections: Vec<i64> = sink.events().iter().map(|e| e.connection).collect();
        assert_eq!(connections, (1..=10).collect::<Vec<_>>());
    }
}

#[tokio::test]
async fn run_without_poller_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_helpers::write_log(dir.path(), "a.lgp", &test_helpers::records(1..=1));

    let result = Exporter::new(test_helpers::open(&path)).run().await;

    assert!(matches!(result, Err(ExportError::MissingPoller)));
}

#[tokio::test]
async fn failing_sink_does_not_stop_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_helpers::write_log(dir.path(), "a.lgp", &test_helpers::records(1..=5));
    let broken = FakeSink::new();
    broken.set_failing(true);
    let healthy = FakeSink::new();

    let report = Exporter::new(test_helpers::open(&path))
        .with_poller(poller())
        .with_sinks([
            Arc::new(broken.clone()) as Arc<dyn Sink>,
            Arc::new(healthy.clone()) as Arc<dyn Sink>,
        ])
        .run()
        .await
        .unwrap();

    assert_eq!(report.forwarded, 5);
    assert_eq!(broken.len(), 5);
    assert_eq!(healthy.len(), 5);
}

#[tokio::test]
async fn stop_ends_the_run_without_losing_read_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_helpers::write_log(dir.path(), "a.lgp", &test_helpers::records(1..=200));
    let sink = FakeSink::new().with_delay(Duration::from_millis(5));

    let exporter = Exporter::new(test_helpers::open(&path))
        .with_poller(poller())
        .with_sink(Arc::new(sink.clone()));
    let stop = exporter.stop_handle();
    let run = tokio::spawn(exporter.run());

    assert!(sink.wait_for(3, Duration::from_secs(5)).await);
    stop.cancel();
    let report = tokio::time::timeout(Duration::from_secs(10), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    assert!(matches!(report.outcome, PollOutcome::Stopped));
    assert!(report.forwarded < 200);
    let events = sink.events();
    assert_eq!(events.len() as u64, report.forwarded);
    // Everything the reader consumed reached the sink
    assert_eq!(events.last().unwrap().end_offset(), report.offset);
}

#[tokio::test]
async fn resumes_from_the_reported_offset() {
    let dir = tempfile::tempdir().unwrap();
    let path = test_helpers::write_log(dir.path(), "a.lgp", &test_helpers::records(1..=3));
    let sink = FakeSink::new();

    let first = Exporter::new(test_helpers::open(&path))
        .with_poller(poller())
        .with_sink(Arc::new(sink.clone()))
        .run()
        .await
        .unwrap();
    test_helpers::append(&path, &test_helpers::records(4..=5));
    let reader = lgship_core::LogReader::open(
        &path,
        lgship_core::ReaderOptions {
            offset: first.offset,
            ..Default::default()
        },
    )
    .unwrap();
    let second = Exporter::new(reader)
        .with_poller(poller())
        .with_sink(Arc::new(sink.clone()))
        .run()
        .await
        .unwrap();

    assert_eq!(second.forwarded, 2);
    let connections: Vec<i64> = sink.events().iter().map(|e| e.connection).collect();
    assert_eq!(connections, vec![1, 2, 3, 4, 5]);
}
