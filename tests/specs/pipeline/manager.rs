//! Manager specs
//!
//! File notifications drive exporters: one per path, offsets journaled,
//! and a restarted manager resumes from the journal.

use crate::prelude::*;
use lgship_adapters::{FakeSink, FakeWatcher, Sink};
use lgship_engine::{Manager, ManagerConfig};
use lgship_storage::{FileJournal, Journal, MemoryJournal};
use std::sync::Arc;

const WAIT: Duration = Duration::from_secs(10);

fn start_manager(journal: Arc<dyn Journal>, sink: &FakeSink) -> (Manager<FakeWatcher>, FakeWatcher) {
    let watcher = FakeWatcher::new();
    let manager = Manager::new(
        watcher.clone(),
        journal,
        vec![Arc::new(sink.clone()) as Arc<dyn Sink>],
        ManagerConfig::default(),
    );
    manager.start();
    (manager, watcher)
}

async fn settle(manager: &Manager<FakeWatcher>, sink: &FakeSink, count: usize) {
    assert!(sink.wait_for(count, WAIT).await, "expected {} events", count);
    tokio::time::timeout(WAIT, manager.wait_idle()).await.unwrap();
}

#[tokio::test]
async fn near_simultaneous_writes_run_one_exporter() {
    let dir = LogDir::new();
    let path = dir.write("a.lgp", &records(1..=20));
    let sink = FakeSink::new().with_delay(Duration::from_millis(10));
    let (manager, watcher) = start_manager(Arc::new(MemoryJournal::new()), &sink);

    watcher.write(&path).await;
    watcher.write(&path).await;
    assert!(sink.wait_for(1, WAIT).await);

    assert_eq!(manager.running(), 1);
    assert_eq!(manager.active_exporters(), vec![path.clone()]);
    settle(&manager, &sink, 20).await;
    assert_eq!(connections(&sink.events()), (1..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn restarted_manager_resumes_from_the_journal() {
    let dir = LogDir::new();
    let state = tempfile::tempdir().unwrap();
    let journal_path = state.path().join("journal.json");
    let path = dir.write("a.lgp", &records(1..=4));

    let sink = FakeSink::new();
    {
        let journal = Arc::new(FileJournal::open(&journal_path).unwrap());
        let (manager, watcher) = start_manager(journal, &sink);
        watcher.create(&path).await;
        settle(&manager, &sink, 4).await;
        manager.shutdown().await;
    }

    dir.append(&path, &records(5..=6));
    let resumed = FakeSink::new();
    let journal = Arc::new(FileJournal::open(&journal_path).unwrap());
    let (manager, watcher) = start_manager(journal.clone(), &resumed);
    watcher.write(&path).await;
    settle(&manager, &resumed, 2).await;

    assert_eq!(connections(&resumed.events()), vec![5, 6]);
    assert_eq!(journal.offset(&path), file_len(&path));
    manager.shutdown().await;
}

#[tokio::test]
async fn removal_stops_the_exporter_and_drops_the_offset() {
    let dir = LogDir::new();
    let path = dir.write("a.lgp", &records(1..=300));
    let sink = FakeSink::new().with_delay(Duration::from_millis(10));
    let journal = Arc::new(MemoryJournal::new());
    let (manager, watcher) = start_manager(journal.clone(), &sink);

    watcher.create(&path).await;
    assert!(sink.wait_for(2, WAIT).await);
    watcher.remove_file(&path).await;
    tokio::time::timeout(WAIT, async {
        while manager.running() > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    assert!(sink.len() < 300);
    assert!(journal.entries().is_empty());
}
