//! Record decoding specs
//!
//! Tagged data values, event type structure, batch order and graceful
//! handling of references the dictionary cannot resolve.

use crate::prelude::*;
use lgship_core::{ObjectType, ReferenceStore};
use std::io::Cursor;

fn decode_one(record: String) -> Event {
    let text = data_file(&[record]);
    let mut events = read_all(&mut reader_over(&text, 0), 1);
    assert_eq!(events.len(), 1);
    events.remove(0)
}

#[test]
fn string_payload_decodes_to_its_text() {
    let event = decode_one(record_with(1, "I", 1, "{\"S\",\"2: Простой текст 7\"}"));

    assert_eq!(event.data, Some(DataValue::String("2: Простой текст 7".into())));
}

#[test]
fn boolean_payload_decodes_to_false() {
    let event = decode_one(record_with(1, "I", 1, "{\"B\",0}"));

    assert_eq!(event.data, Some(DataValue::Boolean(false)));
}

#[test]
fn empty_array_payload_decodes_to_nothing() {
    let event = decode_one(record_with(1, "I", 1, "{\"A\",0}"));

    assert_eq!(event.data, None);
}

#[test]
fn event_type_splits_into_scope_and_cause() {
    let event_type = EventType::from("_$Session$_.Authentication");
    assert_eq!(event_type.scope(), "_$Session$_");
    assert_eq!(event_type.cause(), "Authentication");

    let bare = EventType::from("_$Session$_");
    assert_eq!(bare.scope(), "_$Session$_");
    assert_eq!(bare.cause(), "");
}

#[test]
fn decoded_event_carries_dictionary_values() {
    let event = decode_one(record(7, "W"));

    assert_eq!(event.user, "Администратор");
    assert_eq!(event.user_uuid, "bace0cc4-7a56-4443-11ea-edd56d0dbdf8");
    assert_eq!(event.computer, "SRV-APP01");
    assert_eq!(event.event.as_str(), "_$Session$_.Authentication");
    assert_eq!(event.severity, Severity::Warning);
    assert_eq!(event.connection, 7);
}

#[test]
fn large_batch_keeps_file_order() {
    let records: Vec<String> = (1..=500)
        .map(|n| record_with(n, "I", if n % 2 == 0 { 1 } else { 2 }, "{\"U\"}"))
        .collect();
    let text = data_file(&records);
    let mut reader = reader_over(&text, 0);

    let batch = reader.read(500, Duration::ZERO).unwrap();

    assert_eq!(connections(&batch.events), (1..=500).collect::<Vec<_>>());
    let users: Vec<&str> = batch.events.iter().take(4).map(|e| e.user.as_str()).collect();
    assert_eq!(users, vec!["Оператор", "Администратор", "Оператор", "Администратор"]);
}

#[test]
fn unknown_reference_resolves_to_empty_without_breaking_the_store() {
    let store = ReferenceStore::new(Cursor::new(DICTIONARY.as_bytes().to_vec()));

    assert_eq!(store.resolve_value(ObjectType::Users, &[99]), "");
    // The failed scan went past every record; earlier entries stay resolvable
    assert_eq!(
        store.resolve_referenced(ObjectType::Users, &[2]),
        (
            "Оператор".to_string(),
            "d00d0000-0000-0000-0000-000000000002".to_string()
        )
    );
    assert_eq!(store.resolve_value(ObjectType::Computers, &[1]), "SRV-APP01");
}

#[test]
fn record_with_unknown_user_still_decodes() {
    let event = decode_one(record_with(3, "E", 42, "{\"U\"}"));

    assert_eq!(event.user, "");
    assert_eq!(event.user_uuid, "");
    assert_eq!(event.connection, 3);
    assert_eq!(event.severity, Severity::Error);
}
