// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record decoding
//!
//! Data records are positional:
//!
//! ```text
//! {date, txn status, {txn time, txn number}, user, computer, application,
//!  connection, event, severity, comment, metadata, {data}, presentation,
//!  server, main port, add port, session, _, {separators}}
//! ```
//!
//! Numeric codes are resolved through the [`ReferenceStore`]. Fields that
//! are missing or malformed decode to empty or zero values.

use crate::convert::{from_hex, parse_record_date, platform_seconds_to_utc};
use crate::event::{ComplexData, DataValue, Event, RefObject};
use crate::objects::{ObjectType, ReferenceStore};
use crate::taxonomy::{Application, EventType, Severity, TransactionStatus};
use chrono::{DateTime, Utc};
use lgship_brackets::Node;

mod pos {
    pub const DATE: usize = 0;
    pub const TRANSACTION_STATUS: usize = 1;
    pub const TRANSACTION: usize = 2;
    pub const USER: usize = 3;
    pub const COMPUTER: usize = 4;
    pub const APPLICATION: usize = 5;
    pub const CONNECTION: usize = 6;
    pub const EVENT: usize = 7;
    pub const SEVERITY: usize = 8;
    pub const COMMENT: usize = 9;
    pub const METADATA: usize = 10;
    pub const DATA: usize = 11;
    pub const DATA_PRESENTATION: usize = 12;
    pub const SERVER: usize = 13;
    pub const MAIN_PORT: usize = 14;
    pub const ADD_PORT: usize = 15;
    pub const SESSION: usize = 16;
    pub const SESSION_DATA_SEPARATORS: usize = 18;
}

/// Kinds of structured (`P`) payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexDataKind {
    AuthenticationError,
    Authentication,
    UpdateUser,
}

impl ComplexDataKind {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::AuthenticationError),
            6 => Some(Self::Authentication),
            30 => Some(Self::UpdateUser),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::AuthenticationError => 1,
            Self::Authentication => 6,
            Self::UpdateUser => 30,
        }
    }

    /// Field labels; label `i` is read from sub-node position `i + 1`
    pub fn schema(self) -> &'static [&'static str] {
        match self {
            Self::AuthenticationError => &["Пользователь ОС"],
            Self::Authentication => &["Имя", "Текущий пользователь ОС"],
            Self::UpdateUser => &[
                "Аутентификация ОС",
                "Аутентификация 1С:Предприятия",
                "Запрещено изменять пароль",
                "Имя",
                "Основной язык",
            ],
        }
    }
}

/// Decode one data record
///
/// `offset` and `size` are left at zero; the reader fills them in.
pub fn decode_event(node: &Node, store: &ReferenceStore) -> Event {
    let (transaction_number, transaction_date) = decode_transaction(node.node(pos::TRANSACTION));
    let (user, user_uuid) = store.resolve_referenced(ObjectType::Users, &[node.int(pos::USER)]);
    let (metadata, metadata_uuid) =
        store.resolve_referenced(ObjectType::Metadata, &[node.int(pos::METADATA)]);
    let event = EventType::new(store.resolve_value(ObjectType::Events, &[node.int(pos::EVENT)]));
    let data = decode_value(node.node(pos::DATA), &event);

    Event {
        date: parse_record_date(node.get(pos::DATE)),
        transaction_status: TransactionStatus::from_code(node.get(pos::TRANSACTION_STATUS)),
        transaction_number,
        transaction_date,
        user,
        user_uuid,
        computer: store.resolve_value(ObjectType::Computers, &[node.int(pos::COMPUTER)]),
        application: Application::from_code(
            &store.resolve_value(ObjectType::Applications, &[node.int(pos::APPLICATION)]),
        ),
        connection: node.int64(pos::CONNECTION),
        event,
        severity: Severity::from_code(node.get(pos::SEVERITY)),
        comment: node.get(pos::COMMENT).to_string(),
        metadata,
        metadata_uuid,
        data,
        data_presentation: node.get(pos::DATA_PRESENTATION).to_string(),
        server: store.resolve_value(ObjectType::Servers, &[node.int(pos::SERVER)]),
        main_port: store.resolve_value(ObjectType::MainPorts, &[node.int(pos::MAIN_PORT)]),
        add_port: store.resolve_value(ObjectType::AddPorts, &[node.int(pos::ADD_PORT)]),
        session: node.int64(pos::SESSION),
        session_data_separators: decode_separators(
            node.node(pos::SESSION_DATA_SEPARATORS),
            store,
        ),
        offset: 0,
        size: 0,
    }
}

/// Decode a tagged value node such as `{"S","text"}`
///
/// Returns `None` for an empty array and for structured payloads of an
/// unknown kind.
pub fn decode_value(node: &Node, event: &EventType) -> Option<DataValue> {
    let value = match node.get(0) {
        "R" => DataValue::Reference(decode_reference(node.get(1), node.get(2))),
        "U" => DataValue::Undefined,
        "O" => DataValue::Object(RefObject::new(
            node.get_path(&[1, 1]),
            node.get_path(&[1, 2]),
        )),
        "A" => {
            let stored = node.len().saturating_sub(2);
            let count = usize::try_from(node.int(1)).unwrap_or(0).min(stored);
            if count == 0 {
                return None;
            }
            let items = (2..count + 2)
                .map(|i| decode_value(node.node(i), event).unwrap_or(DataValue::Undefined))
                .collect();
            DataValue::Array(items)
        }
        "S" => DataValue::String(node.get(1).to_string()),
        "B" => DataValue::Boolean(node.bool(1)),
        "P" => return decode_complex(node.node(1), event).map(DataValue::Complex),
        _ => DataValue::String(String::new()),
    };
    Some(value)
}

/// `R` payloads carry the uuid alongside the name, or `class:uuid` in the
/// name alone
fn decode_reference(name: &str, next: &str) -> RefObject {
    if !next.is_empty() {
        return RefObject::new(name, next);
    }
    match name.split_once(':') {
        Some((_, uuid)) => RefObject::new(name, uuid),
        None => RefObject::new(name, ""),
    }
}

fn decode_complex(sub: &Node, event: &EventType) -> Option<ComplexData> {
    let code = sub.int(0);
    let Some(kind) = ComplexDataKind::from_code(code) else {
        if code != 0 {
            tracing::debug!(code, event = %event, "skipping unknown structured payload");
        }
        return None;
    };
    let fields = kind
        .schema()
        .iter()
        .enumerate()
        .map(|(i, label)| (*label, decode_value(sub.node(i + 1), event)))
        .collect();
    Some(ComplexData { kind, fields })
}

/// `{hex seconds * 10000, hex number}`
fn decode_transaction(node: &Node) -> (i64, Option<DateTime<Utc>>) {
    let number = from_hex(node.get(1));
    let date = platform_seconds_to_utc(from_hex(node.get(0)) / 10_000);
    (number, date)
}

/// `{count, separator id, value id, ...}`
fn decode_separators(node: &Node, store: &ReferenceStore) -> Option<Vec<RefObject>> {
    let stored = node.len().saturating_sub(1) / 2;
    let count = usize::try_from(node.int(0)).unwrap_or(0).min(stored);
    if count == 0 {
        return None;
    }
    let separators = (0..count)
        .map(|k| {
            let separator = node.int(1 + 2 * k);
            let value_id = node.int(2 + 2 * k);
            let (name, uuid) =
                store.resolve_referenced(ObjectType::SessionDataSeparator, &[separator]);
            let value = store.resolve_value(
                ObjectType::SessionDataSeparatorValue,
                &[separator, value_id],
            );
            RefObject::new(name, uuid).with_value(value)
        })
        .collect();
    Some(separators)
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
