// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decoded event records

use crate::decode::ComplexDataKind;
use crate::taxonomy::{Application, EventType, Severity, TransactionStatus};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A resolved reference: display name, UUID and an optional value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefObject {
    pub name: String,
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RefObject {
    pub fn new(name: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uuid: uuid.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Payload attached to an event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    Reference(RefObject),
    Undefined,
    Object(RefObject),
    Array(Vec<DataValue>),
    String(String),
    Boolean(bool),
    Complex(ComplexData),
}

impl DataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Structured payload whose fields depend on its kind
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexData {
    pub kind: ComplexDataKind,
    pub fields: Vec<(&'static str, Option<DataValue>)>,
}

impl ComplexData {
    /// Field value by label
    pub fn get(&self, label: &str) -> Option<&DataValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == label)
            .and_then(|(_, value)| value.as_ref())
    }
}

impl Serialize for ComplexData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// One decoded audit record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Event {
    pub date: Option<NaiveDateTime>,
    pub transaction_status: TransactionStatus,
    pub transaction_number: i64,
    pub transaction_date: Option<DateTime<Utc>>,
    pub user: String,
    pub user_uuid: String,
    pub computer: String,
    pub application: Application,
    pub connection: i64,
    pub event: EventType,
    pub severity: Severity,
    pub comment: String,
    pub metadata: String,
    pub metadata_uuid: String,
    pub data: Option<DataValue>,
    pub data_presentation: String,
    pub server: String,
    pub main_port: String,
    pub add_port: String,
    pub session: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_data_separators: Option<Vec<RefObject>>,
    /// Byte position of the record in its source file
    pub offset: u64,
    /// Bytes the record consumed, including leading separators
    pub size: u64,
}

impl Event {
    /// Offset just past this record
    pub fn end_offset(&self) -> u64 {
        self.offset + self.size
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
