// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lazy dictionary over the companion `1Cv8.lgf` stream
//!
//! Records in the dictionary look like `{1,bace0cc4-...,"Администратор",3}`:
//! an object type, then type-specific fields, then the numeric id that data
//! records refer to. The store never reads ahead of what a lookup needs. A
//! miss advances a single forward cursor until the key shows up or the
//! stream runs dry; there is no rewind, so anything skipped over without
//! being cached stays unresolved.

use lgship_brackets::{Node, Parser};
use std::collections::HashMap;
use std::io::Read;
use std::sync::{Mutex, RwLock};

/// Dictionary a lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    None,
    Users,
    Computers,
    Applications,
    Events,
    Metadata,
    Servers,
    MainPorts,
    AddPorts,
    SessionDataSeparator,
    SessionDataSeparatorValue,
}

impl ObjectType {
    /// Known type for a leading record code; codes from 11 up are unknown
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::None,
            1 => Self::Users,
            2 => Self::Computers,
            3 => Self::Applications,
            4 => Self::Events,
            5 => Self::Metadata,
            6 => Self::Servers,
            7 => Self::MainPorts,
            8 => Self::AddPorts,
            9 => Self::SessionDataSeparator,
            10 => Self::SessionDataSeparatorValue,
            _ => return None,
        })
    }

    pub fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Users => 1,
            Self::Computers => 2,
            Self::Applications => 3,
            Self::Events => 4,
            Self::Metadata => 5,
            Self::Servers => 6,
            Self::MainPorts => 7,
            Self::AddPorts => 8,
            Self::SessionDataSeparator => 9,
            Self::SessionDataSeparatorValue => 10,
        }
    }

    /// Types stored as a (value, uuid) pair
    pub fn is_referenced(self) -> bool {
        matches!(
            self,
            Self::Users | Self::Metadata | Self::SessionDataSeparator
        )
    }
}

/// Composite cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub kind: ObjectType,
    pub id: i32,
    /// Second id, only used by session separator values
    pub sub_id: i32,
}

impl ObjectKey {
    pub fn new(kind: ObjectType, ids: &[i32]) -> Self {
        Self {
            kind,
            id: ids.first().copied().unwrap_or(0),
            sub_id: ids.get(1).copied().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Referenced { value: String, uuid: String },
    Value(String),
}

impl Entry {
    fn value(&self) -> &str {
        match self {
            Entry::Referenced { value, .. } | Entry::Value(value) => value,
        }
    }
}

type Cursor = Parser<Box<dyn Read + Send>>;

/// Forward-only reference resolver
///
/// Cache reads run concurrently; the scan cursor is advanced by one caller
/// at a time.
pub struct ReferenceStore {
    cache: RwLock<HashMap<ObjectKey, Entry>>,
    cursor: Mutex<Cursor>,
}

impl ReferenceStore {
    pub fn new(stream: impl Read + Send + 'static) -> Self {
        let stream: Box<dyn Read + Send> = Box::new(stream);
        Self {
            cache: RwLock::new(HashMap::new()),
            cursor: Mutex::new(Parser::new(stream)),
        }
    }

    /// Resolve a (value, uuid) pair, empty strings when absent
    pub fn resolve_referenced(&self, kind: ObjectType, ids: &[i32]) -> (String, String) {
        let Some(key) = lookup_key(kind, ids) else {
            return (String::new(), String::new());
        };
        match self.lookup(key) {
            Some(Entry::Referenced { value, uuid }) => (value, uuid),
            Some(Entry::Value(value)) => (value, String::new()),
            None => (String::new(), String::new()),
        }
    }

    /// Resolve a scalar value, empty string when absent
    pub fn resolve_value(&self, kind: ObjectType, ids: &[i32]) -> String {
        let Some(key) = lookup_key(kind, ids) else {
            return String::new();
        };
        self.lookup(key)
            .map(|entry| entry.value().to_string())
            .unwrap_or_default()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached(&self, key: &ObjectKey) -> Option<Entry> {
        self.cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn lookup(&self, key: ObjectKey) -> Option<Entry> {
        if let Some(entry) = self.cached(&key) {
            return Some(entry);
        }

        let mut cursor = self.cursor.lock().unwrap_or_else(|e| e.into_inner());
        // Another caller may have scanned past the key while we waited
        if let Some(entry) = self.cached(&key) {
            return Some(entry);
        }

        loop {
            let node = match cursor.next_node() {
                Ok(Some((node, _))) => node,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read object dictionary");
                    break;
                }
            };
            let Some((found, entry)) = classify(&node) else {
                continue;
            };
            let hit = found == key;
            self.cache
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .insert(found, entry.clone());
            if hit {
                return Some(entry);
            }
        }

        tracing::warn!(
            kind = ?key.kind,
            id = key.id,
            sub_id = key.sub_id,
            "unresolved object reference"
        );
        None
    }
}

fn lookup_key(kind: ObjectType, ids: &[i32]) -> Option<ObjectKey> {
    match ids {
        [] | [0] => None,
        _ => Some(ObjectKey::new(kind, ids)),
    }
}

/// Key and entry defined by one dictionary record
fn classify(node: &Node) -> Option<(ObjectKey, Entry)> {
    let kind = ObjectType::from_code(node.int(0))?;
    let parsed = match kind {
        ObjectType::Users | ObjectType::Metadata | ObjectType::SessionDataSeparator => (
            ObjectKey::new(kind, &[node.int(3)]),
            Entry::Referenced {
                value: node.get(2).to_string(),
                uuid: node.get(1).to_string(),
            },
        ),
        ObjectType::SessionDataSeparatorValue => (
            ObjectKey::new(kind, &[node.int(2), node.int(3)]),
            Entry::Value(node.get_path(&[1, 1]).to_string()),
        ),
        _ => (
            ObjectKey::new(kind, &[node.int(2)]),
            Entry::Value(node.get(1).to_string()),
        ),
    };
    Some(parsed)
}

#[cfg(test)]
#[path = "objects_tests.rs"]
mod tests;
