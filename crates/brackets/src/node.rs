// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generic positional record tree

use std::fmt;

static EMPTY: Node = Node { fields: Vec::new() };

/// A single positional field: either a scalar or a nested node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Node(Node),
}

/// A bracketed record with positional fields
///
/// Accessors never fail: a missing position or a field of the wrong shape
/// reads as an empty string, an empty node, or zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    fields: Vec<Value>,
}

impl Node {
    pub fn new(fields: Vec<Value>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    /// Scalar field at `index`, or `""`
    pub fn get(&self, index: usize) -> &str {
        match self.fields.get(index) {
            Some(Value::Scalar(s)) => s,
            _ => "",
        }
    }

    /// Scalar field reached by descending through nested nodes
    ///
    /// `get_path(&[1, 2])` is field 2 of the node at field 1.
    pub fn get_path(&self, path: &[usize]) -> &str {
        match path.split_last() {
            Some((last, parents)) => parents
                .iter()
                .fold(self, |node, &i| node.node(i))
                .get(*last),
            None => "",
        }
    }

    /// Nested node at `index`, or an empty node
    pub fn node(&self, index: usize) -> &Node {
        match self.fields.get(index) {
            Some(Value::Node(n)) => n,
            _ => &EMPTY,
        }
    }

    pub fn int(&self, index: usize) -> i32 {
        self.get(index).trim().parse().unwrap_or(0)
    }

    pub fn int64(&self, index: usize) -> i64 {
        self.get(index).trim().parse().unwrap_or(0)
    }

    /// `1` and `true` (any case) are true, everything else is false
    pub fn bool(&self, index: usize) -> bool {
        let raw = self.get(index).trim();
        raw == "1" || raw.eq_ignore_ascii_case("true")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", field)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Node(n) => write!(f, "{}", n),
            Value::Scalar(s) if is_bare(s) => write!(f, "{}", s),
            Value::Scalar(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
        }
    }
}

fn is_bare(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'.' | b'_' | b'$'))
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<Node> for Value {
    fn from(n: Node) -> Self {
        Value::Node(n)
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
