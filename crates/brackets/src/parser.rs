// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental record parser over a byte stream
//!
//! The parser buffers raw bytes and only hands out complete records. A
//! record cut off at the end of the stream is kept buffered and retried once
//! more bytes arrive, which is what makes tailing a growing file safe.

use super::node::{Node, Value};
use std::io::{self, Read};

const CHUNK_SIZE: usize = 64 * 1024;

/// Forward-only record parser
pub struct Parser<R> {
    inner: R,
    buf: Vec<u8>,
    /// Start of unconsumed bytes in `buf`
    pos: usize,
}

impl<R: Read> Parser<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
        }
    }

    /// Parse the next complete record
    ///
    /// Returns the record and the number of bytes it consumed, including any
    /// separators or header text skipped before its opening bracket. Returns
    /// `None` when the stream holds no further complete record; nothing is
    /// consumed in that case.
    pub fn next_node(&mut self) -> io::Result<Option<(Node, usize)>> {
        loop {
            if let Some((node, len)) = parse_node(&self.buf[self.pos..]) {
                self.pos += len;
                return Ok(Some((node, len)));
            }
            if self.fill()? == 0 {
                return Ok(None);
            }
        }
    }

    /// Drop buffered bytes
    ///
    /// Call after repositioning the underlying stream.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.pos = 0;
    }

    /// Number of bytes read from the stream but not yet consumed
    pub fn buffered(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self) -> io::Result<usize> {
        if self.pos > 0 {
            self.buf.drain(..self.pos);
            self.pos = 0;
        }

        let start = self.buf.len();
        self.buf.resize(start + CHUNK_SIZE, 0);
        let read = loop {
            match self.inner.read(&mut self.buf[start..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buf.truncate(start);
                    return Err(e);
                }
            }
        };
        self.buf.truncate(start + read);
        Ok(read)
    }
}

/// Parse one record from the front of `input`
///
/// Bytes before the first `{` are skipped and counted in the returned
/// length. Returns `None` when `input` does not hold a complete record.
pub fn parse_node(input: &[u8]) -> Option<(Node, usize)> {
    let start = input.iter().position(|&b| b == b'{')?;
    let mut cursor = Cursor {
        input,
        pos: start + 1,
    };
    let node = cursor.node_body()?;
    Some((node, cursor.pos))
}

struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    /// Fields up to and including the closing bracket
    fn node_body(&mut self) -> Option<Node> {
        let mut fields = Vec::new();

        self.skip_whitespace();
        if self.peek()? == b'}' {
            self.pos += 1;
            return Some(Node::new(fields));
        }

        loop {
            fields.push(self.value()?);
            self.skip_whitespace();
            loop {
                match self.peek()? {
                    b',' => {
                        self.pos += 1;
                        break;
                    }
                    b'}' => {
                        self.pos += 1;
                        return Some(Node::new(fields));
                    }
                    // Stray bytes after a closed value
                    _ => self.pos += 1,
                }
            }
        }
    }

    fn value(&mut self) -> Option<Value> {
        self.skip_whitespace();
        match self.peek()? {
            b'{' => {
                self.pos += 1;
                self.node_body().map(Value::Node)
            }
            b'"' => self.quoted().map(Value::Scalar),
            _ => self.bare().map(Value::Scalar),
        }
    }

    fn quoted(&mut self) -> Option<String> {
        self.pos += 1;
        let mut bytes = Vec::new();
        loop {
            let b = self.peek()?;
            self.pos += 1;
            if b != b'"' {
                bytes.push(b);
                continue;
            }
            // A doubled quote is an escaped quote; need one more byte to tell
            if self.peek()? == b'"' {
                bytes.push(b'"');
                self.pos += 1;
            } else {
                return Some(String::from_utf8_lossy(&bytes).into_owned());
            }
        }
    }

    fn bare(&mut self) -> Option<String> {
        let start = self.pos;
        while !matches!(self.peek()?, b',' | b'}') {
            self.pos += 1;
        }
        let raw = String::from_utf8_lossy(&self.input[start..self.pos]);
        Some(raw.trim().to_string())
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
