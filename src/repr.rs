//! Last-resort text scraping of SDK debug-repr strings.
//!
//! Some backend SDK objects expose content-filter results only through
//! their debug string form, e.g. `content_filter_results={'hate':
//! {'filtered': False, 'severity': 'safe'}, ...}`. This module recovers a
//! structured mapping from that rendering: locate a balanced brace block
//! after a marker, then parse the repr dialect (single-quoted strings,
//! `True`/`False`/`None` in either casing) into a `serde_json::Value`.
//!
//! This is a compatibility shim, not core logic. If a backend starts
//! exposing structured accessors, callers should take that path and never
//! reach this module.

use serde_json::{Map, Number, Value};

/// Extract the balanced `{...}` block starting at `open`, which must index
/// a `{` in `text`. Returns the block including both braces.
pub fn balanced_block(text: &str, open: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[open..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Find the first balanced brace block following `marker` in `text`.
pub fn block_after_marker<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let at = text.find(marker)?;
    let rest = &text[at + marker.len()..];
    let rel = rest.find('{')?;
    balanced_block(text, at + marker.len() + rel)
}

/// Parse a repr-dialect literal mapping. Returns `None` for anything that
/// is not a well-formed mapping; never panics.
pub fn parse_literal_map(text: &str) -> Option<Value> {
    let mut p = Parser {
        bytes: text.as_bytes(),
        pos: 0,
    };
    p.skip_ws();
    let value = p.parse_value()?;
    p.skip_ws();
    if p.pos != p.bytes.len() {
        return None;
    }
    value.is_object().then_some(value)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        self.skip_ws();
        match self.peek()? {
            b'{' => self.parse_map(),
            b'[' | b'(' => self.parse_list(),
            b'\'' | b'"' => self.parse_string().map(Value::String),
            b't' | b'T' | b'f' | b'F' | b'n' | b'N' => self.parse_word(),
            _ => self.parse_number(),
        }
    }

    fn parse_map(&mut self) -> Option<Value> {
        if !self.eat(b'{') {
            return None;
        }
        let mut map = Map::new();
        self.skip_ws();
        if self.eat(b'}') {
            return Some(Value::Object(map));
        }
        loop {
            self.skip_ws();
            let key = self.parse_string()?;
            self.skip_ws();
            if !self.eat(b':') {
                return None;
            }
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            if self.eat(b'}') {
                return Some(Value::Object(map));
            }
            return None;
        }
    }

    fn parse_list(&mut self) -> Option<Value> {
        let close = if self.eat(b'[') {
            b']'
        } else if self.eat(b'(') {
            b')'
        } else {
            return None;
        };
        let mut items = Vec::new();
        self.skip_ws();
        if self.eat(close) {
            return Some(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            self.skip_ws();
            if self.eat(b',') {
                self.skip_ws();
                // Tolerate trailing comma (single-element tuple reprs)
                if self.eat(close) {
                    return Some(Value::Array(items));
                }
                continue;
            }
            if self.eat(close) {
                return Some(Value::Array(items));
            }
            return None;
        }
    }

    fn parse_string(&mut self) -> Option<String> {
        let quote = self.peek()?;
        if quote != b'\'' && quote != b'"' {
            return None;
        }
        self.pos += 1;
        let mut out: Vec<u8> = Vec::new();
        loop {
            let b = self.peek()?;
            self.pos += 1;
            match b {
                b'\\' => {
                    let esc = self.peek()?;
                    self.pos += 1;
                    match esc {
                        b'n' => out.push(b'\n'),
                        b't' => out.push(b'\t'),
                        b'r' => out.push(b'\r'),
                        other => out.push(other),
                    }
                }
                _ if b == quote => return String::from_utf8(out).ok(),
                _ => out.push(b),
            }
        }
    }

    fn parse_word(&mut self) -> Option<Value> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let word = std::str::from_utf8(&self.bytes[start..self.pos]).ok()?;
        match word.to_ascii_lowercase().as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            "none" | "null" => Some(Value::Null),
            _ => None,
        }
    }

    fn parse_number(&mut self) -> Option<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                b'0'..=b'9' => self.pos += 1,
                b'.' | b'e' | b'E' => {
                    is_float = true;
                    self.pos += 1;
                }
                b'-' | b'+' if is_float => self.pos += 1,
                _ => break,
            }
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos]).ok()?;
        if text.is_empty() || text == "-" || text == "+" {
            return None;
        }
        if is_float {
            Number::from_f64(text.parse::<f64>().ok()?).map(Value::Number)
        } else {
            text.parse::<i64>().ok().map(|n| Value::Number(n.into()))
        }
    }
}
