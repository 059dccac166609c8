// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CSV record scanning and field parsing for code tables
//!
//! Scans table text line by line and splits records into typed fields.
//! The grammar is deliberately small: comma-separated fields, optional
//! `"`-quoting with `""` escapes, `#` comment lines, blank lines ignored.

use egress_model::{EvalError, Result};
use memchr::memchr;
use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, space0},
    multi::separated_list0,
    IResult, Parser,
};
use std::borrow::Cow;

/// Iterator over data records, skipping blank and comment lines
///
/// Yields `(line_number, record)` with 1-based line numbers so loader
/// errors point at the right place in the source text.
pub struct RecordScanner<'a> {
    content: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> RecordScanner<'a> {
    /// Create a scanner over table text
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            pos: 0,
            line: 0,
        }
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.content.as_bytes();
        while self.pos < bytes.len() {
            // Use memchr for fast newline search
            let end = match memchr(b'\n', &bytes[self.pos..]) {
                Some(i) => self.pos + i,
                None => bytes.len(),
            };
            let raw = &self.content[self.pos..end];
            self.pos = end + 1;
            self.line += 1;

            let record = raw.trim();
            if record.is_empty() || record.starts_with('#') {
                continue;
            }
            return Some((self.line, record));
        }
        None
    }
}

// ============================================================================
// Field Parsing
// ============================================================================

/// Parse an unquoted field (everything up to the next comma, trimmed)
fn bare_field(input: &str) -> IResult<&str, Cow<'_, str>> {
    let (input, s) = take_while(|c: char| c != ',')(input)?;
    Ok((input, Cow::Borrowed(s.trim())))
}

/// Parse a quoted field (`"text"` with `""` for escaped quotes)
fn quoted_field(input: &str) -> IResult<&str, Cow<'_, str>> {
    let (input, _) = space0(input)?;
    let (input, _) = char('"')(input)?;

    // Find the end of the field, handling escaped quotes ("")
    let bytes = input.as_bytes();
    let mut end = 0;
    let mut escaped = false;
    while end < bytes.len() {
        if bytes[end] == b'"' {
            if end + 1 < bytes.len() && bytes[end + 1] == b'"' {
                escaped = true;
                end += 2;
                continue;
            }
            break;
        }
        end += 1;
    }
    if end >= bytes.len() {
        // Unterminated quote
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }

    let content = &input[..end];
    let remaining = &input[end + 1..];
    let (remaining, _) = space0(remaining)?;

    let value = if escaped {
        Cow::Owned(content.replace("\"\"", "\""))
    } else {
        Cow::Borrowed(content)
    };
    Ok((remaining, value))
}

/// Parse any field
fn field(input: &str) -> IResult<&str, Cow<'_, str>> {
    alt((quoted_field, bare_field)).parse(input)
}

/// Split a record into fields
///
/// Returns `None` when the record is malformed (e.g. trailing characters
/// after a closing quote).
fn split_record(record: &str) -> Option<Vec<Cow<'_, str>>> {
    match separated_list0(char(','), field).parse(record) {
        Ok(("", fields)) => Some(fields),
        _ => None,
    }
}

/// One parsed record with typed sequential field access
pub struct Record<'a> {
    line: usize,
    fields: Vec<Cow<'a, str>>,
    next: usize,
}

impl<'a> Record<'a> {
    /// Parse a record into fields
    pub fn parse(line: usize, record: &'a str) -> Result<Self> {
        let fields = split_record(record)
            .ok_or_else(|| EvalError::table(line, "malformed record"))?;
        Ok(Self {
            line,
            fields,
            next: 0,
        })
    }

    /// Source line of this record
    pub fn line(&self) -> usize {
        self.line
    }

    /// Verify the field count
    pub fn expect_len(&self, n: usize) -> Result<()> {
        if self.fields.len() != n {
            return Err(EvalError::table(
                self.line,
                format!("expected {} fields, found {}", n, self.fields.len()),
            ));
        }
        Ok(())
    }

    /// Take the next field as a non-empty string
    pub fn next_str(&mut self) -> Result<&str> {
        let i = self.next;
        self.next += 1;
        match self.fields.get(i) {
            Some(f) if !f.is_empty() => Ok(f.as_ref()),
            Some(_) => Err(EvalError::table(self.line, format!("field {} is empty", i + 1))),
            None => Err(EvalError::table(self.line, format!("missing field {}", i + 1))),
        }
    }

    /// Take the next field as an f64
    pub fn next_f64(&mut self) -> Result<f64> {
        let line = self.line;
        let s = self.next_str()?;
        lexical_core::parse(s.as_bytes())
            .map_err(|_| EvalError::table(line, format!("invalid number {:?}", s)))
    }

    /// Take the next field as a u32
    pub fn next_u32(&mut self) -> Result<u32> {
        let line = self.line;
        let s = self.next_str()?;
        lexical_core::parse(s.as_bytes())
            .map_err(|_| EvalError::table(line, format!("invalid integer {:?}", s)))
    }
}
