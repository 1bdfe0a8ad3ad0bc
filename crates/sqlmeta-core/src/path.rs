// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Property path tokenizer.
//!
//! Splits paths such as `arr[0].name` into [`PropertyToken`]s. The earliest
//! of `.` or `[` decides the shape of the current segment:
//!
//! ```text
//! "arr[0].name"  ->  PropertyToken { name: "arr", index: "0", children: "name" }
//!                ->  PropertyToken { name: "name" }                 (terminal)
//! "a.b[k]"       ->  PropertyToken { name: "a", children: "b[k]" }
//! "m[1][2]"      ->  PropertyToken { name: "m", index: "1", children: "[2]" }
//! ```
//!
//! Indexes are opaque text; the property-access layer
//! ([`Value::get_path`](crate::Value::get_path)) decides whether they are list
//! positions or map keys. Tokens expose accessors only and cannot be modified
//! after parsing.

use crate::error::{Error, PathError, Result};

/// One parsed segment of a property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyToken {
    name:         String,
    indexed_name: String,
    index:        Option<String>,
    children:     Option<String>
}

impl PropertyToken {
    /// Parse the first segment of `path`.
    pub fn parse(path: &str) -> Self {
        split(path).0
    }

    /// Base name without index (`arr` for `arr[0]`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name including the index text (`arr[0]`).
    pub fn indexed_name(&self) -> &str {
        &self.indexed_name
    }

    /// Index text between brackets, if the segment is indexed.
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Unparsed remainder after this segment.
    pub fn children(&self) -> Option<&str> {
        self.children.as_deref()
    }

    /// Check if a further segment follows.
    pub const fn has_next(&self) -> bool {
        self.children.is_some()
    }

    /// Parse the segment after this one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPath`] with [`PathError::Exhausted`] when this token is
    /// terminal.
    pub fn next_token(&self) -> Result<PropertyToken> {
        match &self.children {
            Some(rest) => Ok(Self::parse(rest)),
            None => Err(Error::InvalidPath {
                path:   self.indexed_name.clone(),
                reason: PathError::Exhausted
            })
        }
    }
}

/// Split the leading segment off `path`, returning the token and the
/// remainder.
fn split(path: &str) -> (PropertyToken, Option<&str>) {
    let delimiter = path.find(['.', '[']);

    let (token, rest) = match delimiter {
        Some(pos) if path.as_bytes()[pos] == b'[' => {
            let name = &path[..pos];
            let after = &path[pos + 1..];
            let (index, tail) = match after.find(']') {
                Some(close) => (&after[..close], &after[close + 1..]),
                None => (after, "")
            };
            let consumed = path.len() - tail.len();
            let rest = tail.strip_prefix('.').unwrap_or(tail);
            (
                PropertyToken {
                    name:         name.to_owned(),
                    indexed_name: path[..consumed].to_owned(),
                    index:        Some(index.to_owned()),
                    children:     None
                },
                rest
            )
        }
        Some(pos) => (
            PropertyToken {
                name:         path[..pos].to_owned(),
                indexed_name: path[..pos].to_owned(),
                index:        None,
                children:     None
            },
            &path[pos + 1..]
        ),
        None => (
            PropertyToken {
                name:         path.to_owned(),
                indexed_name: path.to_owned(),
                index:        None,
                children:     None
            },
            ""
        )
    };

    let rest = (!rest.is_empty()).then_some(rest);
    (
        PropertyToken {
            children: rest.map(str::to_owned),
            ..token
        },
        rest
    )
}

/// Lazy iterator over the segments of a property path.
///
/// Each call site builds its own tokenizer; iteration ends after the terminal
/// segment.
#[derive(Debug, Clone)]
pub struct PropertyTokenizer<'a> {
    rest: Option<&'a str>
}

impl<'a> PropertyTokenizer<'a> {
    /// Tokenize `path`. An empty path yields no tokens.
    pub fn new(path: &'a str) -> Self {
        Self {
            rest: (!path.is_empty()).then_some(path)
        }
    }
}

impl Iterator for PropertyTokenizer<'_> {
    type Item = PropertyToken;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.rest.take()?;
        let (token, rest) = split(path);
        self.rest = rest;
        Some(token)
    }
}
