// SPDX-License-Identifier: MIT OR Apache-2.0
//! testwire-protocol
//!
//! Wire format for CI service messages.
//! Current transport: `##teamcity[...]` lines over the runner's output
//! stream, one self-contained message per line.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// Message names recognized by the CI log parser.
pub mod names {
    //! The seven message names this protocol emits. Names and
    //! attribute keys go on the wire verbatim; only attribute values
    //! are escaped.

    /// A group of test cases started.
    pub const TEST_SUITE_STARTED: &str = "testSuiteStarted";
    /// A group of test cases finished.
    pub const TEST_SUITE_FINISHED: &str = "testSuiteFinished";
    /// A test case started.
    pub const TEST_STARTED: &str = "testStarted";
    /// A test case finished.
    pub const TEST_FINISHED: &str = "testFinished";
    /// Stdout captured while a test case ran.
    pub const TEST_STD_OUT: &str = "testStdOut";
    /// Stderr captured while a test case ran.
    pub const TEST_STD_ERR: &str = "testStdErr";
    /// A test case failed.
    pub const TEST_FAILED: &str = "testFailed";
}

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Escape text for use as a service-message attribute value.
///
/// The protocol defines an ordered substitution table: `|` doubles to
/// `||`, then `'` becomes `|'`, newline `|n`, carriage-return `|r`,
/// `[` becomes `|[`, and `]` becomes `|]`.
///
/// The `|` rule comes first so markers produced by later rules are
/// never re-escaped; because no rule's output contains another source
/// character, a single left-to-right pass realizes the same rewrite.
/// Total over any text — characters outside the table, control
/// characters included, pass through unchanged.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '|' => escaped.push_str("||"),
            '\'' => escaped.push_str("|'"),
            '\n' => escaped.push_str("|n"),
            '\r' => escaped.push_str("|r"),
            '[' => escaped.push_str("|["),
            ']' => escaped.push_str("|]"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Exact inverse of [`escape`].
///
/// # Errors
///
/// Returns [`ProtocolError::UnknownEscape`] for a `|` followed by a
/// character outside the table, and [`ProtocolError::DanglingEscape`]
/// for a `|` at the end of input.
pub fn unescape(text: &str) -> Result<String, ProtocolError> {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '|' {
            plain.push(ch);
            continue;
        }
        match chars.next() {
            Some('|') => plain.push('|'),
            Some('\'') => plain.push('\''),
            Some('n') => plain.push('\n'),
            Some('r') => plain.push('\r'),
            Some('[') => plain.push('['),
            Some(']') => plain.push(']'),
            Some(other) => return Err(ProtocolError::UnknownEscape(other)),
            None => return Err(ProtocolError::DanglingEscape),
        }
    }
    Ok(plain)
}

/// Errors arising from decoding escaped attribute values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// A `|` introduced an escape pair outside the substitution table.
    #[error("unknown escape sequence `|{0}`")]
    UnknownEscape(char),

    /// The input ended in the middle of an escape pair.
    #[error("dangling `|` at end of input")]
    DanglingEscape,
}

// ---------------------------------------------------------------------------
// ServiceMessage
// ---------------------------------------------------------------------------

/// One service message: a name plus ordered key/value attributes.
///
/// Attribute values are stored raw and escaped on [`encode`]
/// (`ServiceMessage::encode`); names and keys are emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMessage {
    name: String,
    attrs: Vec<(String, String)>,
}

impl ServiceMessage {
    /// Start a message with the given name and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Append an attribute. Attributes keep insertion order on the
    /// wire.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Message name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in insertion order, values unescaped.
    #[must_use]
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Serialize to one complete, newline-terminated wire line:
    /// `##teamcity[<name> key='value' ...]\n`.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut line = String::from("##teamcity[");
        line.push_str(&self.name);
        for (key, value) in &self.attrs {
            line.push(' ');
            line.push_str(key);
            line.push_str("='");
            line.push_str(&escape(value));
            line.push('\'');
        }
        line.push_str("]\n");
        line
    }
}
