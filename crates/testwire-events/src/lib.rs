// SPDX-License-Identifier: MIT OR Apache-2.0
//! testwire-events
//!
//! The stable contract between a test runner and its reporters.
//!
//! The runner drives reporters through the [`Reporter`] hook trait (or
//! equivalently through [`dispatch`] with a [`LifecycleEvent`] value),
//! firing hooks in well-nested order: group ⊇ test case ⊇ section ⊇
//! assertion. Reporters that need the active section stack compose a
//! [`RunState`] instead of inheriting shared behavior.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::fmt;

mod error;
mod reporter;
mod state;

pub use error::ReportError;
pub use reporter::{Reporter, ReporterPreferences, dispatch};
pub use state::RunState;

// ---------------------------------------------------------------------------
// Source locations
// ---------------------------------------------------------------------------

/// Position of a test case, section, or assertion in the source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Path of the source file, as reported by the runner.
    pub file: String,
    /// 1-based line number.
    pub line: u64,
}

impl SourceLocation {
    /// Build a location from a file path and line number.
    pub fn new(file: impl Into<String>, line: u64) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// True when the runner had no location to report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

// ---------------------------------------------------------------------------
// Result kinds
// ---------------------------------------------------------------------------

/// Tag classifying an assertion outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// The assertion passed.
    Ok,
    /// Informational message attached to the run, not a check.
    Info,
    /// Non-fatal warning attached to the run.
    Warning,
    /// The asserted expression evaluated to false.
    ExpressionFailed,
    /// An exception escaped where none was expected.
    ThrewException,
    /// A fatal error condition (signal, structured exception) fired.
    FatalErrorCondition,
    /// An expected exception never materialized.
    DidntThrowException,
    /// The test called an explicit-failure macro.
    ExplicitFailure,
}

impl ResultKind {
    /// Whether this kind counts as a test failure.
    ///
    /// `Ok`, `Info`, and `Warning` are benign; everything else fails
    /// the surrounding test case.
    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Self::ExpressionFailed
                | Self::ThrewException
                | Self::FatalErrorCondition
                | Self::DidntThrowException
                | Self::ExplicitFailure
        )
    }

    /// Stable `snake_case` name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::ExpressionFailed => "expression_failed",
            Self::ThrewException => "threw_exception",
            Self::FatalErrorCondition => "fatal_error_condition",
            Self::DidntThrowException => "didnt_throw_exception",
            Self::ExplicitFailure => "explicit_failure",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Event payloads
// ---------------------------------------------------------------------------

/// A named group of test cases (rendered as a suite).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Group name as chosen by the runner.
    pub name: String,
}

impl GroupInfo {
    /// Build a group descriptor.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Aggregate payload delivered when a group finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    /// The group that finished.
    pub info: GroupInfo,
}

/// A single test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseInfo {
    /// Full test-case name, including any parametrization suffix.
    pub name: String,
}

impl TestCaseInfo {
    /// Build a test-case descriptor.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Payload delivered when a test case finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseStats {
    /// The test case that finished.
    pub info: TestCaseInfo,
    /// Standard output captured while the case ran, empty if none (or
    /// if the reporter did not ask for redirection).
    #[serde(default)]
    pub stdout: String,
    /// Standard error captured while the case ran, empty if none.
    #[serde(default)]
    pub stderr: String,
}

impl TestCaseStats {
    /// Stats with no captured output.
    pub fn new(info: TestCaseInfo) -> Self {
        Self {
            info,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// A named, nestable scope within a test case.
///
/// The runner enters the test case itself as the outermost section, so
/// the stack is never empty while assertions are being processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    /// Section name.
    pub name: String,
    /// Where the section was declared, if known.
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl SectionInfo {
    /// Section with no source location.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }

    /// Attach a source location.
    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// Captured expression text for an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionInfo {
    /// The expression as written in the test source.
    pub original: String,
    /// The expression with operands expanded to their runtime values.
    pub expanded: String,
}

impl ExpressionInfo {
    /// Build an expression pair.
    pub fn new(original: impl Into<String>, expanded: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            expanded: expanded.into(),
        }
    }
}

/// Payload delivered when an assertion is about to be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionInfo {
    /// The expression as written in the test source; empty for
    /// assertions that carry none (explicit failures, messages).
    #[serde(default)]
    pub expression: String,
    /// Where the assertion sits, if known.
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl AssertionInfo {
    /// Assertion descriptor with no source location.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            location: None,
        }
    }

    /// Attach a source location.
    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// Payload delivered when an assertion completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionStats {
    /// Outcome classification.
    pub kind: ResultKind,
    /// Captured expression, if the assertion carried one.
    #[serde(default)]
    pub expression: Option<ExpressionInfo>,
    /// Where the assertion fired, if known.
    #[serde(default)]
    pub location: Option<SourceLocation>,
    /// Informational messages attached via scoped-message macros.
    #[serde(default)]
    pub messages: Vec<String>,
}

impl AssertionStats {
    /// Assertion with just an outcome.
    pub fn new(kind: ResultKind) -> Self {
        Self {
            kind,
            expression: None,
            location: None,
            messages: Vec::new(),
        }
    }

    /// Attach the captured expression.
    #[must_use]
    pub fn with_expression(mut self, expression: ExpressionInfo) -> Self {
        self.expression = Some(expression);
        self
    }

    /// Attach the source location.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Append an informational message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }
}

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Tagged union over everything a runner can tell a reporter.
///
/// Serializes with a `t` tag so event streams can be captured as JSONL
/// and replayed against a reporter later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The runner's test-spec filter matched nothing.
    NoMatchingTestCases {
        /// The filter expression that came up empty.
        spec: String,
    },

    /// A group of test cases is about to run.
    GroupStarting {
        /// The group being entered.
        group: GroupInfo,
    },

    /// A group of test cases finished.
    GroupEnded {
        /// Aggregate results for the group.
        stats: GroupStats,
    },

    /// A test case is about to run.
    TestCaseStarting {
        /// The test case being entered.
        test_case: TestCaseInfo,
    },

    /// A test case finished, with any captured output.
    TestCaseEnded {
        /// Results and captured streams for the case.
        stats: TestCaseStats,
    },

    /// A section scope was entered (the test case itself counts as the
    /// outermost section).
    SectionStarting {
        /// The section being entered.
        section: SectionInfo,
    },

    /// A section scope was exited.
    SectionEnded {
        /// The section being left.
        section: SectionInfo,
    },

    /// An assertion is about to be evaluated.
    AssertionStarting {
        /// The assertion being entered.
        info: AssertionInfo,
    },

    /// An assertion completed.
    AssertionEnded {
        /// Outcome and captured detail.
        stats: AssertionStats,
    },
}
