// SPDX-License-Identifier: MIT OR Apache-2.0
//! testwire-teamcity
//!
//! Renders test lifecycle events as TeamCity service messages.
//!
//! The reporter is driven entirely by runner callbacks on one thread.
//! Each protocol line is written and flushed as a complete unit within
//! the hook call that produced it; failure diagnostics additionally
//! get a plain-text header (once per section entry) meant for humans
//! scanning the raw CI log rather than for the parser.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::io::Write;

use testwire_events::{
    AssertionInfo, AssertionStats, GroupInfo, GroupStats, ReportError, Reporter,
    ReporterPreferences, ResultKind, RunState, SectionInfo, TestCaseInfo, TestCaseStats,
};
use testwire_protocol::{ServiceMessage, names};

mod header;

/// Registry key for this reporter.
pub const REPORTER_NAME: &str = "teamcity";

/// Human-readable summary for registry listings.
pub const DESCRIPTION: &str = "Reports test results as TeamCity service messages";

/// Fixed separator closing every failure-message body.
const FAILURE_RULE: &str = "---------------------------------------";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Rendering options for [`TeamCityReporter`].
#[derive(Debug, Clone)]
pub struct TeamCityConfig {
    /// Column budget for header rules and name wrapping.
    pub console_width: usize,
}

impl TeamCityConfig {
    /// Defaults: 80-column console.
    #[must_use]
    pub fn new() -> Self {
        Self { console_width: 80 }
    }

    /// Override the console width.
    #[must_use]
    pub fn with_console_width(mut self, width: usize) -> Self {
        self.console_width = width;
        self
    }
}

impl Default for TeamCityConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

/// Streams test results as `##teamcity[...]` service messages.
///
/// One instance covers exactly one run. The runner hands over the
/// output stream at construction and drives the instance through the
/// [`Reporter`] hooks in nested order; the reporter keeps no state
/// beyond the section stack and the per-section header budget.
pub struct TeamCityReporter<W> {
    out: W,
    config: TeamCityConfig,
    state: RunState,
    header_printed_for_this_section: bool,
}

impl<W: Write> TeamCityReporter<W> {
    /// Reporter over `out` with default configuration.
    pub fn new(out: W) -> Self {
        Self::with_config(out, TeamCityConfig::default())
    }

    /// Reporter over `out` with explicit configuration.
    pub fn with_config(out: W, config: TeamCityConfig) -> Self {
        Self {
            out,
            config,
            state: RunState::new(),
            header_printed_for_this_section: false,
        }
    }

    /// Consume the reporter and hand back the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, message: &ServiceMessage) -> Result<(), ReportError> {
        self.out.write_all(message.encode().as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn current_test_name(&self) -> String {
        self.state
            .current_test_case()
            .map(|tc| tc.name.clone())
            .unwrap_or_default()
    }
}

impl<W: Write> Reporter for TeamCityReporter<W> {
    fn preferences(&self) -> ReporterPreferences {
        ReporterPreferences {
            redirect_stdout: true,
        }
    }

    fn group_starting(&mut self, group: &GroupInfo) -> Result<(), ReportError> {
        self.emit(&ServiceMessage::new(names::TEST_SUITE_STARTED).attr("name", &group.name))
    }

    fn group_ended(&mut self, stats: &GroupStats) -> Result<(), ReportError> {
        self.emit(&ServiceMessage::new(names::TEST_SUITE_FINISHED).attr("name", &stats.info.name))
    }

    fn test_case_starting(&mut self, test_case: &TestCaseInfo) -> Result<(), ReportError> {
        self.state.test_case_starting(test_case);
        self.emit(&ServiceMessage::new(names::TEST_STARTED).attr("name", &test_case.name))
    }

    fn test_case_ended(&mut self, stats: &TestCaseStats) -> Result<(), ReportError> {
        if !stats.stdout.is_empty() {
            self.emit(
                &ServiceMessage::new(names::TEST_STD_OUT)
                    .attr("name", &stats.info.name)
                    .attr("out", &stats.stdout),
            )?;
        }
        if !stats.stderr.is_empty() {
            self.emit(
                &ServiceMessage::new(names::TEST_STD_ERR)
                    .attr("name", &stats.info.name)
                    .attr("out", &stats.stderr),
            )?;
        }
        self.emit(&ServiceMessage::new(names::TEST_FINISHED).attr("name", &stats.info.name))?;
        self.state.test_case_ended();
        Ok(())
    }

    fn section_starting(&mut self, section: &SectionInfo) -> Result<(), ReportError> {
        // One header budget per section entry.
        self.header_printed_for_this_section = false;
        self.state.section_starting(section);
        Ok(())
    }

    fn section_ended(&mut self, _section: &SectionInfo) -> Result<(), ReportError> {
        self.state.section_ended();
        Ok(())
    }

    fn assertion_starting(&mut self, _info: &AssertionInfo) -> Result<(), ReportError> {
        // Nothing to say until the outcome is known.
        Ok(())
    }

    fn assertion_ended(&mut self, stats: &AssertionStats) -> Result<(), ReportError> {
        if !stats.kind.is_failure() {
            return Ok(());
        }

        if !self.header_printed_for_this_section {
            let name = self.current_test_name();
            header::print(
                &mut self.out,
                &name,
                self.state.sections(),
                self.config.console_width,
            )?;
            self.out.flush()?;
        }
        self.header_printed_for_this_section = true;

        let body = failure_message(stats)?;
        let name = self.current_test_name();
        self.emit(
            &ServiceMessage::new(names::TEST_FAILED)
                .attr("name", name)
                .attr("message", body),
        )
    }
}

// ---------------------------------------------------------------------------
// Failure rendering
// ---------------------------------------------------------------------------

/// Compose the multi-line body of a `testFailed` message.
///
/// Layout: kind phrase, optional attached messages (quoted, indented),
/// optional expression with its expansion, source location, closing
/// separator. The caller escapes the whole body as one attribute
/// value.
///
/// # Errors
///
/// [`ReportError::ResultKindContract`] if `stats.kind` is not a
/// failure kind — the event source broke the hook contract.
pub fn failure_message(stats: &AssertionStats) -> Result<String, ReportError> {
    let mut body = String::from(failure_phrase(stats.kind)?);

    match stats.messages.len() {
        0 => {}
        1 => body.push_str(" with message:"),
        _ => body.push_str(" with messages:"),
    }
    for message in &stats.messages {
        body.push_str("\n  \"");
        body.push_str(message);
        body.push('"');
    }

    if let Some(expression) = &stats.expression {
        body.push_str("\n  ");
        body.push_str(&expression.original);
        body.push_str("\nwith expansion:\n  ");
        body.push_str(&expression.expanded);
        body.push('\n');
    }

    body.push('\n');
    if let Some(location) = &stats.location {
        body.push_str(&location.to_string());
    }
    body.push('\n');
    body.push_str(FAILURE_RULE);
    Ok(body)
}

/// Exhaustive kind → phrase mapping with a fatal arm for benign kinds.
fn failure_phrase(kind: ResultKind) -> Result<&'static str, ReportError> {
    match kind {
        ResultKind::ExpressionFailed => Ok("expression failed"),
        ResultKind::ThrewException => Ok("unexpected exception"),
        ResultKind::FatalErrorCondition => Ok("fatal error condition"),
        ResultKind::DidntThrowException => Ok("no exception was thrown where one was expected"),
        ResultKind::ExplicitFailure => Ok("explicit failure"),
        // Guarded out by `is_failure` in `assertion_ended`; reaching
        // here means the event source is feeding benign results into
        // the failure path.
        ResultKind::Ok | ResultKind::Info | ResultKind::Warning => {
            tracing::error!(
                target: "testwire.teamcity",
                kind = %kind,
                "benign result kind on the failure path"
            );
            Err(ReportError::ResultKindContract(kind))
        }
    }
}
