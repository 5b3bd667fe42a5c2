// SPDX-License-Identifier: MIT OR Apache-2.0
//! The lifecycle-hook interface reporters implement.
//!
//! The full event surface is defined once, here. Hooks that commonly
//! no-op carry default implementations, so a reporter only overrides
//! the callbacks it cares about; shared behavior such as section-stack
//! maintenance comes from composing a [`RunState`](crate::RunState),
//! not from a base implementation.

use serde::{Deserialize, Serialize};

use crate::{
    AssertionInfo, AssertionStats, GroupInfo, GroupStats, LifecycleEvent, ReportError, SectionInfo,
    TestCaseInfo, TestCaseStats,
};

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Capabilities a reporter requests from the runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterPreferences {
    /// When true, the runner redirects each test case's stdout/stderr
    /// into [`TestCaseStats::stdout`] / [`TestCaseStats::stderr`]
    /// instead of letting it interleave with the report.
    pub redirect_stdout: bool,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Receiver for test-lifecycle events.
///
/// The runner guarantees well-nested call order (group-start ⊇
/// test-case-start ⊇ section-start ⊇ assertion-end ⊇ test-case-end ⊇
/// group-end) and serializes all calls onto one thread; implementations
/// rely on that and perform no ordering enforcement of their own.
///
/// # Errors
///
/// Hooks return [`ReportError`] for stream-write failures and contract
/// violations; the runner decides whether to abort the run.
pub trait Reporter {
    /// Capabilities this reporter wants from the runner. Queried once,
    /// before any events fire.
    fn preferences(&self) -> ReporterPreferences {
        ReporterPreferences::default()
    }

    /// The runner's test filter matched no test cases.
    fn no_matching_test_cases(&mut self, _spec: &str) -> Result<(), ReportError> {
        Ok(())
    }

    /// A group of test cases is starting.
    fn group_starting(&mut self, _group: &GroupInfo) -> Result<(), ReportError> {
        Ok(())
    }

    /// A group of test cases ended.
    fn group_ended(&mut self, _stats: &GroupStats) -> Result<(), ReportError> {
        Ok(())
    }

    /// A test case is starting.
    fn test_case_starting(&mut self, _test_case: &TestCaseInfo) -> Result<(), ReportError> {
        Ok(())
    }

    /// A test case ended, carrying any captured output.
    fn test_case_ended(&mut self, _stats: &TestCaseStats) -> Result<(), ReportError> {
        Ok(())
    }

    /// A section scope was entered.
    fn section_starting(&mut self, _section: &SectionInfo) -> Result<(), ReportError> {
        Ok(())
    }

    /// A section scope was exited.
    fn section_ended(&mut self, _section: &SectionInfo) -> Result<(), ReportError> {
        Ok(())
    }

    /// An assertion is about to be evaluated.
    fn assertion_starting(&mut self, _info: &AssertionInfo) -> Result<(), ReportError> {
        Ok(())
    }

    /// An assertion completed.
    fn assertion_ended(&mut self, _stats: &AssertionStats) -> Result<(), ReportError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Route a [`LifecycleEvent`] value onto the corresponding hook.
///
/// Useful when events arrive as data (a captured stream, a channel)
/// rather than as direct calls.
///
/// # Errors
///
/// Forwards whatever the invoked hook returns.
pub fn dispatch<R>(reporter: &mut R, event: &LifecycleEvent) -> Result<(), ReportError>
where
    R: Reporter + ?Sized,
{
    match event {
        LifecycleEvent::NoMatchingTestCases { spec } => reporter.no_matching_test_cases(spec),
        LifecycleEvent::GroupStarting { group } => reporter.group_starting(group),
        LifecycleEvent::GroupEnded { stats } => reporter.group_ended(stats),
        LifecycleEvent::TestCaseStarting { test_case } => reporter.test_case_starting(test_case),
        LifecycleEvent::TestCaseEnded { stats } => reporter.test_case_ended(stats),
        LifecycleEvent::SectionStarting { section } => reporter.section_starting(section),
        LifecycleEvent::SectionEnded { section } => reporter.section_ended(section),
        LifecycleEvent::AssertionStarting { info } => reporter.assertion_starting(info),
        LifecycleEvent::AssertionEnded { stats } => reporter.assertion_ended(stats),
    }
}
