// SPDX-License-Identifier: MIT OR Apache-2.0
//! Section-stack bookkeeping shared by reporters via composition.

use crate::{SectionInfo, TestCaseInfo};

/// Tracks the current test case and the stack of active sections.
///
/// Reporters embed one of these and feed it from their hooks; the
/// runner's nesting guarantee keeps it consistent. The outermost
/// section is the test case itself, so [`RunState::sections`] is
/// non-empty whenever an assertion is being processed.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    current_test_case: Option<TestCaseInfo>,
    sections: Vec<SectionInfo>,
}

impl RunState {
    /// Empty state, before any test case has started.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record entry into a test case.
    pub fn test_case_starting(&mut self, test_case: &TestCaseInfo) {
        self.current_test_case = Some(test_case.clone());
    }

    /// Record the end of the current test case, clearing any sections
    /// left on the stack.
    pub fn test_case_ended(&mut self) {
        self.current_test_case = None;
        self.sections.clear();
    }

    /// Push a section onto the stack.
    pub fn section_starting(&mut self, section: &SectionInfo) {
        self.sections.push(section.clone());
    }

    /// Pop the innermost section, returning it if the stack was
    /// non-empty.
    pub fn section_ended(&mut self) -> Option<SectionInfo> {
        self.sections.pop()
    }

    /// The test case currently executing, if any.
    #[must_use]
    pub fn current_test_case(&self) -> Option<&TestCaseInfo> {
        self.current_test_case.as_ref()
    }

    /// Active sections, outermost first.
    #[must_use]
    pub fn sections(&self) -> &[SectionInfo] {
        &self.sections
    }

    /// Current nesting depth (the test-case-level section counts).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.sections.len()
    }
}
