// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors a reporter hook can surface to the runner.

use thiserror::Error;

use crate::ResultKind;

/// Failure modes of a [`Reporter`](crate::Reporter) hook.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the runner-owned output stream failed. Propagated
    /// as-is; the reporter does not retry and is not responsible for
    /// stream health.
    #[error("failed to write report output: {0}")]
    Io(#[from] std::io::Error),

    /// A benign result kind reached the failure-rendering path.
    ///
    /// This is a contract violation by the event source. It is fatal
    /// rather than ignorable: swallowing it would hide a real test
    /// failure from CI.
    #[error("result kind `{0}` is not a failure kind; the event source violated the hook contract")]
    ResultKindContract(ResultKind),
}
