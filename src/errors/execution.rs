// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;
use thiserror::Error;

/// Failures coming back across the invoke boundary.
///
/// None of these are retried by the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The invocation did not finish within the per-call timeout.
    #[error("Invocation timed out after {0:?}")]
    Timeout(Duration),

    /// The invoker itself failed (missing interpreter, crashed sandbox, ...).
    #[error("Invocation failed: {0}")]
    Invoke(String),

    /// The unit ran and reported an error in its result.
    #[error("Unit reported error (status {status}): {message}")]
    UnitReported { status: u16, message: String },

    /// The spawned invocation task panicked or was aborted.
    #[error("Invocation task failed: {0}")]
    TaskFailed(String),
}
