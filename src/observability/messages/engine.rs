// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for chain evaluation lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Evaluation start, completion and failure
//! * Circuit preflight rejection
//! * Debug introspection

use crate::chain::Mode;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Evaluation of a grouped chain started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_chainwork::chain::Mode;
/// use the_chainwork::observability::messages::engine::EvaluationStarted;
///
/// let msg = EvaluationStarted {
///     mode: Mode::Pipeline,
///     position_count: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct EvaluationStarted {
    pub mode: Mode,
    pub position_count: usize,
}

impl Display for EvaluationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting {} evaluation of {} position(s)",
            self.mode, self.position_count
        )
    }
}

impl StructuredLog for EvaluationStarted {
    fn log(&self) {
        tracing::info!(
            mode = self.mode.as_str(),
            position_count = self.position_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "evaluation",
            span_name = name,
            mode = self.mode.as_str(),
            position_count = self.position_count,
        )
    }
}

/// Evaluation completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_chainwork::chain::Mode;
/// use the_chainwork::observability::messages::engine::EvaluationCompleted;
/// use std::time::Duration;
///
/// let msg = EvaluationCompleted {
///     mode: Mode::Circuit,
///     invocation_count: 5,
///     duration: Duration::from_millis(40),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct EvaluationCompleted {
    pub mode: Mode,
    pub invocation_count: usize,
    pub duration: std::time::Duration,
}

impl Display for EvaluationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} evaluation completed: {} invocation(s) in {:?}",
            self.mode, self.invocation_count, self.duration
        )
    }
}

impl StructuredLog for EvaluationCompleted {
    fn log(&self) {
        tracing::info!(
            mode = self.mode.as_str(),
            invocation_count = self.invocation_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "evaluation_completed",
            span_name = name,
            mode = self.mode.as_str(),
            duration = ?self.duration,
        )
    }
}

/// Evaluation stopped at its first error.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_chainwork::chain::Mode;
/// use the_chainwork::observability::messages::engine::EvaluationFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "unit crashed");
/// let msg = EvaluationFailed {
///     mode: Mode::Pipeline,
///     position: Some(1),
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct EvaluationFailed<'a> {
    pub mode: Mode,
    pub position: Option<usize>,
    pub error: &'a dyn std::error::Error,
}

impl Display for EvaluationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} evaluation failed: {}", self.mode, self.error)
    }
}

impl StructuredLog for EvaluationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            mode = self.mode.as_str(),
            position = self.position,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "evaluation_failed",
            span_name = name,
            mode = self.mode.as_str(),
            position = self.position,
        )
    }
}

/// A circuit was rejected before any invocation because a non-tail unit
/// only supports a single invocation.
///
/// # Log Level
/// `warn!` - The caller built a chain this mode cannot run
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::engine::ChainingRejected;
///
/// let msg = ChainingRejected {
///     index: 0,
///     segment: "word_count",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct ChainingRejected<'a> {
    pub index: usize,
    pub segment: &'a str,
}

impl Display for ChainingRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Segment {} '{}' cannot take part in request/response chaining",
            self.index, self.segment
        )
    }
}

impl StructuredLog for ChainingRejected<'_> {
    fn log(&self) {
        tracing::warn!(index = self.index, segment = self.segment, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "chaining_rejected",
            span_name = name,
            index = self.index,
            segment = self.segment,
        )
    }
}

/// A debug trace was produced for a chain.
///
/// # Log Level
/// `debug!` - Developer tooling
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::engine::DebugTraceRecorded;
///
/// let msg = DebugTraceRecorded {
///     format: "html",
///     phase_count: 4,
///     failed: false,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct DebugTraceRecorded<'a> {
    pub format: &'a str,
    pub phase_count: usize,
    pub failed: bool,
}

impl Display for DebugTraceRecorded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Debug trace recorded: {} phase(s), format={}, failed={}",
            self.phase_count, self.format, self.failed
        )
    }
}

impl StructuredLog for DebugTraceRecorded<'_> {
    fn log(&self) {
        tracing::debug!(
            format = self.format,
            phase_count = self.phase_count,
            failed = self.failed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "debug_trace",
            span_name = name,
            format = self.format,
        )
    }
}
