// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for unit invocation events.
//!
//! This module contains message types for logging events related to:
//! * Invocation lifecycle (start, completion, failure)
//! * Invocations abandoned on cancellation
//! * Local unit dispatch

use crate::chain::Phase;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A unit invocation started.
///
/// # Log Level
/// `debug!` - Per-invocation detail
///
/// # Example
/// ```
/// use the_chainwork::chain::Phase;
/// use the_chainwork::observability::messages::invocation::InvocationStarted;
///
/// let msg = InvocationStarted {
///     segment: "upper",
///     index: 0,
///     phase: Phase::Request,
///     input_size: 5,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct InvocationStarted<'a> {
    pub segment: &'a str,
    pub index: usize,
    pub phase: Phase,
    pub input_size: usize,
}

impl Display for InvocationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Invoking '{}' (position {}) {} phase: input_size={} bytes",
            self.segment, self.index, self.phase, self.input_size
        )
    }
}

impl StructuredLog for InvocationStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            segment = self.segment,
            index = self.index,
            phase = self.phase.as_str(),
            input_size = self.input_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "invocation",
            span_name = name,
            segment = self.segment,
            index = self.index,
            phase = self.phase.as_str(),
        )
    }
}

/// A unit invocation completed and its result passed validation.
///
/// # Log Level
/// `debug!` - Per-invocation detail
///
/// # Example
/// ```
/// use the_chainwork::chain::Phase;
/// use the_chainwork::observability::messages::invocation::InvocationCompleted;
/// use std::time::Duration;
///
/// let msg = InvocationCompleted {
///     segment: "upper",
///     index: 0,
///     phase: Phase::Response,
///     output_size: 5,
///     status: 200,
///     duration: Duration::from_millis(3),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct InvocationCompleted<'a> {
    pub segment: &'a str,
    pub index: usize,
    pub phase: Phase,
    pub output_size: usize,
    pub status: u16,
    pub duration: std::time::Duration,
}

impl Display for InvocationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' (position {}) {} phase completed: status={}, output_size={} bytes, duration={:?}",
            self.segment, self.index, self.phase, self.status, self.output_size, self.duration
        )
    }
}

impl StructuredLog for InvocationCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            segment = self.segment,
            index = self.index,
            phase = self.phase.as_str(),
            status = self.status,
            output_size = self.output_size,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "invocation_completed",
            span_name = name,
            segment = self.segment,
            phase = self.phase.as_str(),
            duration = ?self.duration,
        )
    }
}

/// A unit invocation failed or returned a malformed result.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_chainwork::chain::Phase;
/// use the_chainwork::observability::messages::invocation::InvocationFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "interpreter missing");
/// let msg = InvocationFailed {
///     segment: "upper",
///     index: 0,
///     phase: Phase::Invoke,
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct InvocationFailed<'a> {
    pub segment: &'a str,
    pub index: usize,
    pub phase: Phase,
    pub error: &'a dyn std::error::Error,
}

impl Display for InvocationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' (position {}) {} phase failed: {}",
            self.segment, self.index, self.phase, self.error
        )
    }
}

impl StructuredLog for InvocationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            segment = self.segment,
            index = self.index,
            phase = self.phase.as_str(),
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "invocation_failed",
            span_name = name,
            segment = self.segment,
            phase = self.phase.as_str(),
        )
    }
}

/// The caller cancelled while an invocation was in flight; its result will
/// be discarded.
///
/// # Log Level
/// `warn!` - Work abandoned
///
/// # Example
/// ```
/// use the_chainwork::chain::Phase;
/// use the_chainwork::observability::messages::invocation::InvocationAbandoned;
///
/// let msg = InvocationAbandoned {
///     segment: "slow",
///     index: 2,
///     phase: Phase::Invoke,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct InvocationAbandoned<'a> {
    pub segment: &'a str,
    pub index: usize,
    pub phase: Phase,
}

impl Display for InvocationAbandoned<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cancelled while '{}' (position {}) {} phase was running; result discarded",
            self.segment, self.index, self.phase
        )
    }
}

impl StructuredLog for InvocationAbandoned<'_> {
    fn log(&self) {
        tracing::warn!(
            segment = self.segment,
            index = self.index,
            phase = self.phase.as_str(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "invocation_abandoned",
            span_name = name,
            segment = self.segment,
            index = self.index,
        )
    }
}

/// The local invoker has no native implementation for a unit's source.
///
/// # Log Level
/// `error!` - Misconfigured unit
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::invocation::LocalUnitMissing;
///
/// let msg = LocalUnitMissing {
///     implementation: "frobnicate",
///     available: &["echo", "reverse_text"],
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct LocalUnitMissing<'a> {
    pub implementation: &'a str,
    pub available: &'a [&'a str],
}

impl Display for LocalUnitMissing<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No local unit implementation named '{}'. Available: {}",
            self.implementation,
            self.available.join(", ")
        )
    }
}

impl StructuredLog for LocalUnitMissing<'_> {
    fn log(&self) {
        tracing::error!(
            implementation = self.implementation,
            available_count = self.available.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "local_unit_missing",
            span_name = name,
            implementation = self.implementation,
        )
    }
}
