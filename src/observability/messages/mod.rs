// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit itself with structured fields at the right level.
//!
//! # Organization
//!
//! * `classification` - segment classification and alias resolution
//! * `engine` - chain evaluation lifecycle
//! * `invocation` - individual unit invocations
//! * `validation` - configuration validation warnings and errors
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_chainwork::chain::Mode;
//! use the_chainwork::observability::messages::engine::EvaluationStarted;
//! use the_chainwork::observability::messages::StructuredLog;
//!
//! let msg = EvaluationStarted {
//!     mode: Mode::Circuit,
//!     position_count: 3,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod classification;
pub mod engine;
pub mod invocation;
pub mod validation;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
