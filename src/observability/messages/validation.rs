// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation warnings and errors.
//!
//! This module contains message types for logging events related to:
//! * Duplicate unit names
//! * Cyclic and over-deep alias chains
//! * Aliases shadowed by units
//! * Limit clamping

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cyclic alias chain detected in configuration.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::validation::CyclicAliasDetected;
///
/// let cycle = vec!["a".to_string(), "b".to_string(), "a".to_string()];
/// let msg = CyclicAliasDetected {
///     cycle: &cycle,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CyclicAliasDetected<'a> {
    pub cycle: &'a [String],
}

impl Display for CyclicAliasDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic alias detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicAliasDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = %self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            cycle_length = self.cycle.len(),
        )
    }
}

/// Duplicate unit name in configuration.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::validation::DuplicateUnitName;
///
/// let msg = DuplicateUnitName {
///     name: "upper",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct DuplicateUnitName<'a> {
    pub name: &'a str,
}

impl Display for DuplicateUnitName<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate unit name: '{}'", self.name)
    }
}

impl StructuredLog for DuplicateUnitName<'_> {
    fn log(&self) {
        tracing::error!(name = self.name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            unit = self.name,
        )
    }
}

/// An alias can never match because an enabled unit has the same name.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::validation::ShadowedAliasDetected;
///
/// let msg = ShadowedAliasDetected {
///     alias: "upper",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ShadowedAliasDetected<'a> {
    pub alias: &'a str,
}

impl Display for ShadowedAliasDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Alias '{}' is shadowed by a unit of the same name", self.alias)
    }
}

impl StructuredLog for ShadowedAliasDetected<'_> {
    fn log(&self) {
        tracing::error!(alias = self.alias, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            alias = self.alias,
        )
    }
}

/// A configured limit was outside its allowed range and has been clamped.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::validation::LimitClamped;
///
/// let msg = LimitClamped {
///     field: "max_chain_length",
///     requested: 10_000,
///     applied: 256,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct LimitClamped<'a> {
    pub field: &'a str,
    pub requested: u64,
    pub applied: u64,
}

impl Display for LimitClamped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Limit '{}' of {} exceeds the allowed maximum; using {}",
            self.field, self.requested, self.applied
        )
    }
}

impl StructuredLog for LimitClamped<'_> {
    fn log(&self) {
        tracing::warn!(
            field = self.field,
            requested = self.requested,
            applied = self.applied,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            field = self.field,
        )
    }
}

/// Configuration validation started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::validation::ValidationStarted;
///
/// let msg = ValidationStarted {
///     unit_count: 5,
///     alias_count: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ValidationStarted {
    pub unit_count: usize,
    pub alias_count: usize,
}

impl Display for ValidationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting configuration validation for {} units and {} aliases",
            self.unit_count, self.alias_count
        )
    }
}

impl StructuredLog for ValidationStarted {
    fn log(&self) {
        tracing::info!(
            unit_count = self.unit_count,
            alias_count = self.alias_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            unit_count = self.unit_count,
            alias_count = self.alias_count,
        )
    }
}

/// Configuration validation completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::validation::ValidationCompleted;
///
/// let msg = ValidationCompleted {
///     unit_count: 5,
///     content_count: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ValidationCompleted {
    pub unit_count: usize,
    pub content_count: usize,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration validation completed successfully for {} units and {} stored contents",
            self.unit_count, self.content_count
        )
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        tracing::info!(
            unit_count = self.unit_count,
            content_count = self.content_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            unit_count = self.unit_count,
        )
    }
}

/// Configuration validation failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::validation::ValidationFailed;
///
/// let msg = ValidationFailed {
///     error_count: 3,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ValidationFailed {
    pub error_count: usize,
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration validation failed with {} errors",
            self.error_count
        )
    }
}

impl StructuredLog for ValidationFailed {
    fn log(&self) {
        tracing::error!(error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            error_count = self.error_count,
        )
    }
}
