// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for segment classification events.

use crate::chain::SegmentKind;
use crate::language::Language;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A raw segment was classified.
///
/// # Log Level
/// `debug!` - Per-segment detail
///
/// # Example
/// ```
/// use the_chainwork::chain::SegmentKind;
/// use the_chainwork::language::Language;
/// use the_chainwork::observability::messages::classification::SegmentClassified;
///
/// let msg = SegmentClassified {
///     index: 0,
///     segment: "upper",
///     kind: SegmentKind::Unit,
///     language: Some(Language::Python),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct SegmentClassified<'a> {
    pub index: usize,
    pub segment: &'a str,
    pub kind: SegmentKind,
    pub language: Option<Language>,
}

impl Display for SegmentClassified<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Segment {} '{}' classified as {:?}",
            self.index, self.segment, self.kind
        )?;
        if let Some(language) = self.language {
            write!(f, " ({})", language)?;
        }
        Ok(())
    }
}

impl StructuredLog for SegmentClassified<'_> {
    fn log(&self) {
        tracing::debug!(
            index = self.index,
            segment = self.segment,
            kind = ?self.kind,
            language = self.language.map(Language::as_str),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "segment_classified",
            span_name = name,
            index = self.index,
            segment = self.segment,
            kind = ?self.kind,
        )
    }
}

/// An alias segment was followed to its terminal target.
///
/// # Log Level
/// `debug!` - Per-segment detail
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::classification::AliasResolved;
///
/// let msg = AliasResolved {
///     alias: "shout",
///     terminal: "upper",
///     hops: 2,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct AliasResolved<'a> {
    pub alias: &'a str,
    pub terminal: &'a str,
    pub hops: usize,
}

impl Display for AliasResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Alias '{}' resolved to '{}' after {} hop(s)",
            self.alias, self.terminal, self.hops
        )
    }
}

impl StructuredLog for AliasResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            alias = self.alias,
            terminal = self.terminal,
            hops = self.hops,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "alias_resolved",
            span_name = name,
            alias = self.alias,
            terminal = self.terminal,
        )
    }
}

/// Classification of a chain failed.
///
/// # Log Level
/// `warn!` - The caller sent a chain that cannot run
///
/// # Example
/// ```
/// use the_chainwork::observability::messages::classification::ChainRejected;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "unbound parameter");
/// let msg = ChainRejected {
///     address: "/pipeline/hello/echo",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct ChainRejected<'a> {
    pub address: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ChainRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Chain '{}' rejected: {}", self.address, self.error)
    }
}

impl StructuredLog for ChainRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            address = self.address,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "chain_rejected",
            span_name = name,
            address = self.address,
        )
    }
}
