// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The single terminal error of one chain evaluation.
//!
//! Every failure of an evaluation, from a bad address to a unit returning
//! garbage, surfaces to the caller as exactly one `ChainError`. Errors tied
//! to a position carry its index and raw segment text.

use thiserror::Error;

use super::{AliasError, ClassificationError, CycleError, ExecutionError};
use crate::chain::Phase;

/// Errors from parsing `/{mode}/{seg1}/.../{segN}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Chain address must start with '/': '{0}'")]
    NotAbsolute(String),

    #[error("Chain address has no mode segment")]
    MissingMode,

    #[error("Unknown chain mode '{0}'; expected 'pipeline' or 'circuit'")]
    UnknownMode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Chain contains no executable segments")]
    EmptyChain,

    #[error("Chain has {length} segments, exceeding the maximum of {max}")]
    ChainTooLong { length: usize, max: usize },

    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error("Segment {index}: {source}")]
    Cycle { index: usize, source: CycleError },

    #[error("Segment {index}: alias resolution exceeded maximum depth {max_depth} ({})", chain.join(" -> "))]
    AliasDepthExceeded {
        index: usize,
        chain: Vec<String>,
        max_depth: usize,
    },

    /// A parameter segment with no executable position to its left.
    #[error("Parameter segment {index} ('{segment}') has no preceding unit to bind to")]
    UnboundParameter { index: usize, segment: String },

    /// A single-invocation unit placed where the circuit needs two phases.
    #[error("Segment {index} ('{segment}') does not support request/response chaining and may only occupy the tail position")]
    ChainingNotSupported { index: usize, segment: String },

    #[error("Segment {index} ('{segment}') failed during {phase} phase: {source}")]
    Execution {
        index: usize,
        segment: String,
        phase: Phase,
        source: ExecutionError,
    },

    /// A unit returned a result that failed validation.
    #[error("Segment {index} ('{segment}') returned a malformed result during {phase} phase: field '{field}' {reason}")]
    MalformedResult {
        index: usize,
        segment: String,
        phase: Phase,
        field: &'static str,
        reason: String,
    },

    /// The caller went away; no further invocations were started.
    #[error("Evaluation cancelled before segment {index} completed")]
    Cancelled { index: usize },

    #[error("Internal engine error: {message}")]
    Internal { message: String },
}

impl ChainError {
    /// Attach a segment index to an alias resolution failure.
    pub fn from_alias(index: usize, error: AliasError) -> Self {
        match error {
            AliasError::Cycle(source) => Self::Cycle { index, source },
            AliasError::DepthExceeded { chain, max_depth } => Self::AliasDepthExceeded {
                index,
                chain,
                max_depth,
            },
        }
    }

    /// Position index the error is attributed to, when there is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Classification(e) => Some(e.index()),
            Self::Cycle { index, .. }
            | Self::AliasDepthExceeded { index, .. }
            | Self::UnboundParameter { index, .. }
            | Self::ChainingNotSupported { index, .. }
            | Self::Execution { index, .. }
            | Self::MalformedResult { index, .. }
            | Self::Cancelled { index } => Some(*index),
            Self::Address(_) | Self::EmptyChain | Self::ChainTooLong { .. } | Self::Internal { .. } => None,
        }
    }

    /// Short machine-readable name for structured error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Address(_) => "address_error",
            Self::EmptyChain => "empty_chain",
            Self::ChainTooLong { .. } => "chain_too_long",
            Self::Classification(ClassificationError::AddressFormat { .. }) => "address_format_error",
            Self::Classification(ClassificationError::DataExtension { .. }) => "data_extension_error",
            Self::Classification(ClassificationError::UnrecognizedExtension { .. }) => {
                "unrecognized_extension_error"
            }
            Self::Classification(ClassificationError::ContentNotFound { .. }) => "content_not_found",
            Self::Classification(ClassificationError::DanglingAlias { .. }) => "dangling_alias",
            Self::Cycle { .. } => "cycle_error",
            Self::AliasDepthExceeded { .. } => "alias_depth_exceeded",
            Self::UnboundParameter { .. } => "unbound_parameter",
            Self::ChainingNotSupported { .. } => "chaining_not_supported",
            Self::Execution {
                source: ExecutionError::Timeout(_),
                ..
            } => "timeout",
            Self::Execution { .. } => "execution_error",
            Self::MalformedResult { .. } => "malformed_result",
            Self::Cancelled { .. } => "cancelled",
            Self::Internal { .. } => "internal_error",
        }
    }
}
