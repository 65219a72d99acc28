// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! From a raw chain address to executable positions.
//!
//! ```text
//! "/circuit/upper/echo/hi"
//!     -> ChainAddress { mode, segments }        (address)
//!     -> Vec<PathSegment>                       (classifier, alias)
//!     -> Vec<ChainPosition>                     (grouping)
//! ```
//!
//! The engines in [`crate::engine`] take it from there.

pub mod address;
pub mod alias;
pub mod classifier;
pub mod content;
pub mod grouping;
pub mod payload;
pub mod position;
pub mod segment;

pub use address::{parse_debug_flag, ChainAddress, Mode};
pub use alias::{AliasResolver, ResolvedAlias};
pub use classifier::SegmentClassifier;
pub use content::ContentAddress;
pub use grouping::group_parameters;
pub use payload::{ExecutionResult, Payload, UnitInput};
pub use position::{ChainPosition, Phase, PositionState};
pub use segment::{AliasChain, Executable, PathSegment, ResolutionMetadata, SegmentKind};
