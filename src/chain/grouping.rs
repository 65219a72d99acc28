// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{ChainPosition, PathSegment};
use crate::errors::ChainError;

/// Bind every parameter to the nearest executable segment on its left.
///
/// Pure and order-preserving: positions come out in address order, and each
/// position's parameters keep their original relative order.
pub fn group_parameters(segments: Vec<PathSegment>) -> Result<Vec<ChainPosition>, ChainError> {
    let mut positions: Vec<ChainPosition> = Vec::new();

    for segment in segments {
        if segment.is_parameter() {
            match positions.last_mut() {
                Some(owner) => owner.bind_parameter(segment),
                None => {
                    return Err(ChainError::UnboundParameter {
                        index: segment.index(),
                        segment: segment.raw().to_string(),
                    })
                }
            }
        } else {
            positions.push(ChainPosition::new(segment)?);
        }
    }

    if positions.is_empty() {
        return Err(ChainError::EmptyChain);
    }
    Ok(positions)
}
