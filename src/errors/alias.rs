// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// An alias resolution revisited a name it had already followed.
///
/// `chain` holds every name visited in order, ending with the repeated name,
/// e.g. `["a", "b", "a"]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Alias cycle detected: {}", chain.join(" -> "))]
pub struct CycleError {
    pub chain: Vec<String>,
}

/// Errors produced by the alias resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error(transparent)]
    Cycle(#[from] CycleError),

    /// The alias chain grew past the configured depth without repeating.
    #[error("Alias resolution exceeded maximum depth {max_depth}: {}", chain.join(" -> "))]
    DepthExceeded { chain: Vec<String>, max_depth: usize },
}
