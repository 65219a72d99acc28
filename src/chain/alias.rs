// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::AliasChain;
use crate::errors::AliasError;
use crate::traits::AliasRegistry;

/// Result of following an alias to the end of its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAlias {
    /// First name in the chain that is not itself an alias.
    pub terminal: String,
    /// Alias names followed to get there, in order.
    pub chain: AliasChain,
}

/// Follows alias links with cycle detection and a depth bound.
///
/// Each call keeps its own visited set, so resolving one segment never
/// affects another.
pub struct AliasResolver<'a> {
    aliases: &'a dyn AliasRegistry,
    max_depth: usize,
}

impl<'a> AliasResolver<'a> {
    pub fn new(aliases: &'a dyn AliasRegistry, max_depth: usize) -> Self {
        Self { aliases, max_depth }
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.lookup_alias(name).is_some()
    }

    /// Follow `name` until it reaches something that is not an alias. A name
    /// that is not an alias at all resolves to itself with an empty chain.
    pub fn resolve(&self, name: &str) -> Result<ResolvedAlias, AliasError> {
        let mut chain = AliasChain::new();
        let mut current = name.to_string();

        while let Some(target) = self.aliases.lookup_alias(&current) {
            chain.push(&current)?;
            if chain.len() > self.max_depth {
                return Err(AliasError::DepthExceeded {
                    chain: chain.names().to_vec(),
                    max_depth: self.max_depth,
                });
            }
            current = target.to_string();
        }

        Ok(ResolvedAlias {
            terminal: current,
            chain,
        })
    }
}
