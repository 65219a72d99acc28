// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Read-only lookups the classifier consults.
//!
//! Registries are populated before evaluation and never change during one.
//! Implementations must be safe to share between concurrent evaluations.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::chain::ContentAddress;
use crate::language::Language;

/// A named unit as stored in the unit registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub source: String,
    /// Explicit language; detected from `source` when absent.
    #[serde(default)]
    pub language: Option<Language>,
    /// Disabled units are invisible to segment classification.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl UnitRecord {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            language: None,
            enabled: true,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

pub trait UnitRegistry: Send + Sync {
    fn lookup_unit(&self, name: &str) -> Option<&UnitRecord>;
}

pub trait AliasRegistry: Send + Sync {
    /// The direct target of `name` (one hop), if `name` is an alias.
    fn lookup_alias(&self, name: &str) -> Option<&str>;
}

pub trait ContentStore: Send + Sync {
    fn lookup(&self, address: &ContentAddress) -> Option<&[u8]>;
}

/// The three registries classification reads from, shareable across tasks.
#[derive(Clone)]
pub struct Registries {
    pub units: Arc<dyn UnitRegistry>,
    pub aliases: Arc<dyn AliasRegistry>,
    pub contents: Arc<dyn ContentStore>,
}

impl Registries {
    /// Use one value that implements all three lookups.
    pub fn from_shared<R>(registry: Arc<R>) -> Self
    where
        R: UnitRegistry + AliasRegistry + ContentStore + 'static,
    {
        Self {
            units: registry.clone(),
            aliases: registry.clone(),
            contents: registry,
        }
    }
}
