// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::chain::ContentAddress;
use crate::config::Config;
use crate::traits::{AliasRegistry, ContentStore, Registries, UnitRecord, UnitRegistry};

/// In-memory units, aliases and content, frozen once built.
///
/// Implements all three registry lookups so one snapshot can back a whole
/// [`Registries`] set.
#[derive(Debug, Default, Clone)]
pub struct RegistrySnapshot {
    units: HashMap<String, UnitRecord>,
    aliases: HashMap<String, String>,
    contents: HashMap<ContentAddress, Vec<u8>>,
}

impl RegistrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from configuration. Later unit entries with a
    /// duplicated name replace earlier ones; validation reports duplicates.
    pub fn from_config(cfg: &Config) -> Self {
        let mut snapshot = Self::new();
        for unit in &cfg.units {
            snapshot.insert_unit(&unit.name, unit.to_record());
        }
        for (alias, target) in &cfg.aliases {
            snapshot.insert_alias(alias, target);
        }
        for content in &cfg.contents {
            snapshot.insert_content(content.source.as_bytes().to_vec());
        }
        snapshot
    }

    pub fn insert_unit(&mut self, name: &str, record: UnitRecord) {
        self.units.insert(name.to_string(), record);
    }

    pub fn insert_alias(&mut self, alias: &str, target: &str) {
        self.aliases.insert(alias.to_string(), target.to_string());
    }

    /// Store `content` and return the address it is reachable under.
    pub fn insert_content(&mut self, content: Vec<u8>) -> ContentAddress {
        let address = ContentAddress::for_content(&content);
        self.contents.insert(address.clone(), content);
        address
    }

    /// Addresses of everything in the content store, sorted.
    pub fn content_addresses(&self) -> Vec<&ContentAddress> {
        let mut addresses: Vec<_> = self.contents.keys().collect();
        addresses.sort();
        addresses
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn into_registries(self) -> Registries {
        Registries::from_shared(Arc::new(self))
    }
}

impl UnitRegistry for RegistrySnapshot {
    fn lookup_unit(&self, name: &str) -> Option<&UnitRecord> {
        self.units.get(name)
    }
}

impl AliasRegistry for RegistrySnapshot {
    fn lookup_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }
}

impl ContentStore for RegistrySnapshot {
    fn lookup(&self, address: &ContentAddress) -> Option<&[u8]> {
        self.contents.get(address).map(Vec::as_slice)
    }
}
