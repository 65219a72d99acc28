// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Parsing of `/{mode}/{seg1}/.../{segN}[?debug=...]` chain addresses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

use crate::errors::AddressError;

/// Name of the query parameter that switches on debug introspection.
pub const DEBUG_QUERY_KEY: &str = "debug";

/// Which engine evaluates the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Right-to-left function composition.
    Pipeline,
    /// Two-phase request/response evaluation. Also reachable as `io`.
    Circuit,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Pipeline => "pipeline",
            Mode::Circuit => "circuit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pipeline" => Ok(Mode::Pipeline),
            "circuit" | "io" => Ok(Mode::Circuit),
            other => Err(AddressError::UnknownMode(other.to_string())),
        }
    }
}

/// A parsed chain address. Segments are raw and unclassified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainAddress {
    pub mode: Mode,
    pub segments: Vec<String>,
    pub debug: bool,
}

impl ChainAddress {
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        let (path, query) = match address.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (address, None),
        };

        if !path.starts_with('/') {
            return Err(AddressError::NotAbsolute(address.to_string()));
        }

        let mut parts = path.split('/').filter(|part| !part.is_empty());
        let mode = parts.next().ok_or(AddressError::MissingMode)?.parse::<Mode>()?;
        let segments = parts.map(str::to_string).collect();

        let debug = query
            .and_then(|query| {
                form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| *key == DEBUG_QUERY_KEY)
                    .map(|(_, value)| parse_debug_flag(&value))
            })
            .unwrap_or(false);

        Ok(Self {
            mode,
            segments,
            debug,
        })
    }
}

/// Truthy values are `true`, `1`, `yes` and `on`, case-insensitively.
/// Anything else, including an empty value, leaves debug off.
pub fn parse_debug_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
