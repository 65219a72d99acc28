// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Errors that can occur during registry configuration validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two units were declared with the same name
    DuplicateUnitName {
        /// The duplicated unit name
        name: String,
    },
    /// Following the configured aliases loops back on itself
    CyclicAlias {
        /// The cycle path, ending with the repeated alias
        cycle: Vec<String>,
    },
    /// An alias chain is longer than the configured maximum depth
    AliasTooDeep {
        /// The alias whose resolution ran too deep
        alias: String,
        /// The configured limit
        max_depth: usize,
    },
    /// An alias shares its name with an enabled unit and can never match
    ShadowedAlias {
        /// The alias name hidden by the unit of the same name
        alias: String,
    },
    /// A limit was configured with a value that would reject every chain
    InvalidLimit {
        /// The limit field name
        field: &'static str,
        /// Why the value is unusable
        reason: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateUnitName { name } => {
                write!(f, "Duplicate unit name: '{}'", name)
            }
            ValidationError::CyclicAlias { cycle } => {
                write!(f, "Cyclic alias detected: {}", cycle.join(" -> "))
            }
            ValidationError::AliasTooDeep { alias, max_depth } => {
                write!(
                    f,
                    "Alias '{}' resolves through more than {} aliases",
                    alias, max_depth
                )
            }
            ValidationError::ShadowedAlias { alias } => {
                write!(
                    f,
                    "Alias '{}' has the same name as an enabled unit. The unit always wins, so the alias is unreachable.",
                    alias
                )
            }
            ValidationError::InvalidLimit { field, reason } => {
                write!(f, "Invalid limit '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors from loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration validation failed:\n{}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<ValidationError>),
}
