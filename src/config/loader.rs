// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_INVOKE_TIMEOUT_MS, DEFAULT_MAX_ALIAS_DEPTH, DEFAULT_MAX_CHAIN_LENGTH,
    HARD_MAX_ALIAS_DEPTH, HARD_MAX_CHAIN_LENGTH, HARD_MAX_INVOKE_TIMEOUT_MS,
};
use crate::errors::ConfigError;
use crate::language::Language;
use crate::traits::UnitRecord;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Main configuration structure for the chain engine.
///
/// Describes the registries a chain is classified against (units, aliases,
/// stored contents), the limits every evaluation runs under, and the opaque
/// context handed to each invocation. Loaded from YAML, or TOML when the
/// path ends in `.toml`.
///
/// # Example
/// ```yaml
/// limits:
///   max_chain_length: 32
///   max_alias_depth: 16
///   invoke_timeout_ms: 30000
/// default_language: python
/// context:
///   region: local
/// units:
///   - name: upper
///     source: change_text_case_upper
///   - name: count
///     source: word_count
///     enabled: false
/// aliases:
///   shout: upper
/// contents:
///   - source: reverse_text
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: ChainLimits,
    /// Fallback for language detection when nothing else answers.
    #[serde(default)]
    pub default_language: Option<Language>,
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    #[serde(default)]
    pub units: Vec<UnitConfig>,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub contents: Vec<ContentConfig>,
}

/// Limits applied to every chain evaluation.
///
/// All values are optional and fall back to the constants in
/// [`crate::config::consts`]. Values above the hard ceilings are clamped.
///
/// # Example
/// ```
/// use the_chainwork::config::ChainLimits;
///
/// let limits = ChainLimits {
///     max_chain_length: Some(10_000),
///     ..ChainLimits::default()
/// };
/// assert_eq!(limits.get_max_chain_length(), 256);
/// assert_eq!(limits.get_max_alias_depth(), 16);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainLimits {
    pub max_chain_length: Option<usize>,
    pub max_alias_depth: Option<usize>,
    pub invoke_timeout_ms: Option<u64>,
}

impl ChainLimits {
    /// Maximum number of raw segments, parameters included.
    pub fn get_max_chain_length(&self) -> usize {
        self.max_chain_length
            .unwrap_or(DEFAULT_MAX_CHAIN_LENGTH)
            .min(HARD_MAX_CHAIN_LENGTH)
    }

    /// Maximum number of alias hops for one segment.
    pub fn get_max_alias_depth(&self) -> usize {
        self.max_alias_depth
            .unwrap_or(DEFAULT_MAX_ALIAS_DEPTH)
            .min(HARD_MAX_ALIAS_DEPTH)
    }

    /// Per-invocation timeout in milliseconds.
    pub fn get_invoke_timeout_ms(&self) -> u64 {
        self.invoke_timeout_ms
            .unwrap_or(DEFAULT_INVOKE_TIMEOUT_MS)
            .min(HARD_MAX_INVOKE_TIMEOUT_MS)
    }
}

/// A named unit.
///
/// # Example
/// ```yaml
/// name: upper
/// source: change_text_case_upper
/// language: python   # optional, detected from source otherwise
/// enabled: true      # optional, defaults to true
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct UnitConfig {
    pub name: String,
    pub source: String,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl UnitConfig {
    pub fn to_record(&self) -> UnitRecord {
        UnitRecord {
            source: self.source.clone(),
            language: self.language,
            enabled: self.enabled,
        }
    }
}

/// Source text stored under its content address.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    pub source: String,
}

/// Load a config from a YAML (or `.toml`) file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let cfg: Config = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(cfg)
}

/// Load and validate a config file
///
/// Validation covers unit names, alias chains and limits; every problem found
/// is reported, not just the first.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Validation)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;

    fn write_config(name: &str, content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
units:
  - name: upper
    source: change_text_case_upper
  - name: count
    source: word_count
    language: bash
    enabled: false
aliases:
  shout: upper
contents:
  - source: reverse_text
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.units.len(), 2);
        assert!(cfg.units[0].enabled);
        assert_eq!(cfg.units[1].language, Some(Language::Bash));
        assert!(!cfg.units[1].to_record().enabled);
        assert_eq!(cfg.aliases.get("shout").map(String::as_str), Some("upper"));
        assert_eq!(cfg.contents[0].source, "reverse_text");
        assert_eq!(cfg.limits, ChainLimits::default());
    }

    #[test]
    fn test_limits_defaults_and_clamping() {
        struct TestCase {
            limits: ChainLimits,
            chain_length: usize,
            alias_depth: usize,
            timeout_ms: u64,
        }

        let test_cases = vec![
            TestCase {
                limits: ChainLimits::default(),
                chain_length: DEFAULT_MAX_CHAIN_LENGTH,
                alias_depth: DEFAULT_MAX_ALIAS_DEPTH,
                timeout_ms: DEFAULT_INVOKE_TIMEOUT_MS,
            },
            TestCase {
                limits: ChainLimits {
                    max_chain_length: Some(4),
                    max_alias_depth: Some(2),
                    invoke_timeout_ms: Some(50),
                },
                chain_length: 4,
                alias_depth: 2,
                timeout_ms: 50,
            },
            TestCase {
                limits: ChainLimits {
                    max_chain_length: Some(usize::MAX),
                    max_alias_depth: Some(1_000),
                    invoke_timeout_ms: Some(u64::MAX),
                },
                chain_length: HARD_MAX_CHAIN_LENGTH,
                alias_depth: HARD_MAX_ALIAS_DEPTH,
                timeout_ms: HARD_MAX_INVOKE_TIMEOUT_MS,
            },
        ];

        for test_case in test_cases {
            assert_eq!(test_case.limits.get_max_chain_length(), test_case.chain_length);
            assert_eq!(test_case.limits.get_max_alias_depth(), test_case.alias_depth);
            assert_eq!(test_case.limits.get_invoke_timeout_ms(), test_case.timeout_ms);
        }
    }

    #[test]
    fn test_load_yaml_and_toml() {
        let (_yaml_dir, yaml_path) = write_config(
            "chains.yaml",
            "default_language: ruby\nunits:\n  - name: echo\n    source: echo\n",
        );
        let cfg = load_config(&yaml_path).unwrap();
        assert_eq!(cfg.default_language, Some(Language::Ruby));
        assert_eq!(cfg.units[0].name, "echo");

        let toml = r#"
default_language = "javascript"

[limits]
max_chain_length = 8

[[units]]
name = "echo"
source = "echo"

[aliases]
say = "echo"
"#;
        let (_toml_dir, toml_path) = write_config("chains.toml", toml);
        let cfg = load_config(&toml_path).unwrap();
        assert_eq!(cfg.default_language, Some(Language::JavaScript));
        assert_eq!(cfg.limits.get_max_chain_length(), 8);
        assert_eq!(cfg.aliases.get("say").map(String::as_str), Some("echo"));
    }

    #[test]
    fn test_load_and_validate_cyclic_aliases() {
        let (_dir, path) = write_config(
            "cyclic.yaml",
            "units:\n  - name: echo\n    source: echo\naliases:\n  a: b\n  b: a\n",
        );

        match load_and_validate_config(&path) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ValidationError::CyclicAlias { .. })));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let (_dir, path) = write_config("bad.yaml", "units: [name: : :\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Yaml(_))));
    }
}
