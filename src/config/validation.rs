//! Configuration validation for registry integrity.
//!
//! Checks run over the whole configuration and collect every problem found,
//! so a config author sees all of them at once:
//!
//! 1. **Unit names**: each unit name appears once
//! 2. **Limits**: no limit is zero; values above the hard ceilings are clamped
//!    with a warning
//! 3. **Shadowing**: no alias shares its name with an enabled unit, since the
//!    unit always wins classification
//! 4. **Alias chains**: every alias resolves without a cycle and within the
//!    configured depth. Each distinct cycle is reported once, however many
//!    aliases lead into it.
//!
//! Aliases whose terminal target is missing are not rejected here; content
//! may be stored after the config is loaded, so that check happens when a
//! chain is classified.
//!
//! # Examples
//!
//! ```rust
//! use the_chainwork::config::{validate_config, Config};
//! use the_chainwork::errors::ValidationError;
//!
//! let config: Config = serde_yaml::from_str(
//!     "units:\n  - name: echo\n    source: echo\naliases:\n  ping: pong\n  pong: ping\n",
//! )
//! .unwrap();
//!
//! let errors = validate_config(&config).unwrap_err();
//! assert!(matches!(errors[0], ValidationError::CyclicAlias { .. }));
//! ```

use std::collections::{BTreeMap, HashSet};

use crate::chain::AliasResolver;
use crate::config::consts::{HARD_MAX_ALIAS_DEPTH, HARD_MAX_CHAIN_LENGTH, HARD_MAX_INVOKE_TIMEOUT_MS};
use crate::config::Config;
use crate::errors::{AliasError, ValidationError};
use crate::observability::messages::validation::{
    CyclicAliasDetected, DuplicateUnitName, LimitClamped, ShadowedAliasDetected,
    ValidationCompleted, ValidationFailed, ValidationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::AliasRegistry;

struct ConfiguredAliases<'a>(&'a BTreeMap<String, String>);

impl AliasRegistry for ConfiguredAliases<'_> {
    fn lookup_alias(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Validates a configuration's units, aliases and limits.
///
/// # Returns
/// * `Ok(())` - The configuration can be turned into a runtime
/// * `Err(Vec<ValidationError>)` - Every problem found
pub fn validate_config(cfg: &Config) -> Result<(), Vec<ValidationError>> {
    ValidationStarted {
        unit_count: cfg.units.len(),
        alias_count: cfg.aliases.len(),
    }
    .log();

    let mut errors = Vec::new();
    errors.extend(validate_unit_names(cfg));
    errors.extend(validate_limits(cfg));
    errors.extend(validate_shadowed_aliases(cfg));
    errors.extend(validate_alias_chains(cfg));

    if errors.is_empty() {
        ValidationCompleted {
            unit_count: cfg.units.len(),
            content_count: cfg.contents.len(),
        }
        .log();
        Ok(())
    } else {
        ValidationFailed {
            error_count: errors.len(),
        }
        .log();
        Err(errors)
    }
}

fn validate_unit_names(cfg: &Config) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut errors = Vec::new();

    for unit in &cfg.units {
        if !seen.insert(unit.name.as_str()) && reported.insert(unit.name.as_str()) {
            DuplicateUnitName { name: &unit.name }.log();
            errors.push(ValidationError::DuplicateUnitName {
                name: unit.name.clone(),
            });
        }
    }
    errors
}

fn validate_limits(cfg: &Config) -> Vec<ValidationError> {
    let limits = &cfg.limits;
    let checks: [(&'static str, Option<u64>, u64); 3] = [
        (
            "max_chain_length",
            limits.max_chain_length.map(|v| v as u64),
            HARD_MAX_CHAIN_LENGTH as u64,
        ),
        (
            "max_alias_depth",
            limits.max_alias_depth.map(|v| v as u64),
            HARD_MAX_ALIAS_DEPTH as u64,
        ),
        (
            "invoke_timeout_ms",
            limits.invoke_timeout_ms,
            HARD_MAX_INVOKE_TIMEOUT_MS,
        ),
    ];

    let mut errors = Vec::new();
    for (field, value, ceiling) in checks {
        match value {
            Some(0) => errors.push(ValidationError::InvalidLimit {
                field,
                reason: "must be greater than zero".to_string(),
            }),
            Some(requested) if requested > ceiling => LimitClamped {
                field,
                requested,
                applied: ceiling,
            }
            .log(),
            _ => {}
        }
    }
    errors
}

fn validate_shadowed_aliases(cfg: &Config) -> Vec<ValidationError> {
    let enabled: HashSet<&str> = cfg
        .units
        .iter()
        .filter(|unit| unit.enabled)
        .map(|unit| unit.name.as_str())
        .collect();

    cfg.aliases
        .keys()
        .filter(|alias| enabled.contains(alias.as_str()))
        .map(|alias| {
            ShadowedAliasDetected { alias }.log();
            ValidationError::ShadowedAlias {
                alias: alias.clone(),
            }
        })
        .collect()
}

fn validate_alias_chains(cfg: &Config) -> Vec<ValidationError> {
    let aliases = ConfiguredAliases(&cfg.aliases);
    let max_depth = cfg.limits.get_max_alias_depth();
    let resolver = AliasResolver::new(&aliases, max_depth);

    let mut seen_cycles: HashSet<Vec<String>> = HashSet::new();
    let mut errors = Vec::new();

    for alias in cfg.aliases.keys() {
        match resolver.resolve(alias) {
            Ok(_) => {}
            Err(AliasError::Cycle(cycle)) => {
                let loop_only = cycle_loop(&cycle.chain);
                if seen_cycles.insert(canonical_cycle(&loop_only)) {
                    CyclicAliasDetected { cycle: &loop_only }.log();
                    errors.push(ValidationError::CyclicAlias { cycle: loop_only });
                }
            }
            Err(AliasError::DepthExceeded { .. }) => {
                errors.push(ValidationError::AliasTooDeep {
                    alias: alias.clone(),
                    max_depth,
                });
            }
        }
    }
    errors
}

/// The looping part of a resolution chain, closed with its repeated name:
/// `x -> y -> z -> y` becomes `y -> z -> y`.
fn cycle_loop(chain: &[String]) -> Vec<String> {
    let Some(repeated) = chain.last() else {
        return Vec::new();
    };
    let start = chain.iter().position(|name| name == repeated).unwrap_or(0);
    chain[start..].to_vec()
}

/// Rotation-independent key for a closed cycle.
fn canonical_cycle(cycle: &[String]) -> Vec<String> {
    let open = &cycle[..cycle.len().saturating_sub(1)];
    let Some(min_index) = open
        .iter()
        .enumerate()
        .min_by_key(|(_, name)| name.as_str())
        .map(|(index, _)| index)
    else {
        return Vec::new();
    };
    open[min_index..]
        .iter()
        .chain(open[..min_index].iter())
        .cloned()
        .collect()
}
