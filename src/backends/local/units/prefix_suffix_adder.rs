// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::transform_text;
use crate::chain::{ExecutionResult, Phase, UnitInput};
use crate::traits::LocalUnit;

/// Default prefix and suffix when neither configuration nor parameters set one
#[derive(Debug, Clone, Default)]
pub struct PrefixSuffixConfig {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

/// Prefix/Suffix Adder unit - wraps text in a prefix and suffix
///
/// Path parameters override the configured values positionally: the first
/// parameter is the prefix, the second the suffix.
pub struct PrefixSuffixAdderUnit {
    config: PrefixSuffixConfig,
}

impl PrefixSuffixAdderUnit {
    pub fn new(config: PrefixSuffixConfig) -> Self {
        Self { config }
    }

    pub fn with_prefix_and_suffix(prefix: String, suffix: String) -> Self {
        Self::new(PrefixSuffixConfig {
            prefix: Some(prefix),
            suffix: Some(suffix),
        })
    }

    fn wrap(&self, text: &str, parameters: &[String]) -> String {
        let prefix = parameters
            .first()
            .map(String::as_str)
            .or(self.config.prefix.as_deref())
            .unwrap_or_default();
        let suffix = parameters
            .get(1)
            .map(String::as_str)
            .or(self.config.suffix.as_deref())
            .unwrap_or_default();

        let mut result = String::with_capacity(prefix.len() + text.len() + suffix.len());
        result.push_str(prefix);
        result.push_str(text);
        result.push_str(suffix);
        result
    }
}

#[async_trait]
impl LocalUnit for PrefixSuffixAdderUnit {
    async fn process(&self, phase: Phase, input: UnitInput) -> ExecutionResult {
        transform_text(phase, &input, |text| self.wrap(text, &input.parameters))
    }

    fn name(&self) -> &'static str {
        "prefix_suffix_adder"
    }
}
