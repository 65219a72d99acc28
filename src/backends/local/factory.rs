// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::units::*;
use crate::traits::LocalUnit;

/// Factory for creating local (in-process) unit instances
pub struct LocalUnitFactory;

impl LocalUnitFactory {
    /// Create a unit instance by implementation name
    ///
    /// - "echo" -> EchoUnit
    /// - "change_text_case_upper" -> ChangeTextCaseUnit (uppercase)
    /// - "change_text_case_lower" -> ChangeTextCaseUnit (lowercase)
    /// - "change_text_case_proper" -> ChangeTextCaseUnit (proper case)
    /// - "change_text_case_title" -> ChangeTextCaseUnit (title case)
    /// - "reverse_text" -> ReverseTextUnit
    /// - "prefix_suffix_adder" -> PrefixSuffixAdderUnit (defaults to brackets)
    /// - "word_count" -> WordCountUnit
    pub fn create_unit(name: &str) -> Result<Arc<dyn LocalUnit>, String> {
        match name {
            "echo" => Ok(Arc::new(EchoUnit::new())),

            "change_text_case_upper" => Ok(Arc::new(ChangeTextCaseUnit::upper())),
            "change_text_case_lower" => Ok(Arc::new(ChangeTextCaseUnit::lower())),
            "change_text_case_proper" => Ok(Arc::new(ChangeTextCaseUnit::proper())),
            "change_text_case_title" => Ok(Arc::new(ChangeTextCaseUnit::title())),

            "reverse_text" => Ok(Arc::new(ReverseTextUnit::new())),
            "prefix_suffix_adder" => Ok(Arc::new(PrefixSuffixAdderUnit::with_prefix_and_suffix(
                "[".to_string(),
                "]".to_string(),
            ))),

            "word_count" => Ok(Arc::new(WordCountUnit::new())),

            _ => Err(format!("Unknown local unit implementation: '{}'", name)),
        }
    }

    /// List all available local unit implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![
            "echo",
            "change_text_case_upper",
            "change_text_case_lower",
            "change_text_case_proper",
            "change_text_case_title",
            "reverse_text",
            "prefix_suffix_adder",
            "word_count",
        ]
    }

    pub fn is_implementation_available(name: &str) -> bool {
        Self::list_available_implementations().contains(&name)
    }
}
