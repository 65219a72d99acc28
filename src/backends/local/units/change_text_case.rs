// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::transform_text;
use crate::chain::{ExecutionResult, Phase, UnitInput};
use crate::traits::LocalUnit;

/// Small words title case leaves lowercase unless they open the text.
const TITLE_CASE_MINOR_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseType {
    Upper,
    Lower,
    /// First letter of every word capitalized.
    Proper,
    /// Like proper case, but minor words stay lowercase.
    Title,
}

/// Change Text Case unit - converts text to a different case
pub struct ChangeTextCaseUnit {
    case_type: CaseType,
}

impl ChangeTextCaseUnit {
    pub fn new(case_type: CaseType) -> Self {
        Self { case_type }
    }

    pub fn upper() -> Self {
        Self::new(CaseType::Upper)
    }

    pub fn lower() -> Self {
        Self::new(CaseType::Lower)
    }

    pub fn proper() -> Self {
        Self::new(CaseType::Proper)
    }

    pub fn title() -> Self {
        Self::new(CaseType::Title)
    }

    pub fn convert(&self, input: &str) -> String {
        match self.case_type {
            CaseType::Upper => input.to_uppercase(),
            CaseType::Lower => input.to_lowercase(),
            CaseType::Proper => input
                .split_whitespace()
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            CaseType::Title => input
                .split_whitespace()
                .enumerate()
                .map(|(i, word)| {
                    let lower_word = word.to_lowercase();
                    if i > 0 && TITLE_CASE_MINOR_WORDS.contains(&lower_word.as_str()) {
                        lower_word
                    } else {
                        capitalize(word)
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

#[async_trait]
impl LocalUnit for ChangeTextCaseUnit {
    async fn process(&self, phase: Phase, input: UnitInput) -> ExecutionResult {
        transform_text(phase, &input, |text| self.convert(text))
    }

    fn name(&self) -> &'static str {
        "change_text_case"
    }
}
