// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::transform_text;
use crate::chain::{ExecutionResult, Phase, UnitInput};
use crate::traits::LocalUnit;

/// Reverse Text unit - reverses the characters of its input
#[derive(Debug, Default)]
pub struct ReverseTextUnit;

impl ReverseTextUnit {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LocalUnit for ReverseTextUnit {
    async fn process(&self, phase: Phase, input: UnitInput) -> ExecutionResult {
        transform_text(phase, &input, |text| text.chars().rev().collect())
    }

    fn name(&self) -> &'static str {
        "reverse_text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Payload;

    #[tokio::test]
    async fn test_reverse_handles_multibyte_characters() {
        let unit = ReverseTextUnit::new();
        let result = unit
            .process(Phase::Invoke, UnitInput::request(Payload::new("héllo"), vec![]))
            .await;
        assert_eq!(result.text(), "olléh");
    }
}
