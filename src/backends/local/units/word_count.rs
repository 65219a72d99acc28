// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::chain::{ExecutionResult, Phase, UnitInput};
use crate::language::CallingConvention;
use crate::traits::LocalUnit;

/// Word Count unit - counts whitespace-separated words
///
/// Called once only, so in a circuit it can only be the tail.
#[derive(Debug, Default)]
pub struct WordCountUnit;

impl WordCountUnit {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LocalUnit for WordCountUnit {
    async fn process(&self, _phase: Phase, input: UnitInput) -> ExecutionResult {
        let input = match String::from_utf8(input.request.body) {
            Ok(text) => text,
            Err(e) => return ExecutionResult::failed(400, format!("Invalid UTF-8 input: {}", e)),
        };

        let word_count = input.split_whitespace().count();
        ExecutionResult::ok(word_count.to_string()).with_content_type("text/plain")
    }

    fn name(&self) -> &'static str {
        "word_count"
    }

    fn calling_convention(&self) -> CallingConvention {
        CallingConvention::SingleInvocation
    }
}
