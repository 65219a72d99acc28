// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::pass_through;
use crate::chain::{ExecutionResult, Phase, UnitInput};
use crate::traits::LocalUnit;

/// Echo unit - returns its parameters, or its input when it has none
///
/// Parameters are joined with `/`, so `/pipeline/echo/a/b` yields `a/b`. In a
/// response phase echo hands back the response it received.
#[derive(Debug, Default)]
pub struct EchoUnit;

impl EchoUnit {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LocalUnit for EchoUnit {
    async fn process(&self, phase: Phase, input: UnitInput) -> ExecutionResult {
        match (phase, &input.response) {
            (Phase::Request, _) => pass_through(&input),
            (Phase::Response, Some(response)) => ExecutionResult::ok(response.body.clone()),
            _ if !input.parameters.is_empty() => ExecutionResult::ok(input.parameters.join("/")),
            _ => pass_through(&input),
        }
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}
