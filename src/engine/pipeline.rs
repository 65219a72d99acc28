// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Right-to-left function composition.
//!
//! `/pipeline/f/g/h` computes `f(g(h(request)))`: the rightmost position sees
//! the inbound request and every other position sees its right neighbour's
//! output. Each position runs exactly once and the first error ends the chain.

use async_trait::async_trait;
use std::time::Instant;

use super::invocation::{ensure_fresh, fail, invoke_position};
use super::EvaluationContext;
use crate::chain::{ChainPosition, ExecutionResult, Mode, Payload, Phase, PositionState, UnitInput};
use crate::errors::ChainError;
use crate::observability::messages::engine::{
    EvaluationCompleted, EvaluationFailed, EvaluationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{ChainEngine, ExecutionObserver};

#[derive(Debug, Default, Clone, Copy)]
pub struct PipelineEngine;

impl PipelineEngine {
    pub fn new() -> Self {
        Self
    }

    async fn run(
        &self,
        positions: &mut [ChainPosition],
        request: Payload,
        context: &EvaluationContext,
        observer: &mut dyn ExecutionObserver,
    ) -> Result<ExecutionResult, ChainError> {
        let mut current = request;
        // Only unit outputs propagate a content type, never the inbound request
        let mut inherited: Option<String> = None;
        let mut last = None;

        for position in positions.iter_mut().rev() {
            position.transition(PositionState::Invoked)?;
            let input = UnitInput::request(current, position.parameter_values());

            let result = match invoke_position(position, Phase::Invoke, input, context, observer).await {
                Ok(result) => result,
                Err(error) => return Err(fail(position, error)),
            };
            position.transition(PositionState::Done)?;

            let result = result.inherit_content_type(inherited.take());
            inherited = result.content_type.clone();
            current = result.clone().into_payload();
            last = Some(result);
        }

        last.ok_or(ChainError::EmptyChain)
    }
}

#[async_trait]
impl ChainEngine for PipelineEngine {
    fn mode(&self) -> Mode {
        Mode::Pipeline
    }

    async fn evaluate(
        &self,
        positions: &mut [ChainPosition],
        request: Payload,
        context: &EvaluationContext,
        observer: &mut dyn ExecutionObserver,
    ) -> Result<ExecutionResult, ChainError> {
        ensure_fresh(positions)?;

        let started = EvaluationStarted {
            mode: Mode::Pipeline,
            position_count: positions.len(),
        };
        started.log();
        let start_time = Instant::now();

        match self.run(positions, request, context, observer).await {
            Ok(result) => {
                EvaluationCompleted {
                    mode: Mode::Pipeline,
                    invocation_count: positions.len(),
                    duration: start_time.elapsed(),
                }
                .log();
                Ok(result)
            }
            Err(error) => {
                EvaluationFailed {
                    mode: Mode::Pipeline,
                    position: error.position(),
                    error: &error,
                }
                .log();
                Err(error)
            }
        }
    }
}
