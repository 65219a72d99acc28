// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Two-phase request/response evaluation (circuit, a.k.a. io mode).
//!
//! ```text
//! request phase   ->  p0 -> p1 -> ... -> p(n-2)      each forwards a request
//! tail            ->  p(n-1) runs once, produces the response
//! response phase  <-  p0 <- p1 <- ... <- p(n-2)      each sees own request + response
//! ```
//!
//! Every non-tail position must support two-phase chaining; this is checked
//! for the whole chain before anything is invoked. A position's response
//! phase never starts until its right neighbour has completed. The head's
//! response-phase output is the chain's final output.

use async_trait::async_trait;
use std::time::Instant;

use super::invocation::{ensure_fresh, fail, invoke_position};
use super::EvaluationContext;
use crate::chain::{ChainPosition, ExecutionResult, Mode, Payload, Phase, PositionState, UnitInput};
use crate::errors::ChainError;
use crate::observability::messages::engine::{
    ChainingRejected, EvaluationCompleted, EvaluationFailed, EvaluationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{ChainEngine, ExecutionObserver};

#[derive(Debug, Default, Clone, Copy)]
pub struct CircuitEngine;

impl CircuitEngine {
    pub fn new() -> Self {
        Self
    }

    /// Reject the chain if any non-tail position only supports one call.
    fn preflight(&self, positions: &[ChainPosition], context: &EvaluationContext) -> Result<(), ChainError> {
        let tail = positions.len().saturating_sub(1);
        for position in &positions[..tail] {
            let convention = context.invoker().calling_convention(position.executable());
            if !convention.supports_chaining() {
                ChainingRejected {
                    index: position.index(),
                    segment: position.label(),
                }
                .log();
                return Err(ChainError::ChainingNotSupported {
                    index: position.index(),
                    segment: position.label().to_string(),
                });
            }
        }
        Ok(())
    }

    async fn run(
        &self,
        positions: &mut [ChainPosition],
        request: Payload,
        context: &EvaluationContext,
        observer: &mut dyn ExecutionObserver,
    ) -> Result<(ExecutionResult, usize), ChainError> {
        let tail_index = positions.len() - 1;
        let mut captured: Vec<Payload> = Vec::with_capacity(tail_index);
        let mut forwarded = request;

        for position in positions[..tail_index].iter_mut() {
            position.transition(PositionState::RequestRunning)?;
            let input = UnitInput::request(forwarded.clone(), position.parameter_values());

            let result = match invoke_position(position, Phase::Request, input, context, observer).await {
                Ok(result) => result,
                Err(error) => return Err(fail(position, error)),
            };
            position.transition(PositionState::RequestDone)?;

            captured.push(forwarded);
            forwarded = result.into_payload();
        }

        let tail = &mut positions[tail_index];
        tail.transition(PositionState::Invoked)?;
        let input = UnitInput::request(forwarded, tail.parameter_values());
        let mut response = match invoke_position(tail, Phase::Invoke, input, context, observer).await {
            Ok(result) => result,
            Err(error) => return Err(fail(tail, error)),
        };
        tail.transition(PositionState::Done)?;

        for index in (0..tail_index).rev() {
            let neighbour = positions[index + 1].state();
            if !neighbour.is_complete() {
                return Err(ChainError::Internal {
                    message: format!(
                        "response phase of segment {} started before its right neighbour completed ({:?})",
                        positions[index].index(),
                        neighbour
                    ),
                });
            }

            let own_request = captured.pop().ok_or_else(|| ChainError::Internal {
                message: format!("no captured request for position {}", index),
            })?;

            let position = &mut positions[index];
            position.transition(PositionState::ResponseRunning)?;
            let inherited = response.content_type.clone();
            let input = UnitInput::response(own_request, position.parameter_values(), response.into_payload());

            let result = match invoke_position(position, Phase::Response, input, context, observer).await {
                Ok(result) => result,
                Err(error) => return Err(fail(position, error)),
            };
            position.transition(PositionState::ResponseDone)?;

            response = result.inherit_content_type(inherited);
        }

        Ok((response, 2 * tail_index + 1))
    }
}

#[async_trait]
impl ChainEngine for CircuitEngine {
    fn mode(&self) -> Mode {
        Mode::Circuit
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
            mode: Mode::Circuit,
            position_count: positions.len(),
        };
        started.log();
        let start_time = Instant::now();

        let outcome = match self.preflight(positions, context) {
            Ok(()) => self.run(positions, request, context, observer).await,
            Err(error) => Err(error),
        };

        match outcome {
            Ok((result, invocation_count)) => {
                EvaluationCompleted {
                    mode: Mode::Circuit,
                    invocation_count,
                    duration: start_time.elapsed(),
                }
                .log();
                Ok(result)
            }
            Err(error) => {
                EvaluationFailed {
                    mode: Mode::Circuit,
                    position: error.position(),
                    error: &error,
                }
                .log();
                Err(error)
            }
        }
    }
}
