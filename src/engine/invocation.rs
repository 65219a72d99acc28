// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The one place an engine crosses the invocation boundary.
//!
//! Every invocation runs on its own tokio task under the per-call timeout and
//! races the caller's cancellation token. The result is validated before any
//! engine sees it, so engines only ever handle well-formed results.

use std::sync::Arc;
use std::time::Instant;

use super::EvaluationContext;
use crate::chain::{ChainPosition, ExecutionResult, Phase, PositionState, UnitInput};
use crate::errors::{ChainError, ExecutionError};
use crate::observability::messages::invocation::{
    InvocationAbandoned, InvocationCompleted, InvocationFailed, InvocationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{ExecutionObserver, UnitCall};

/// Invoke `position` for `phase`, notifying `observer` either way.
pub(crate) async fn invoke_position(
    position: &ChainPosition,
    phase: Phase,
    input: UnitInput,
    context: &EvaluationContext,
    observer: &mut dyn ExecutionObserver,
) -> Result<ExecutionResult, ChainError> {
    observer.phase_started(position, phase, &input);
    let outcome = run_invocation(position, phase, input, context).await;
    match &outcome {
        Ok(result) => observer.phase_completed(position, phase, result),
        Err(error) => observer.phase_failed(position, phase, error),
    }
    outcome
}

async fn run_invocation(
    position: &ChainPosition,
    phase: Phase,
    input: UnitInput,
    context: &EvaluationContext,
) -> Result<ExecutionResult, ChainError> {
    let index = position.index();
    if context.cancellation().is_cancelled() {
        return Err(ChainError::Cancelled { index });
    }

    InvocationStarted {
        segment: position.label(),
        index,
        phase,
        input_size: input.request.body.len()
            + input.response.as_ref().map_or(0, |r| r.body.len()),
    }
    .log();

    let start_time = Instant::now();
    let executable = position.executable();
    let call = UnitCall {
        source: Arc::clone(&executable.source),
        language: executable.language,
        phase,
        input,
        context: context.invoke_context().clone(),
    };
    let invoker = Arc::clone(context.invoker());
    let handle = tokio::spawn(async move { invoker.invoke(call).await });

    let joined = tokio::select! {
        biased;
        _ = context.cancellation().cancelled() => {
            InvocationAbandoned {
                segment: position.label(),
                index,
                phase,
            }
            .log();
            return Err(ChainError::Cancelled { index });
        }
        joined = tokio::time::timeout(context.timeout(), handle) => joined,
    };

    let invoked = match joined {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(ExecutionError::TaskFailed(join_error.to_string())),
        Err(_) => Err(ExecutionError::Timeout(context.timeout())),
    };

    let result = invoked
        .map_err(|source| ChainError::Execution {
            index,
            segment: position.label().to_string(),
            phase,
            source,
        })
        .and_then(|result| validate_result(position, phase, result));

    match &result {
        Ok(result) => InvocationCompleted {
            segment: position.label(),
            index,
            phase,
            output_size: result.body().len(),
            status: result.status,
            duration: start_time.elapsed(),
        }
        .log(),
        Err(error) => InvocationFailed {
            segment: position.label(),
            index,
            phase,
            error,
        }
        .log(),
    }
    result
}

/// Check a unit's result before it reaches an engine.
///
/// A reported error always wins. Otherwise the result must carry an output,
/// a status in `100..=599` and, if present, a `type/subtype` content type.
pub(crate) fn validate_result(
    position: &ChainPosition,
    phase: Phase,
    result: ExecutionResult,
) -> Result<ExecutionResult, ChainError> {
    let malformed = |field: &'static str, reason: String| ChainError::MalformedResult {
        index: position.index(),
        segment: position.label().to_string(),
        phase,
        field,
        reason,
    };

    if let Some(message) = &result.error {
        return Err(ChainError::Execution {
            index: position.index(),
            segment: position.label().to_string(),
            phase,
            source: ExecutionError::UnitReported {
                status: result.status,
                message: message.clone(),
            },
        });
    }
    if result.output.is_none() {
        return Err(malformed(
            "output",
            "is missing; a unit must return its output explicitly, even when unchanged".to_string(),
        ));
    }
    if !(100..=599).contains(&result.status) {
        return Err(malformed(
            "status",
            format!("{} is not a valid status code", result.status),
        ));
    }
    if let Some(content_type) = result.content_type.as_deref() {
        if !is_valid_content_type(content_type) {
            return Err(malformed(
                "content_type",
                format!("'{}' is not of the form type/subtype", content_type),
            ));
        }
    }

    Ok(result)
}

fn is_valid_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence.split_once('/') {
        Some((kind, subtype)) => {
            !kind.is_empty()
                && !subtype.is_empty()
                && !kind.contains(char::is_whitespace)
                && !subtype.contains(|c: char| c.is_whitespace() || c == '/')
        }
        None => false,
    }
}

/// Mark `position` failed and hand the error back for propagation.
pub(crate) fn fail(position: &mut ChainPosition, error: ChainError) -> ChainError {
    if position.transition(PositionState::Failed).is_err() {
        return ChainError::Internal {
            message: format!(
                "segment {} ('{}') failed outside of a running state: {}",
                position.index(),
                position.label(),
                error
            ),
        };
    }
    error
}

/// Engines only accept positions that have not been evaluated yet.
pub(crate) fn ensure_fresh(positions: &[ChainPosition]) -> Result<(), ChainError> {
    if positions.is_empty() {
        return Err(ChainError::EmptyChain);
    }
    match positions
        .iter()
        .find(|p| p.state() != PositionState::Unvisited)
    {
        Some(position) => Err(ChainError::Internal {
            message: format!(
                "segment {} ('{}') was already evaluated ({:?})",
                position.index(),
                position.label(),
                position.state()
            ),
        }),
        None => Ok(()),
    }
}
