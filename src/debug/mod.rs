// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Debug introspection.
//!
//! A debug request runs exactly the same classification and engine code as a
//! live one. The only difference is the observer: a [`TraceRecorder`] instead
//! of a no-op. So the trace shows what the live request would have done, and
//! invokes every unit the same number of times.

pub mod render;
pub mod trace;

pub use render::{render, split_format_extension, DebugFormat, RenderedTrace};
pub use trace::{DebugTrace, ErrorRecord, PhaseRecord, SegmentRecord, TraceRecorder};

use crate::chain::{ChainPosition, ExecutionResult, Mode, Payload};
use crate::engine::EvaluationContext;
use crate::errors::ChainError;
use crate::observability::messages::engine::DebugTraceRecorded;
use crate::observability::messages::StructuredLog;
use crate::traits::{ChainEngine, ExecutionObserver};

/// A trace plus the outcome the live evaluation would have produced.
#[derive(Debug, Clone)]
pub struct DebugReport {
    pub trace: DebugTrace,
    pub outcome: Result<ExecutionResult, ChainError>,
}

/// Records one evaluation from classification to final result.
pub struct DebugIntrospector {
    recorder: TraceRecorder,
    format: DebugFormat,
}

impl DebugIntrospector {
    pub fn new(mode: Mode, format: DebugFormat) -> Self {
        Self {
            recorder: TraceRecorder::new(mode),
            format,
        }
    }

    pub fn format(&self) -> DebugFormat {
        self.format
    }

    /// Observer to hand to classification and grouping.
    pub fn observer(&mut self) -> &mut dyn ExecutionObserver {
        &mut self.recorder
    }

    pub async fn evaluate(
        mut self,
        engine: &dyn ChainEngine,
        positions: &mut [ChainPosition],
        request: Payload,
        context: &EvaluationContext,
    ) -> DebugReport {
        let outcome = engine
            .evaluate(positions, request, context, &mut self.recorder)
            .await;
        self.recorder.record_final_states(positions);
        self.finish(outcome)
    }

    /// Close the trace. Also used when the chain failed before evaluation.
    pub fn finish(self, outcome: Result<ExecutionResult, ChainError>) -> DebugReport {
        let trace = self.recorder.finish(&outcome);
        DebugTraceRecorded {
            format: self.format.as_str(),
            phase_count: trace.invocation_count(),
            failed: trace.failed(),
        }
        .log();
        DebugReport { trace, outcome }
    }
}

/// Evaluate already-grouped positions with tracing switched on.
pub async fn evaluate_debug(
    engine: &dyn ChainEngine,
    positions: &mut [ChainPosition],
    request: Payload,
    context: &EvaluationContext,
) -> DebugReport {
    let mut introspector = DebugIntrospector::new(engine.mode(), DebugFormat::Structured);
    for position in positions.iter() {
        introspector.observer().segment_classified(position.segment());
        for parameter in position.parameters() {
            introspector.observer().segment_classified(parameter);
        }
    }
    introspector.observer().chain_grouped(positions);
    introspector.evaluate(engine, positions, request, context).await
}
