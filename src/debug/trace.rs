// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The execution trace and the observer that records it.

use serde::Serialize;

use crate::chain::{
    ChainPosition, ExecutionResult, Mode, PathSegment, Phase, PositionState, ResolutionMetadata,
    SegmentKind, UnitInput,
};
use crate::errors::ChainError;
use crate::traits::ExecutionObserver;

/// Everything that happened while evaluating one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugTrace {
    pub mode: Mode,
    pub segments: Vec<SegmentRecord>,
    pub positions: Vec<PositionRecord>,
    pub phases: Vec<PhaseRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorRecord>,
}

impl DebugTrace {
    /// Number of invocations that were started.
    pub fn invocation_count(&self) -> usize {
        self.phases.len()
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentRecord {
    pub index: usize,
    pub raw: String,
    pub kind: SegmentKind,
    #[serde(flatten)]
    pub resolution: ResolutionMetadata,
}

impl From<&PathSegment> for SegmentRecord {
    fn from(segment: &PathSegment) -> Self {
        Self {
            index: segment.index(),
            raw: segment.raw().to_string(),
            kind: segment.kind(),
            resolution: segment.metadata().clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionRecord {
    pub index: usize,
    pub segment: String,
    pub parameters: Vec<String>,
    pub state: PositionState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseInput {
    pub request: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_content_type: Option<String>,
    pub parameters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl From<&UnitInput> for PhaseInput {
    fn from(input: &UnitInput) -> Self {
        Self {
            request: input.request.text().into_owned(),
            request_content_type: input.request.content_type.clone(),
            parameters: input.parameters.clone(),
            response: input.response.as_ref().map(|r| r.text().into_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub status: u16,
}

impl From<&ExecutionResult> for ResultRecord {
    fn from(result: &ExecutionResult) -> Self {
        Self {
            output: result
                .output
                .as_ref()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
            content_type: result.content_type.clone(),
            status: result.status,
        }
    }
}

/// One invocation, in the order it was started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseRecord {
    pub sequence: usize,
    pub position: usize,
    pub segment: String,
    pub phase: Phase,
    pub input: PhaseInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<ResultRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl From<&ChainError> for ErrorRecord {
    fn from(error: &ChainError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            position: error.position(),
        }
    }
}

/// Observer that builds a [`DebugTrace`] as evaluation proceeds.
#[derive(Debug)]
pub struct TraceRecorder {
    mode: Mode,
    segments: Vec<SegmentRecord>,
    positions: Vec<PositionRecord>,
    phases: Vec<PhaseRecord>,
}

impl TraceRecorder {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            segments: Vec::new(),
            positions: Vec::new(),
            phases: Vec::new(),
        }
    }

    /// Refresh the recorded position states after evaluation.
    pub fn record_final_states(&mut self, positions: &[ChainPosition]) {
        for (record, position) in self.positions.iter_mut().zip(positions) {
            record.state = position.state();
        }
    }

    fn open_phase(&mut self, position: &ChainPosition, phase: Phase) -> Option<&mut PhaseRecord> {
        self.phases
            .iter_mut()
            .rev()
            .find(|record| record.position == position.index() && record.phase == phase)
    }

    pub fn finish(self, outcome: &Result<ExecutionResult, ChainError>) -> DebugTrace {
        let (result, error) = match outcome {
            Ok(result) => (Some(ResultRecord::from(result)), None),
            Err(error) => (None, Some(ErrorRecord::from(error))),
        };

        DebugTrace {
            mode: self.mode,
            segments: self.segments,
            positions: self.positions,
            phases: self.phases,
            result,
            error,
        }
    }
}

impl ExecutionObserver for TraceRecorder {
    fn segment_classified(&mut self, segment: &PathSegment) {
        self.segments.push(SegmentRecord::from(segment));
    }

    fn chain_grouped(&mut self, positions: &[ChainPosition]) {
        self.positions = positions
            .iter()
            .map(|position| PositionRecord {
                index: position.index(),
                segment: position.label().to_string(),
                parameters: position.parameter_values(),
                state: position.state(),
            })
            .collect();
    }

    fn phase_started(&mut self, position: &ChainPosition, phase: Phase, input: &UnitInput) {
        self.phases.push(PhaseRecord {
            sequence: self.phases.len(),
            position: position.index(),
            segment: position.label().to_string(),
            phase,
            input: PhaseInput::from(input),
            output: None,
            error: None,
        });
    }

    fn phase_completed(&mut self, position: &ChainPosition, phase: Phase, result: &ExecutionResult) {
        if let Some(record) = self.open_phase(position, phase) {
            record.output = Some(ResultRecord::from(result));
        }
    }

    fn phase_failed(&mut self, position: &ChainPosition, phase: Phase, error: &ChainError) {
        if let Some(record) = self.open_phase(position, phase) {
            record.error = Some(error.to_string());
        }
    }
}
