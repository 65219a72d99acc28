// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;

use super::{Executable, PathSegment};
use crate::errors::ChainError;

/// Which call of a unit an invocation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Circuit request phase: sees the request on its way to the tail.
    Request,
    /// Circuit response phase: sees its own request plus the response.
    Response,
    /// A single call: every pipeline position and the circuit tail.
    Invoke,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Request => "request",
            Phase::Response => "response",
            Phase::Invoke => "invoke",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a position within one evaluation.
///
/// ```text
/// circuit non-tail:  Unvisited -> RequestRunning -> RequestDone -> ResponseRunning -> ResponseDone
/// pipeline / tail:   Unvisited -> Invoked -> Done
/// any running state  -> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionState {
    Unvisited,
    RequestRunning,
    RequestDone,
    ResponseRunning,
    ResponseDone,
    Invoked,
    Done,
    Failed,
}

impl PositionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unvisited => "unvisited",
            Self::RequestRunning => "request_running",
            Self::RequestDone => "request_done",
            Self::ResponseRunning => "response_running",
            Self::ResponseDone => "response_done",
            Self::Invoked => "invoked",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Terminal success: the position's final output exists.
    pub fn is_complete(self) -> bool {
        matches!(self, Self::ResponseDone | Self::Done)
    }

    fn can_transition_to(self, next: PositionState) -> bool {
        use PositionState::*;
        matches!(
            (self, next),
            (Unvisited, RequestRunning)
                | (RequestRunning, RequestDone)
                | (RequestDone, ResponseRunning)
                | (ResponseRunning, ResponseDone)
                | (Unvisited, Invoked)
                | (Invoked, Done)
                | (RequestRunning, Failed)
                | (ResponseRunning, Failed)
                | (Invoked, Failed)
        )
    }
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An executable segment together with the parameters bound to it.
#[derive(Debug, Clone)]
pub struct ChainPosition {
    segment: PathSegment,
    executable: Executable,
    parameters: Vec<PathSegment>,
    state: PositionState,
}

impl ChainPosition {
    pub(crate) fn new(segment: PathSegment) -> Result<Self, ChainError> {
        let executable = segment.executable().cloned().ok_or_else(|| ChainError::Internal {
            message: format!(
                "segment {} ('{}') is not executable and cannot own a position",
                segment.index(),
                segment.raw()
            ),
        })?;

        Ok(Self {
            segment,
            executable,
            parameters: Vec::new(),
            state: PositionState::Unvisited,
        })
    }

    pub(crate) fn bind_parameter(&mut self, parameter: PathSegment) {
        self.parameters.push(parameter);
    }

    /// Index of the owning segment in the original address.
    pub fn index(&self) -> usize {
        self.segment.index()
    }

    pub fn label(&self) -> &str {
        self.segment.raw()
    }

    pub fn segment(&self) -> &PathSegment {
        &self.segment
    }

    pub fn executable(&self) -> &Executable {
        &self.executable
    }

    pub fn parameters(&self) -> &[PathSegment] {
        &self.parameters
    }

    /// Raw parameter values in their original order.
    pub fn parameter_values(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.raw().to_string()).collect()
    }

    pub fn state(&self) -> PositionState {
        self.state
    }

    pub(crate) fn transition(&mut self, next: PositionState) -> Result<(), ChainError> {
        if !self.state.can_transition_to(next) {
            return Err(ChainError::Internal {
                message: format!(
                    "illegal state transition {:?} -> {:?} for segment {} ('{}')",
                    self.state,
                    next,
                    self.index(),
                    self.label()
                ),
            });
        }
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{ResolutionMetadata, SegmentKind};
    use crate::language::Language;
    use std::sync::Arc;

    fn position() -> ChainPosition {
        let executable = Executable {
            target: "echo".to_string(),
            source: Arc::from("echo"),
            language: Language::Python,
        };
        let segment =
            PathSegment::resolved(0, "echo", SegmentKind::Unit, executable, ResolutionMetadata::default());
        ChainPosition::new(segment).unwrap()
    }

    #[test]
    fn test_two_phase_lifecycle() {
        let mut position = position();
        for next in [
            PositionState::RequestRunning,
            PositionState::RequestDone,
            PositionState::ResponseRunning,
            PositionState::ResponseDone,
        ] {
            position.transition(next).unwrap();
        }
        assert!(position.state().is_complete());
    }

    #[test]
    fn test_illegal_transitions_are_rejected() {
        struct TestCase {
            path: Vec<PositionState>,
            illegal: PositionState,
        }

        let test_cases = vec![
            TestCase { path: vec![], illegal: PositionState::ResponseRunning },
            TestCase { path: vec![], illegal: PositionState::Done },
            TestCase { path: vec![PositionState::Invoked, PositionState::Done], illegal: PositionState::Invoked },
            TestCase {
                path: vec![PositionState::RequestRunning, PositionState::RequestDone],
                illegal: PositionState::Done,
            },
            TestCase { path: vec![PositionState::Invoked, PositionState::Failed], illegal: PositionState::Done },
        ];

        for test_case in test_cases {
            let mut position = position();
            for state in &test_case.path {
                position.transition(*state).unwrap();
            }
            let err = position.transition(test_case.illegal).unwrap_err();
            assert_eq!(err.kind(), "internal_error");
        }
    }

    #[test]
    fn test_parameter_segment_cannot_own_position() {
        let err = ChainPosition::new(PathSegment::parameter(0, "hello")).unwrap_err();
        assert!(matches!(err, ChainError::Internal { .. }));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Request.to_string(), "request");
        assert_eq!(Phase::Response.to_string(), "response");
        assert_eq!(Phase::Invoke.to_string(), "invoke");
    }
}
