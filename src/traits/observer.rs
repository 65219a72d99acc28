use crate::chain::{ChainPosition, ExecutionResult, PathSegment, Phase, UnitInput};
use crate::errors::ChainError;

/// Hooks into classification and evaluation.
///
/// Live requests run with [`NoopObserver`]; debug requests run the very same
/// code with a trace recorder plugged in here.
pub trait ExecutionObserver: Send {
    fn segment_classified(&mut self, _segment: &PathSegment) {}

    fn chain_grouped(&mut self, _positions: &[ChainPosition]) {}

    fn phase_started(&mut self, _position: &ChainPosition, _phase: Phase, _input: &UnitInput) {}

    fn phase_completed(&mut self, _position: &ChainPosition, _phase: Phase, _result: &ExecutionResult) {}

    fn phase_failed(&mut self, _position: &ChainPosition, _phase: Phase, _error: &ChainError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExecutionObserver for NoopObserver {}
