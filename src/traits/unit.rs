use async_trait::async_trait;

use crate::chain::{ExecutionResult, Phase, UnitInput};
use crate::language::CallingConvention;

/// A unit implemented natively in Rust, dispatched by the local invoker.
#[async_trait]
pub trait LocalUnit: Send + Sync {
    async fn process(&self, phase: Phase, input: UnitInput) -> ExecutionResult;

    fn name(&self) -> &'static str;

    fn calling_convention(&self) -> CallingConvention {
        CallingConvention::TwoPhase
    }
}
