use async_trait::async_trait;

use crate::chain::{ChainPosition, ExecutionResult, Mode, Payload};
use crate::engine::EvaluationContext;
use crate::errors::ChainError;
use crate::traits::ExecutionObserver;

#[async_trait]
pub trait ChainEngine: Send + Sync {
    fn mode(&self) -> Mode;

    /// Evaluate grouped positions against `request`.
    ///
    /// - `positions`: fresh positions in address order, at least one
    /// - `request`: the inbound payload
    /// - `context`: invoker, timeout, cancellation and opaque invoke context
    /// - `observer`: notified of every phase start, completion and failure
    ///
    /// Returns the final result or the first error; nothing runs after an error.
    async fn evaluate(
        &self,
        positions: &mut [ChainPosition],
        request: Payload,
        context: &EvaluationContext,
        observer: &mut dyn ExecutionObserver,
    ) -> Result<ExecutionResult, ChainError>;
}
