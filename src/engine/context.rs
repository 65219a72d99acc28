// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::consts::DEFAULT_INVOKE_TIMEOUT_MS;
use crate::traits::{InvokeContext, Invoker};

/// Everything an engine needs besides the positions themselves.
#[derive(Clone)]
pub struct EvaluationContext {
    invoker: Arc<dyn Invoker>,
    invoke_context: InvokeContext,
    timeout: Duration,
    cancellation: CancellationToken,
}

impl EvaluationContext {
    pub fn new(invoker: Arc<dyn Invoker>) -> Self {
        Self {
            invoker,
            invoke_context: InvokeContext::default(),
            timeout: Duration::from_millis(DEFAULT_INVOKE_TIMEOUT_MS),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_invoke_context(mut self, invoke_context: InvokeContext) -> Self {
        self.invoke_context = invoke_context;
        self
    }

    /// Tie evaluation to a caller-owned token. Cancelling it stops the chain
    /// before its next invocation and abandons the one in flight.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn invoker(&self) -> &Arc<dyn Invoker> {
        &self.invoker
    }

    pub fn invoke_context(&self) -> &InvokeContext {
        &self.invoke_context
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}
