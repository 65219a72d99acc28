// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! From a chain address string to an outcome.
//!
//! The runner ties the stages together: parse the address, classify each
//! segment, group parameters, pick the engine for the mode and evaluate. Debug
//! requests take the same path with a trace recorder as observer.

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{EngineFactory, EvaluationContext};
use crate::chain::{
    group_parameters, ChainAddress, ChainPosition, ExecutionResult, Mode, Payload,
    SegmentClassifier,
};
use crate::config::ChainLimits;
use crate::debug::{split_format_extension, DebugFormat, DebugIntrospector, DebugReport, RenderedTrace};
use crate::errors::ChainError;
use crate::language::LanguageDetector;
use crate::observability::messages::classification::ChainRejected;
use crate::observability::messages::StructuredLog;
use crate::traits::{ExecutionObserver, InvokeContext, Invoker, NoopObserver, Registries};

/// Result of running one chain address.
#[derive(Debug, Clone)]
pub enum ChainOutcome {
    Completed(ExecutionResult),
    Failed(ChainError),
    Debug(DebugResponse),
}

/// A debug trace in place of the chain's normal output.
#[derive(Debug, Clone)]
pub struct DebugResponse {
    pub format: DebugFormat,
    pub report: DebugReport,
}

impl DebugResponse {
    pub fn render(&self) -> Result<RenderedTrace, serde_json::Error> {
        crate::debug::render(&self.report.trace, self.format)
    }
}

pub struct ChainRunner {
    registries: Registries,
    invoker: Arc<dyn Invoker>,
    limits: ChainLimits,
    detector: LanguageDetector,
    invoke_context: InvokeContext,
}

impl ChainRunner {
    pub fn new(registries: Registries, invoker: Arc<dyn Invoker>) -> Self {
        Self {
            registries,
            invoker,
            limits: ChainLimits::default(),
            detector: LanguageDetector::default(),
            invoke_context: InvokeContext::default(),
        }
    }

    pub fn with_limits(mut self, limits: ChainLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_detector(mut self, detector: LanguageDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_invoke_context(mut self, invoke_context: InvokeContext) -> Self {
        self.invoke_context = invoke_context;
        self
    }

    pub fn limits(&self) -> &ChainLimits {
        &self.limits
    }

    pub async fn run(&self, address: &str, request: Payload) -> ChainOutcome {
        self.run_with_cancellation(address, request, CancellationToken::new())
            .await
    }

    /// Run `address`, stopping early if `cancellation` fires.
    pub async fn run_with_cancellation(
        &self,
        address: &str,
        request: Payload,
        cancellation: CancellationToken,
    ) -> ChainOutcome {
        let parsed = match ChainAddress::parse(address) {
            Ok(parsed) => parsed,
            Err(error) => {
                let error = ChainError::from(error);
                ChainRejected {
                    address,
                    error: &error,
                }
                .log();
                return ChainOutcome::Failed(error);
            }
        };

        let context = EvaluationContext::new(Arc::clone(&self.invoker))
            .with_timeout(Duration::from_millis(self.limits.get_invoke_timeout_ms()))
            .with_invoke_context(self.invoke_context.clone())
            .with_cancellation(cancellation);

        if parsed.debug {
            let mut segments = parsed.segments;
            let format = match segments.first_mut() {
                Some(head) => {
                    let (stem, format) = split_format_extension(head);
                    let stem = stem.to_string();
                    *head = stem;
                    format
                }
                None => DebugFormat::Structured,
            };

            let report = self
                .run_debug(address, parsed.mode, &segments, request, &context, format)
                .await;
            return ChainOutcome::Debug(DebugResponse { format, report });
        }

        let outcome = match self.prepare(&parsed.segments, &mut NoopObserver) {
            Ok(mut positions) => {
                EngineFactory::for_mode(parsed.mode)
                    .evaluate(&mut positions, request, &context, &mut NoopObserver)
                    .await
            }
            Err(error) => {
                ChainRejected {
                    address,
                    error: &error,
                }
                .log();
                Err(error)
            }
        };

        match outcome {
            Ok(result) => ChainOutcome::Completed(result),
            Err(error) => ChainOutcome::Failed(error),
        }
    }

    async fn run_debug(
        &self,
        address: &str,
        mode: Mode,
        segments: &[String],
        request: Payload,
        context: &EvaluationContext,
        format: DebugFormat,
    ) -> DebugReport {
        let mut introspector = DebugIntrospector::new(mode, format);
        match self.prepare(segments, introspector.observer()) {
            Ok(mut positions) => {
                let engine = EngineFactory::for_mode(mode);
                introspector
                    .evaluate(engine.as_ref(), &mut positions, request, context)
                    .await
            }
            Err(error) => {
                ChainRejected {
                    address,
                    error: &error,
                }
                .log();
                introspector.finish(Err(error))
            }
        }
    }

    /// Classify and group raw segments into positions.
    pub fn prepare(
        &self,
        segments: &[String],
        observer: &mut dyn ExecutionObserver,
    ) -> Result<Vec<ChainPosition>, ChainError> {
        if segments.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        let max = self.limits.get_max_chain_length();
        if segments.len() > max {
            return Err(ChainError::ChainTooLong {
                length: segments.len(),
                max,
            });
        }

        let classifier = SegmentClassifier::new(
            &self.registries,
            self.detector,
            self.limits.get_max_alias_depth(),
        );
        let classified = segments
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let segment = classifier.classify(index, raw)?;
                observer.segment_classified(&segment);
                Ok(segment)
            })
            .collect::<Result<Vec<_>, ChainError>>()?;

        let positions = group_parameters(classified)?;
        observer.chain_grouped(&positions);
        Ok(positions)
    }
}
