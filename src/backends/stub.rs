// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test doubles for engine and runner tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::local::LocalInvoker;
use crate::chain::{
    group_parameters, ChainPosition, Executable, ExecutionResult, PathSegment, Phase,
    ResolutionMetadata, SegmentKind,
};
use crate::config::RegistrySnapshot;
use crate::errors::ExecutionError;
use crate::language::{detect_convention, CallingConvention, Language};
use crate::traits::{InvokeContext, Invoker, UnitCall, UnitRecord};

/// Short unit names used throughout the tests and the built-in source each
/// one runs. Any other name is used as its own source.
const TEST_UNITS: &[(&str, &str)] = &[
    ("upper", "change_text_case_upper"),
    ("lower", "change_text_case_lower"),
    ("reverse", "reverse_text"),
    ("echo", "echo"),
    ("wrap", "prefix_suffix_adder"),
    ("count", "word_count"),
];

fn source_for(name: &str) -> &str {
    TEST_UNITS
        .iter()
        .find(|(short, _)| *short == name)
        .map_or(name, |(_, source)| *source)
}

/// One invocation as the invoker saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub source: String,
    pub phase: Phase,
    pub request: String,
    pub parameters: Vec<String>,
    pub response: Option<String>,
    pub context: InvokeContext,
}

#[derive(Debug, Clone)]
enum Script {
    /// Report `message` as a unit error on every call.
    Fail(String),
    /// Forward the request, then report `message` in the response phase.
    FailResponse(String),
    Return(ExecutionResult),
    /// Sleep, then echo the request back.
    Delay(Duration),
}

/// An invoker that records every call and can script per-source behaviour.
///
/// Unscripted sources are handed to a [`LocalInvoker`] with the built-in units.
pub struct RecordingInvoker {
    local: LocalInvoker,
    scripts: HashMap<String, Script>,
    conventions: HashMap<String, CallingConvention>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingInvoker {
    /// Built-in units plus `json`, which answers `{}` as `application/json`.
    pub fn builtin() -> Self {
        Self {
            local: LocalInvoker::with_builtins(),
            scripts: HashMap::new(),
            conventions: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
        .returning("json", ExecutionResult::ok("{}").with_content_type("application/json"))
    }

    pub fn failing(mut self, source: &str, message: &str) -> Self {
        self.scripts.insert(source.to_string(), Script::Fail(message.to_string()));
        self
    }

    pub fn failing_response(mut self, source: &str, message: &str) -> Self {
        self.scripts
            .insert(source.to_string(), Script::FailResponse(message.to_string()));
        self
    }

    pub fn returning(mut self, source: &str, result: ExecutionResult) -> Self {
        self.scripts.insert(source.to_string(), Script::Return(result));
        self
    }

    pub fn slow(mut self, source: &str, delay: Duration) -> Self {
        self.scripts.insert(source.to_string(), Script::Delay(delay));
        self
    }

    pub fn two_phase(mut self, source: &str) -> Self {
        self.conventions
            .insert(source.to_string(), CallingConvention::TwoPhase);
        self
    }

    pub fn single_invocation(mut self, source: &str) -> Self {
        self.conventions
            .insert(source.to_string(), CallingConvention::SingleInvocation);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Sources in invocation order.
    pub fn sources(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.source).collect()
    }
}

#[async_trait]
impl Invoker for RecordingInvoker {
    async fn invoke(&self, call: UnitCall) -> Result<ExecutionResult, ExecutionError> {
        self.calls.lock().unwrap().push(RecordedCall {
            source: call.source.to_string(),
            phase: call.phase,
            request: call.input.request.text().into_owned(),
            parameters: call.input.parameters.clone(),
            response: call.input.response.as_ref().map(|r| r.text().into_owned()),
            context: call.context.clone(),
        });

        match self.scripts.get(call.source.as_ref()) {
            Some(Script::Fail(message)) => Ok(ExecutionResult::failed(500, message.clone())),
            Some(Script::FailResponse(message)) => match call.phase {
                Phase::Response => Ok(ExecutionResult::failed(500, message.clone())),
                _ => Ok(ExecutionResult::ok(call.input.request.body)),
            },
            Some(Script::Return(result)) => Ok(result.clone()),
            Some(Script::Delay(delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(ExecutionResult::ok(call.input.request.body))
            }
            None => self.local.invoke(call).await,
        }
    }

    fn calling_convention(&self, executable: &Executable) -> CallingConvention {
        if let Some(convention) = self.conventions.get(executable.source.as_ref()) {
            return *convention;
        }
        if self.local.unit(&executable.source).is_some() {
            return self.local.calling_convention(executable);
        }
        detect_convention(executable.language, &executable.source)
    }
}

/// Build grouped positions from `(unit, parameters)` pairs.
///
/// Segment indices run through units and parameters alike, as they would for
/// a parsed address.
pub fn positions_for(chain: &[(&str, &[&str])]) -> Vec<ChainPosition> {
    let mut segments = Vec::new();
    for (name, parameters) in chain {
        let executable = Executable {
            target: name.to_string(),
            source: Arc::from(source_for(name)),
            language: Language::Python,
        };
        segments.push(PathSegment::resolved(
            segments.len(),
            name,
            SegmentKind::Unit,
            executable,
            ResolutionMetadata::default(),
        ));
        for parameter in parameters.iter() {
            segments.push(PathSegment::parameter(segments.len(), parameter));
        }
    }
    group_parameters(segments).unwrap()
}

/// Registries holding the short test unit names plus the given extra units,
/// each of which runs the source of the same name.
pub fn test_snapshot(extra_units: &[&str]) -> RegistrySnapshot {
    let mut snapshot = RegistrySnapshot::new();
    for (name, source) in TEST_UNITS {
        snapshot.insert_unit(name, UnitRecord::new(*source));
    }
    for name in extra_units {
        snapshot.insert_unit(name, UnitRecord::new(*name));
    }
    snapshot
}
