// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::LocalUnitFactory;
use crate::chain::{Executable, ExecutionResult};
use crate::errors::ExecutionError;
use crate::language::{detect_convention, CallingConvention};
use crate::observability::messages::invocation::LocalUnitMissing;
use crate::observability::messages::StructuredLog;
use crate::traits::{Invoker, LocalUnit, UnitCall};

/// An [`Invoker`] that runs native Rust units in-process.
///
/// A unit's source text is taken as the name of the implementation to run,
/// so a registry entry `{ name: upper, source: change_text_case_upper }`
/// dispatches to the built-in upper-case unit.
#[derive(Default, Clone)]
pub struct LocalInvoker {
    units: BTreeMap<String, Arc<dyn LocalUnit>>,
}

impl LocalInvoker {
    /// An invoker with no units registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// An invoker with every implementation [`LocalUnitFactory`] knows.
    pub fn with_builtins() -> Self {
        let mut invoker = Self::new();
        for name in LocalUnitFactory::list_available_implementations() {
            if let Ok(unit) = LocalUnitFactory::create_unit(name) {
                invoker.register(name, unit);
            }
        }
        invoker
    }

    /// Register `unit` under `name`, replacing any previous registration.
    pub fn register(&mut self, name: impl Into<String>, unit: Arc<dyn LocalUnit>) {
        self.units.insert(name.into(), unit);
    }

    pub fn unit(&self, source: &str) -> Option<&Arc<dyn LocalUnit>> {
        self.units.get(source.trim())
    }

    pub fn unit_names(&self) -> Vec<&str> {
        self.units.keys().map(String::as_str).collect()
    }
}

#[async_trait]
impl Invoker for LocalInvoker {
    async fn invoke(&self, call: UnitCall) -> Result<ExecutionResult, ExecutionError> {
        let Some(unit) = self.unit(&call.source) else {
            let available = self.unit_names();
            LocalUnitMissing {
                implementation: call.source.trim(),
                available: &available,
            }
            .log();
            return Err(ExecutionError::Invoke(format!(
                "no local unit implementation named '{}'",
                call.source.trim()
            )));
        };

        Ok(unit.process(call.phase, call.input).await)
    }

    fn calling_convention(&self, executable: &Executable) -> CallingConvention {
        match self.unit(&executable.source) {
            Some(unit) => unit.calling_convention(),
            None => detect_convention(executable.language, &executable.source),
        }
    }
}
