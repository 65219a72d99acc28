use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::chain::{Executable, ExecutionResult, Phase, UnitInput};
use crate::errors::ExecutionError;
use crate::language::{detect_convention, CallingConvention, Language};

/// Opaque key/value context passed through to every invocation untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeContext(Arc<BTreeMap<String, String>>);

impl InvokeContext {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self(Arc::new(values))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One call across the invocation boundary.
#[derive(Debug, Clone)]
pub struct UnitCall {
    pub source: Arc<str>,
    pub language: Language,
    /// Lets a two-phase unit tell its request phase from a single call.
    pub phase: Phase,
    pub input: UnitInput,
    pub context: InvokeContext,
}

/// Runs unit source in a sandbox and returns its result.
///
/// The engines never execute code themselves; everything goes through this
/// boundary. Implementations must tolerate concurrent calls.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, call: UnitCall) -> Result<ExecutionResult, ExecutionError>;

    /// How the unit expects to be called. Defaults to inspecting the source.
    fn calling_convention(&self, executable: &Executable) -> CallingConvention {
        detect_convention(executable.language, &executable.source)
    }
}
