pub mod circuit;
pub mod context;
pub mod factory;
pub(crate) mod invocation;
pub mod pipeline;
pub mod runner;
#[cfg(test)]
pub mod integration_tests;

pub use circuit::CircuitEngine;
pub use context::EvaluationContext;
pub use factory::EngineFactory;
pub use pipeline::PipelineEngine;
pub use runner::{ChainOutcome, ChainRunner, DebugResponse};
