pub mod engine;
pub mod invoker;
pub mod observer;
pub mod registry;
pub mod unit;

pub use engine::ChainEngine;
pub use invoker::{InvokeContext, Invoker, UnitCall};
pub use observer::{ExecutionObserver, NoopObserver};
pub use registry::{AliasRegistry, ContentStore, Registries, UnitRecord, UnitRegistry};
pub use unit::LocalUnit;
