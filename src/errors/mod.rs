// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod alias;
mod chain;
mod classification;
mod config;
mod execution;
mod language;

pub use alias::{AliasError, CycleError};
pub use chain::{AddressError, ChainError};
pub use classification::ClassificationError;
pub use config::{ConfigError, ValidationError};
pub use execution::ExecutionError;
pub use language::LanguageError;
