// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // invoker backends
pub mod chain;      // addresses, segments, positions
pub mod config;     // config + registry snapshot
pub mod debug;      // debug traces and rendering
pub mod engine;     // pipeline and circuit engines
pub mod errors;     // error handling
pub mod language;   // language and calling convention detection
pub mod observability;
pub mod traits;     // unified abstractions
