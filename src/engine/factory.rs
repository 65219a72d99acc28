// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::chain::Mode;
use crate::engine::circuit::CircuitEngine;
use crate::engine::pipeline::PipelineEngine;
use crate::traits::ChainEngine;

/// Factory for creating chain engines from the address mode
pub struct EngineFactory;

impl EngineFactory {
    /// Create the engine that evaluates chains in `mode`
    pub fn for_mode(mode: Mode) -> Box<dyn ChainEngine> {
        match mode {
            Mode::Pipeline => Box::new(PipelineEngine::new()),
            Mode::Circuit => Box::new(CircuitEngine::new()),
        }
    }
}
