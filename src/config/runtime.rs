// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::local::LocalInvoker;
use crate::config::{validate_config, Config, RegistrySnapshot};
use crate::engine::ChainRunner;
use crate::errors::ConfigError;
use crate::language::LanguageDetector;
use crate::traits::{InvokeContext, Invoker};

/// Chain runtime builder - turns configuration into a ready [`ChainRunner`].
///
/// The builder validates the configuration, freezes the registries into a
/// snapshot and wires them to an invoker together with the configured limits,
/// default language and invoke context.
///
/// # Examples
///
/// ## Building a runner with the local invoker
/// ```
/// use the_chainwork::chain::Payload;
/// use the_chainwork::config::{Config, RuntimeBuilder};
/// use the_chainwork::engine::ChainOutcome;
///
/// let config: Config = serde_yaml::from_str(
///     "units:\n  - name: upper\n    source: change_text_case_upper\n  - name: echo\n    source: echo\n",
/// )
/// .unwrap();
/// let runner = RuntimeBuilder::from_config(&config).unwrap();
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// match runner.run("/pipeline/upper/echo/hello", Payload::default()).await {
///     ChainOutcome::Completed(result) => assert_eq!(result.text(), "HELLO"),
///     other => panic!("unexpected outcome: {:?}", other),
/// }
/// # });
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a runner backed by the built-in local units.
    pub fn from_config(cfg: &Config) -> Result<ChainRunner, ConfigError> {
        Self::with_invoker(cfg, Arc::new(LocalInvoker::with_builtins()))
    }

    /// Build a runner that sends every invocation to `invoker`.
    pub fn with_invoker(cfg: &Config, invoker: Arc<dyn Invoker>) -> Result<ChainRunner, ConfigError> {
        validate_config(cfg).map_err(ConfigError::Validation)?;

        let detector = cfg
            .default_language
            .map(LanguageDetector::new)
            .unwrap_or_default();

        Ok(ChainRunner::new(RegistrySnapshot::from_config(cfg).into_registries(), invoker)
            .with_limits(cfg.limits.clone())
            .with_detector(detector)
            .with_invoke_context(InvokeContext::new(cfg.context.clone())))
    }
}
