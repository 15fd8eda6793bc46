//! Runtime configuration and builder.

use pico_value::Value;

use super::Runtime;

/// Default limit on nested script calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// Tunables for a `Runtime`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Nested script calls allowed before `RuntimeError::StackOverflow`.
    pub max_call_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl RuntimeConfig {
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

/// Builder for a `Runtime` with bindings preinstalled.
#[derive(Default)]
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    bindings: Vec<(String, Value)>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    /// Queue a global binding.
    #[must_use]
    pub fn define(mut self, name: impl Into<String>, value: Value) -> Self {
        self.bindings.push((name.into(), value));
        self
    }

    pub fn build(self) -> Runtime {
        let runtime = Runtime::with_config(self.config);
        runtime.define(self.bindings);
        runtime
    }
}
