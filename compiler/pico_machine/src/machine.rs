//! Frame driver: loads a cart, calls its hooks and handles resets.
//!
//! A cart defines any of three global hooks:
//! - `_init()` runs once from `run`
//! - `_update()` then `_draw()` run on every `tick`
//!
//! A hook that raises the reset signal (`reboot()`) makes the machine
//! discard its runtime and start over with an empty one.

use pico_eval::{MultiValue, Runtime, RuntimeConfig, RuntimeError};
use thiserror::Error;

use crate::library::{self, Host};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::prng::clock_seed;

/// Failure while loading a cart or running one of its hooks.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Load(#[from] pico_eval::Error),
    #[error("in {hook}: {source}")]
    Hook {
        hook: &'static str,
        source: RuntimeError,
    },
}

/// Outcome of a machine step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// The cart requested a reboot; the machine is now empty.
    Restarted,
}

/// Machine settings.
#[derive(Clone)]
pub struct MachineConfig {
    /// Frames `run_frames` ticks after `_init`.
    pub frames: u32,
    /// Fixed PRNG seed; the clock is used when absent.
    pub seed: Option<u32>,
    pub runtime: RuntimeConfig,
    pub printer: SharedPrintHandler,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            frames: 0,
            seed: None,
            runtime: RuntimeConfig::default(),
            printer: stdout_handler(),
        }
    }
}

impl MachineConfig {
    #[must_use]
    pub fn frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn runtime(mut self, runtime: RuntimeConfig) -> Self {
        self.runtime = runtime;
        self
    }

    #[must_use]
    pub fn printer(mut self, printer: SharedPrintHandler) -> Self {
        self.printer = printer;
        self
    }
}

pub struct Machine {
    config: MachineConfig,
    host: Host,
    runtime: Runtime,
    frame: u64,
}

impl Machine {
    pub fn new(config: MachineConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        let host = Host::new(seed, config.printer.clone());
        let runtime = fresh_runtime(&config, &host);
        Machine {
            config,
            host,
            runtime,
            frame: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Frames ticked since the last reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Evaluate cart source in the current runtime.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn load(&mut self, source: &str) -> Result<Step, MachineError> {
        match self.runtime.evaluate(source) {
            Ok(_) => Ok(Step::Continue),
            Err(err) if err.signal().is_some() => Ok(self.restart()),
            Err(err) => Err(err.into()),
        }
    }

    /// Call `_init` if the cart defines it.
    pub fn run(&mut self) -> Result<Step, MachineError> {
        self.hook("_init")
    }

    /// One frame: `_update` then `_draw`.
    pub fn tick(&mut self) -> Result<Step, MachineError> {
        self.frame += 1;
        tracing::trace!(frame = self.frame, "tick");
        if self.hook("_update")? == Step::Restarted {
            return Ok(Step::Restarted);
        }
        self.hook("_draw")
    }

    /// `run` followed by the configured number of ticks. Stops early when
    /// the cart reboots.
    pub fn run_frames(&mut self) -> Result<Step, MachineError> {
        if self.run()? == Step::Restarted {
            return Ok(Step::Restarted);
        }
        for _ in 0..self.config.frames {
            if self.tick()? == Step::Restarted {
                return Ok(Step::Restarted);
            }
        }
        Ok(Step::Continue)
    }

    /// Drop all script state and reinstall the library.
    pub fn reset(&mut self) {
        tracing::info!(frame = self.frame, "machine reset");
        self.runtime = fresh_runtime(&self.config, &self.host);
        self.frame = 0;
    }

    fn restart(&mut self) -> Step {
        self.reset();
        Step::Restarted
    }

    fn hook(&mut self, hook: &'static str) -> Result<Step, MachineError> {
        match self.runtime.execute(hook, MultiValue::new()) {
            Ok(_) => Ok(Step::Continue),
            Err(err) if err.signal().is_some() => Ok(self.restart()),
            Err(source) => Err(MachineError::Hook { hook, source }),
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new(MachineConfig::default())
    }
}

fn fresh_runtime(config: &MachineConfig, host: &Host) -> Runtime {
    let runtime = Runtime::with_config(config.runtime.clone());
    library::install(&runtime, host);
    runtime
}
