//! The `run` command: load a cart and drive its hooks.

use crate::{Machine, MachineConfig, MachineError, Step};

use super::{read_file, report_and_exit};

/// Options accepted after `pico run <file>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub frames: u32,
    pub seed: Option<u32>,
}

/// Parse `--frames=N` and `--seed=N`; unknown flags are reported.
pub fn parse_run_options(args: &[String]) -> Result<RunOptions, String> {
    let mut options = RunOptions::default();
    for arg in args {
        if let Some(n) = arg.strip_prefix("--frames=") {
            options.frames = n
                .parse()
                .map_err(|_| format!("invalid frame count '{n}'"))?;
        } else if let Some(n) = arg.strip_prefix("--seed=") {
            options.seed = Some(n.parse().map_err(|_| format!("invalid seed '{n}'"))?);
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        }
    }
    Ok(options)
}

/// Load `path`, call `_init`, then tick the requested number of frames.
pub fn run_file(path: &str, options: &RunOptions) {
    let content = read_file(path);
    let mut config = MachineConfig::default().frames(options.frames);
    if let Some(seed) = options.seed {
        config = config.seed(seed);
    }
    let mut machine = Machine::new(config);

    let result = match machine.load(&content) {
        Ok(Step::Continue) => machine.run_frames(),
        other => other,
    };

    match result {
        Ok(Step::Continue) => {}
        Ok(Step::Restarted) => eprintln!("{path}: machine has been restarted"),
        Err(MachineError::Load(err)) => report_and_exit(path, &content, &err),
        Err(err) => {
            eprintln!("{path}: runtime error {err}");
            std::process::exit(1);
        }
    }
}
