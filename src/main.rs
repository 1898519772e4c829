use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use playpen::frontend::{Frontend, TerminalFrontend};
use playpen::{Config, PlaygroundState};

mod cli;

use cli::Cli;

const LOG_FILE: &str = "playpen.log";

/// The terminal owns stdout and stderr, so logs go to a file.
fn init_logging() -> anyhow::Result<PathBuf> {
    let dir = dirs::cache_dir()
        .map(|dir| dir.join("playpen"))
        .unwrap_or_else(env::temp_dir);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path).with_context(|| format!("opening {}", path.display()))?;

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(path)
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let log_path = init_logging()?;
    log::info!("logging to {}", log_path.display());

    let config = Config::load(args.config.as_deref());
    let mut state = PlaygroundState::new(config);

    for path in &args.files {
        if let Err(e) = state.request_import(path) {
            state.message = Some(format!("{}: {}", path.display(), e));
        }
    }

    let mut frontend = TerminalFrontend::new();
    frontend.init()?;
    frontend.run(state)?;

    Ok(())
}
