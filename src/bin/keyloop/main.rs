//! keyloop - keyboard-played generative techno loop
//!
//! Run with: cargo run -- --bpm 125 --log keyloop.log

mod app;
mod audio;
mod ui;

use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use keyloop::{KeyMode, SessionConfig};

#[derive(Debug, Parser)]
#[command(name = "keyloop", version, about = "Toggle the voices of a running techno loop from the keyboard")]
struct Args {
    /// Tempo in beats per minute
    #[arg(long)]
    bpm: Option<f64>,

    /// Seed for every random choice in the loop
    #[arg(long)]
    seed: Option<u64>,

    /// toggle: the a-h loop voices; hold: a drone octave played while held
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// TOML session file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Toggle,
    Hold,
}

impl From<Mode> for KeyMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Toggle => KeyMode::Toggle,
            Mode::Hold => KeyMode::Hold,
        }
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let config = load_config(&args)?;
    app::run(config)
}

fn init_logging(path: &Path) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn load_config(args: &Args) -> EyreResult<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
            SessionConfig::from_toml_str(&source)?
        }
        None => SessionConfig::default(),
    };

    if let Some(bpm) = args.bpm {
        config.bpm = bpm;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }

    config.validate()?;
    Ok(config)
}
