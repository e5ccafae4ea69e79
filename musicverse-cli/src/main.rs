//! Musicverse CLI - interactive terminal front end for the music library
//!
//! Log in with one of the demo accounts, then browse, filter and (as admin) edit the library.

mod shell;

use anyhow::{anyhow, Context};
use clap::Parser;
use musicverse_applications::MusicApp;
use musicverse_core::{init_logging, LoggingConfig, MusicverseConfig, MusicverseResult, SlotBacking};
use shell::Shell;
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "musicverse")]
#[command(about = "A music library with demo logins")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the session credential
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Keep the session in memory only
    #[arg(long)]
    ephemeral: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = match load_config(cli.config.as_ref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            // No usable logging section, report through the defaults
            if init_logging(&LoggingConfig::default()).is_ok() {
                e.log();
            }
            return Err(e.into());
        }
    };
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().into_owned();
    }
    if cli.ephemeral {
        config.session.storage = SlotBacking::Memory;
    }
    if cli.verbose {
        config.logging = LoggingConfig::verbose();
    }

    init_logging(&config.logging).map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting Musicverse CLI v{}", env!("CARGO_PKG_VERSION"));
    match source {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => info!("No configuration file found, using defaults"),
    }

    let app = MusicApp::start(&config)
        .context("Invalid configuration after applying command-line flags")?;
    let mut shell = Shell::new(app);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout)?;

    Ok(())
}

/// Load the configuration, returning the file it came from if any
fn load_config(config_path: Option<&PathBuf>) -> MusicverseResult<(MusicverseConfig, Option<PathBuf>)> {
    if let Some(path) = config_path {
        return Ok((MusicverseConfig::from_file(path)?, Some(path.clone())));
    }

    let default_paths = [
        dirs::config_dir().map(|d| d.join("musicverse").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".musicverse").join("config.toml")),
        Some(PathBuf::from("musicverse.toml")),
    ];

    for path in default_paths.into_iter().flatten() {
        if path.exists() {
            let config = MusicverseConfig::from_file(&path)?;
            return Ok((config, Some(path)));
        }
    }

    Ok((MusicverseConfig::default(), None))
}
