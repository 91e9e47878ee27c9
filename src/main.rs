#![warn(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use govcon_admin::{Cli, Config, PreferencesStore, app};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to install log subscriber: {e}");
    }

    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();
    config.validate()?;

    let prefs = PreferencesStore::load_from_dir(&config.config_dir);
    app::dispatch::dispatch(cli, config, prefs).await
}
