use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use snake_tui::config::AppConfig;
use snake_tui::modes::PlayMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake-tui")]
#[command(version, about = "Terminal frontend for a grid snake simulation")]
struct Cli {
    /// World width in cells (the grid is square)
    #[arg(long, default_value = "10")]
    width: u32,

    /// Simulation ticks per second
    #[arg(long, default_value = "10")]
    fps: u32,

    /// Initial snake length in cells
    #[arg(long, default_value = "3")]
    snake_length: u32,

    /// Diagnostics log file (the terminal itself belongs to the UI)
    #[arg(long, default_value = "snake-tui.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let config = AppConfig::new(cli.width)
        .with_snake_length(cli.snake_length)
        .with_tick_hz(cli.fps);
    tracing::info!(
        width = config.world_width,
        tick_hz = config.tick_hz,
        "starting"
    );

    let mut play = PlayMode::new(config);
    play.run().await
}
