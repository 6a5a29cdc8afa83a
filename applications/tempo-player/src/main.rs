/// Tempo Player - music player that speeds up as each track plays
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tempo_player::{app, CliOverrides, PlayerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tempo-player")]
#[command(about = "Music player that speeds up as each track plays", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the playlist (default)
    Play(PlayArgs),
    /// Print the effective configuration as JSON
    ShowConfig(PlayArgs),
}

#[derive(clap::Args, Clone, Default)]
struct PlayArgs {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Playback rate at the start of each track
    #[arg(long)]
    start_speed: Option<f64>,

    /// Playback rate reached at the end of each track
    #[arg(long)]
    max_speed: Option<f64>,

    /// Curve exponent; below 1 ramps late, above 1 ramps early
    #[arg(long)]
    acceleration: Option<f64>,

    /// Audio files to play instead of the configured playlist
    tracks: Vec<PathBuf>,
}

impl PlayArgs {
    fn load_config(self) -> anyhow::Result<PlayerConfig> {
        let mut config =
            PlayerConfig::load(self.config.as_deref()).context("Failed to load configuration")?;

        config.apply_overrides(CliOverrides {
            start_speed: self.start_speed,
            max_speed: self.max_speed,
            acceleration: self.acceleration,
            tracks: self.tracks,
        });
        config.validate().context("Invalid configuration")?;

        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the status line
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo_player=info,tempo_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::ShowConfig(args)) => {
            let config = args.load_config()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Some(Commands::Play(args)) => {
            app::run(args.load_config()?).await?;
        }
        None => {
            app::run(cli.play.load_config()?).await?;
        }
    }

    Ok(())
}
