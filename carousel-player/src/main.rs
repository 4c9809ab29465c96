use std::{fs, io, path::PathBuf};

use anyhow::Context;
use carousel_config::ConfigLoader;
use carousel_core::{CarouselController, InputEvent, SlideGeometry};
use carousel_player::{
    CarouselRuntime, PrintSink, ScriptCommand, parse_script,
};
use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Replay a scripted carousel session and print every track transform.
#[derive(Debug, Parser)]
#[command(name = "carousel-player", version, about)]
struct Cli {
    /// TOML file with a [carousel] table
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// .env file layered under the process environment
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Number of slides in the track
    #[arg(long, default_value_t = 5)]
    slides: usize,

    /// Measured width of the first slide in pixels
    #[arg(long, default_value_t = 400.0)]
    slide_width: f32,

    /// Session script to replay (reads stdin when omitted)
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Log every controller transition
    #[arg(short, long)]
    verbose: bool,
}

/// Default filters when `RUST_LOG` is unset: (global, player module).
fn default_levels(verbose: bool) -> (LevelFilter, LevelFilter) {
    if verbose {
        (LevelFilter::Debug, LevelFilter::Debug)
    } else {
        (LevelFilter::Warn, LevelFilter::Debug)
    }
}

fn init_logger(verbose: bool) {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
        return;
    }
    let (global, player) = default_levels(verbose);
    Builder::new()
        .target(Target::Stderr)
        .filter_level(global)
        .filter_module("carousel_player", player)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path);
    }
    let load = loader
        .load()
        .context("failed to load carousel configuration")?;

    let source = match &cli.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => io::read_to_string(io::stdin())
            .context("failed to read script from stdin")?,
    };
    let commands = parse_script(&source)?;

    let controller = CarouselController::new(
        load.config,
        SlideGeometry::new(cli.slide_width, cli.slides),
        PrintSink::stdout(),
    );
    let handle = CarouselRuntime::spawn(controller);
    let mut slide_count = cli.slides;

    for command in commands {
        match command {
            ScriptCommand::Input(event) => handle.input(event).await?,
            ScriptCommand::Swipe { from, to } => {
                handle.input(InputEvent::TouchStart { x: from }).await?;
                handle.input(InputEvent::TouchEnd { x: to }).await?;
            }
            ScriptCommand::Resize { width, count } => {
                slide_count = count.unwrap_or(slide_count);
                handle
                    .resize(SlideGeometry::new(width, slide_count))
                    .await?;
            }
            ScriptCommand::Wait(duration) => tokio::time::sleep(duration).await,
            ScriptCommand::State => {
                let snap = handle.snapshot().await?;
                println!(
                    "position={} step={} lower_bound={} slides={} hovered={} auto_advance={}",
                    snap.position,
                    snap.step,
                    snap.lower_bound,
                    snap.slide_count,
                    snap.hovered,
                    snap.timer.is_some()
                );
            }
            ScriptCommand::Quit => break,
        }
    }

    let last = handle.shutdown().await?;
    log::info!("Session ended at position {}", last.position);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_default_keeps_player_at_debug() {
        assert_eq!(
            default_levels(false),
            (LevelFilter::Warn, LevelFilter::Debug)
        );
        assert_eq!(
            default_levels(true),
            (LevelFilter::Debug, LevelFilter::Debug)
        );
    }
}
