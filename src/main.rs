//! Scuba Max entry point.
//!
//! A small underwater arcade game written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **crossbeam-channel** worker threads for sprite animations
//!
//! # Project Structure
//!
//! - [`scubamax::components`] – sprites, layers, animations, tile maps
//! - [`scubamax::events`] – input, common key map, audio thread messages
//! - [`scubamax::game`] – shared context and the outer loop
//! - [`scubamax::platform`] – raylib and headless backends
//! - [`scubamax::resources`] – configuration, assets, random source
//! - [`scubamax::screens`] – intro, rules, credits, messages and play
//! - [`scubamax::systems`] – animation workers, collisions, audio thread
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

use scubamax::game::{GAME_NAME, Game};
use scubamax::platform::desktop::DesktopPlatform;
use scubamax::resources::gameconfig::GameConfig;

/// Scuba Max
#[derive(Parser)]
#[command(
    version,
    about = "Help Maximilian the scuba diver bring treasure back to his boat."
)]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed the random source for a reproducible game.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Start in fullscreen mode.
    #[arg(long)]
    fullscreen: bool,

    /// Start with music and sound effects disabled.
    #[arg(long)]
    mute: bool,

    /// Write the effective configuration back to the file and exit.
    #[arg(long)]
    save_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.fullscreen {
        config.fullscreen = true;
    }
    if cli.mute {
        config.music = false;
        config.sound = false;
    }

    // Early-exit: persist the configuration and quit (no window/audio needed)
    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Configuration written to {}", config.config_path.display());
        return;
    }

    info!("Starting {}", GAME_NAME);
    let platform = DesktopPlatform::new(&config);
    let mut game = Game::new(Box::new(platform), config);
    if let Err(e) = game.run() {
        error!("{}", e);
        // Drop the game first so the audio thread is joined before exiting.
        drop(game);
        std::process::exit(1);
    }
}
