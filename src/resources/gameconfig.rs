//! Game configuration.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 640
//! height = 480
//! fullscreen = false
//!
//! [game]
//! frame_delay_ms = 30
//! assets_dir = ./assets
//! seed = 1234
//! music_volume = 0.5
//! music = true
//! sound = true
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },
    #[error("cannot parse configuration: {0}")]
    Parse(String),
    #[error("cannot write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 640;
const DEFAULT_WINDOW_HEIGHT: u32 = 480;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_FRAME_DELAY_MS: u32 = 30;
const DEFAULT_ASSETS_DIR: &str = "./assets";
const DEFAULT_MUSIC_VOLUME: f32 = 0.5;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration.
///
/// Stores window settings, pacing, asset location and the audio switches.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Fixed pause after each presented frame.
    pub frame_delay_ms: u32,
    /// Directory holding `images/`, `fonts/`, `music/` and `sounds/`.
    pub assets_dir: PathBuf,
    /// Random seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Music volume in `[0, 1]`.
    pub music_volume: f32,
    /// Music enabled at startup.
    pub music: bool,
    /// Sound effects enabled at startup.
    pub sound: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            fullscreen: DEFAULT_FULLSCREEN,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            seed: None,
            music_volume: DEFAULT_MUSIC_VOLUME,
            music: true,
            sound: true,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|reason| ConfigError::Read {
                path: self.config_path.clone(),
                reason,
            })?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} window, fullscreen={}, frame delay={}ms, assets={:?}, seed={:?}",
            self.window_width,
            self.window_height,
            self.fullscreen,
            self.frame_delay_ms,
            self.assets_dir,
            self.seed
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(ConfigError::Parse)?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [game] section
        if let Some(delay) = config.getuint("game", "frame_delay_ms").ok().flatten() {
            self.frame_delay_ms = delay as u32;
        }
        if let Some(dir) = config.get("game", "assets_dir") {
            self.assets_dir = PathBuf::from(dir);
        }
        if let Some(seed) = config.getuint("game", "seed").ok().flatten() {
            self.seed = Some(seed);
        }
        if let Some(volume) = config.getfloat("game", "music_volume").ok().flatten() {
            self.music_volume = (volume as f32).clamp(0.0, 1.0);
        }
        if let Some(music) = config.getbool("game", "music").ok().flatten() {
            self.music = music;
        }
        if let Some(sound) = config.getbool("game", "sound").ok().flatten() {
            self.sound = sound;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        // [game] section
        config.set(
            "game",
            "frame_delay_ms",
            Some(self.frame_delay_ms.to_string()),
        );
        config.set(
            "game",
            "assets_dir",
            Some(self.assets_dir.display().to_string()),
        );
        if let Some(seed) = self.seed {
            config.set("game", "seed", Some(seed.to_string()));
        }
        config.set("game", "music_volume", Some(self.music_volume.to_string()));
        config.set("game", "music", Some(self.music.to_string()));
        config.set("game", "sound", Some(self.sound.to_string()));

        config
            .write(&self.config_path)
            .map_err(|source| ConfigError::Write {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Full path of an asset file.
    pub fn asset_path(&self, file_name: &str) -> PathBuf {
        self.assets_dir.join(file_name)
    }
}
