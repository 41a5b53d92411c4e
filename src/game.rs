//! Game context and outer loop.
//!
//! [`GameContext`] is the state every screen shares: the platform backend,
//! the configuration, the random source, the user info notice and the
//! music/sound switches. [`Game`] owns the context and the screens, and runs
//! the screen state machine until a screen asks to quit.
//!
//! # Related
//!
//! - [`crate::screens`] – the screens and the dispatcher
//! - [`crate::platform::Platform`] – backend the context drives

use log::{error, info};
use thiserror::Error;

use crate::components::anchor::Anchorage;
use crate::components::color::Color;
use crate::components::rect::{Point, Size};
use crate::components::userinfo::UserInfo;
use crate::events::input::InputEvent;
use crate::platform::{Frame, Platform};
use crate::resources::assets::{FontId, ImageId, MusicId, SoundId};
use crate::resources::gameconfig::GameConfig;
use crate::resources::random::RandomSource;
use crate::resources::spritecatalog::SpriteCatalog;
use crate::screens::{ScreenId, Screens};

pub const GAME_NAME: &str = "Scuba Max";

/// World frame scrolled behind the viewport during play.
pub const CANVAS_WIDTH: i32 = 2000;
pub const CANVAS_HEIGHT: i32 = 1000;

pub const BACKGROUND_COLOR: Color = Color::from_rgba(0x000088ff);

pub const TITLE_COLOR: Color = Color::from_rgba(0x88ddffff);

pub const TIP_TEXT: &str = "Press spacebar to continue";
pub const TIP_COLOR: Color = Color::from_rgba(0xd2d2d2d2);

pub const TEXT_COLOR_HI: Color = Color::from_rgba(0xccddffff);
pub const TEXT_COLOR_LO: Color = Color::from_rgba(0xffee00ff);

pub const PAUSE_TEXT: &str = "GAME PAUSED";
pub const PAUSE_COLOR: Color = Color::from_rgba(0xffff66ff);

pub const USER_INFO_COLOR: Color = Color::WHITE;
pub const USER_INFO_DELAY_MS: u32 = 1000;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("image {0:?} is not loaded")]
    MissingImage(ImageId),
    #[error("sprite '{0}' is not in the catalog")]
    MissingSprite(String),
    #[error("invalid sprite catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// State shared by every screen.
pub struct GameContext {
    pub platform: Box<dyn Platform>,
    pub config: GameConfig,
    pub random: RandomSource,
    pub user_info: UserInfo,
    enabled: bool,
    allow_music: bool,
    allow_sound: bool,
    current_music: Option<MusicId>,
}

impl GameContext {
    pub fn new(platform: Box<dyn Platform>, config: GameConfig) -> Self {
        let random = match config.seed {
            Some(seed) => RandomSource::with_seed(seed),
            None => RandomSource::new(),
        };
        let mut user_info = UserInfo::new(FontId::UserInfo, USER_INFO_COLOR);
        let center = platform.viewport().center();
        user_info.set_anchorage_point(center, Anchorage::CENTER);
        Self {
            allow_music: config.music,
            allow_sound: config.sound,
            platform,
            config,
            random,
            user_info,
            enabled: true,
            current_music: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Ends the outer loop once the running screen returns.
    pub fn quit(&mut self) {
        info!("Quitting {}", GAME_NAME);
        self.enabled = false;
    }

    pub fn window_size(&self) -> Size {
        self.platform.viewport().size()
    }

    pub fn window_center(&self) -> Point {
        self.platform.viewport().center()
    }

    pub fn poll_event(&mut self) -> Option<InputEvent> {
        self.platform.poll_event()
    }

    pub fn music_allowed(&self) -> bool {
        self.allow_music
    }

    pub fn sound_allowed(&self) -> bool {
        self.allow_sound
    }

    pub fn current_music(&self) -> Option<MusicId> {
        self.current_music
    }

    /// Replaces the current track. With music disabled the new track is
    /// loaded but left paused, so enabling music resumes it.
    pub fn play_music(&mut self, music: MusicId) {
        self.stop_music();
        self.platform.play_music(music, self.config.music_volume);
        if !self.allow_music {
            self.platform.pause_music();
        }
        self.current_music = Some(music);
    }

    pub fn stop_music(&mut self) {
        if self.current_music.take().is_some() {
            self.platform.stop_music();
        }
    }

    pub fn emit_sound(&mut self, sound: SoundId) {
        if self.allow_sound {
            self.platform.play_sound(sound);
        } else {
            self.platform.halt_sounds();
        }
    }

    pub fn toggle_music(&mut self) {
        self.allow_music = !self.allow_music;
        let message = if self.allow_music {
            self.platform.resume_music();
            "music enabled"
        } else {
            self.platform.pause_music();
            "music disabled"
        };
        self.user_info
            .show(self.platform.as_ref(), message, USER_INFO_DELAY_MS);
    }

    pub fn toggle_sound(&mut self) {
        self.allow_sound = !self.allow_sound;
        let message = if self.allow_sound {
            "sound enabled"
        } else {
            self.platform.halt_sounds();
            "sound disabled"
        };
        self.user_info
            .show(self.platform.as_ref(), message, USER_INFO_DELAY_MS);
    }

    pub fn toggle_fullscreen(&mut self) {
        self.platform.toggle_fullscreen();
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.platform.set_cursor_visible(visible);
    }

    /// Adds the user info notice on top of `frame`, shows it and waits for
    /// the configured frame delay.
    pub fn present(&mut self, frame: &mut Frame) {
        self.user_info.draw(frame);
        self.platform.present(frame);
        self.platform.delay(self.config.frame_delay_ms);
    }
}

/// Owns the context and the screens.
pub struct Game {
    ctx: GameContext,
    screens: Option<Screens>,
}

impl Game {
    pub fn new(platform: Box<dyn Platform>, config: GameConfig) -> Self {
        Self {
            ctx: GameContext::new(platform, config),
            screens: None,
        }
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    /// Builds every screen. Fails if an image or a sprite definition the
    /// screens need is missing.
    pub fn initialize(&mut self) -> Result<(), GameError> {
        let catalog = SpriteCatalog::builtin()?;
        let screens = Screens::new(&mut self.ctx, &catalog)?;
        self.screens = Some(screens);
        info!("{} initialized", GAME_NAME);
        Ok(())
    }

    /// Runs screens until one of them quits. Returns the last screen id.
    pub fn main_loop(&mut self) -> ScreenId {
        let Some(screens) = self.screens.as_mut() else {
            error!("Game loop started before initialization");
            return ScreenId::Quit;
        };
        let mut screen = ScreenId::Intro;
        while self.ctx.is_enabled() {
            screen = screens.switch_to(&mut self.ctx, screen);
        }
        self.ctx.stop_music();
        screen
    }

    pub fn run(&mut self) -> Result<(), GameError> {
        self.initialize()?;
        self.main_loop();
        Ok(())
    }
}
