//! Screen state machine.
//!
//! A screen runs its own loop (events, logic, drawings) until one phase
//! returns something other than [`ScreenId::Current`]; that id tells the
//! dispatcher which screen to run next. [`Screens::switch_to`] is the only
//! place that maps ids to screens.
//!
//! Input every screen understands (quit, help, credits, the toggles) is
//! decoded by [`from_common_event`]; screens only add their own keys on top.
//!
//! # Related
//!
//! - [`crate::events::common::CommonEvent`] – the shared key map
//! - [`crate::game::Game::main_loop`] – calls the dispatcher until quit

pub mod gameplay;
pub mod message;
pub mod text;

use log::{error, info};

use crate::events::common::CommonEvent;
use crate::events::input::InputEvent;
use crate::game::{GameContext, GameError};
use crate::resources::assets::SoundId;
use crate::resources::spritecatalog::SpriteCatalog;
use crate::screens::gameplay::GamePlayScreen;
use crate::screens::message::MessageScreen;
use crate::screens::text::TextScreen;

/// Screen identifiers. `Current` means "stay on the running screen".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Current,
    Intro,
    Rules,
    LevelSelect,
    Play,
    LevelComplete,
    AllDone,
    GameOver,
    Credits,
    Quit,
}

pub trait Screen {
    /// One-time setup: sprites, layouts, text.
    fn initialize(&mut self, ctx: &mut GameContext) -> Result<(), GameError>;

    /// Prepares a fresh run. Called each time the screen is entered.
    fn reset(&mut self, ctx: &mut GameContext) -> ScreenId;

    fn do_events(&mut self, ctx: &mut GameContext) -> ScreenId;

    fn do_logic(&mut self, _ctx: &mut GameContext) -> ScreenId {
        ScreenId::Current
    }

    fn do_drawings(&mut self, ctx: &mut GameContext) -> ScreenId;

    fn on_exit(&mut self, _ctx: &mut GameContext, screen: ScreenId) -> ScreenId {
        screen
    }

    /// Loops until a phase picks another screen or the game is disabled.
    fn run(&mut self, ctx: &mut GameContext) -> ScreenId {
        let mut screen = self.reset(ctx);
        while screen == ScreenId::Current && ctx.is_enabled() {
            screen = self.do_events(ctx);
            if screen != ScreenId::Current {
                break;
            }
            screen = self.do_logic(ctx);
            if screen != ScreenId::Current {
                break;
            }
            screen = self.do_drawings(ctx);
        }
        self.on_exit(ctx, screen)
    }
}

/// Screen transition for an event every screen understands. `next` is where
/// "play" leads from the calling screen. Toggles are applied here and leave
/// the screen unchanged.
pub fn from_common_event(ctx: &mut GameContext, event: &InputEvent, next: ScreenId) -> ScreenId {
    match CommonEvent::from_input(event) {
        CommonEvent::Credits => ScreenId::Credits,
        CommonEvent::Help => ScreenId::Rules,
        CommonEvent::Intro => ScreenId::Intro,
        CommonEvent::Play => next,
        CommonEvent::Quit => ScreenId::Quit,
        CommonEvent::ToggleFullscreen => {
            ctx.toggle_fullscreen();
            ScreenId::Current
        }
        CommonEvent::ToggleMusic => {
            ctx.toggle_music();
            ScreenId::Current
        }
        CommonEvent::ToggleSound => {
            ctx.toggle_sound();
            ScreenId::Current
        }
        CommonEvent::None => ScreenId::Current,
    }
}

/// Drains pending events until one of them selects a screen. Events after
/// that one stay queued for the next screen.
pub fn from_events(ctx: &mut GameContext, next: ScreenId) -> ScreenId {
    let mut screen = ScreenId::Current;
    while screen == ScreenId::Current {
        let Some(event) = ctx.poll_event() else {
            break;
        };
        screen = from_common_event(ctx, &event, next);
    }
    screen
}

/// Every long-lived screen, and the dispatcher between them.
pub struct Screens {
    intro: TextScreen,
    rules: TextScreen,
    credits: TextScreen,
    play: GamePlayScreen,
}

impl Screens {
    pub fn new(ctx: &mut GameContext, catalog: &SpriteCatalog) -> Result<Self, GameError> {
        let mut screens = Self {
            intro: TextScreen::intro(),
            rules: TextScreen::rules(),
            credits: TextScreen::credits(),
            play: GamePlayScreen::new(catalog)?,
        };
        screens.credits.initialize(ctx)?;
        screens.play.initialize(ctx)?;
        screens.intro.initialize(ctx)?;
        screens.rules.initialize(ctx)?;
        Ok(screens)
    }

    /// Runs `screen` and returns the screen it leads to.
    pub fn switch_to(&mut self, ctx: &mut GameContext, screen: ScreenId) -> ScreenId {
        info!("Switching to screen {:?}", screen);
        match screen {
            ScreenId::Intro => self.intro.run(ctx),
            ScreenId::Rules => self.rules.run(ctx),
            ScreenId::Credits => self.credits.run(ctx),
            // Single level: level selection goes straight to play.
            ScreenId::LevelSelect | ScreenId::Play => self.play.run(ctx),
            ScreenId::GameOver => {
                ctx.emit_sound(SoundId::GameOver);
                run_message(ctx, "GAME OVER", ScreenId::Play)
            }
            ScreenId::LevelComplete => {
                ctx.emit_sound(SoundId::LevelComplete);
                run_message(ctx, "Level complete", ScreenId::Play)
            }
            ScreenId::AllDone => run_message(ctx, "All done", ScreenId::Intro),
            ScreenId::Quit => {
                ctx.quit();
                ScreenId::Quit
            }
            ScreenId::Current => {
                error!("Cannot switch to the current screen, quitting");
                ctx.quit();
                ScreenId::Quit
            }
        }
    }
}

fn run_message(ctx: &mut GameContext, title: &str, next: ScreenId) -> ScreenId {
    let mut screen = MessageScreen::new(title, next);
    match screen.initialize(ctx) {
        Ok(()) => screen.run(ctx),
        Err(e) => {
            error!("Could not show message screen: {}", e);
            ctx.quit();
            ScreenId::Quit
        }
    }
}
