//! Screen flow integration tests driven through the headless platform.

use scubamax::events::input::{InputEvent, Key};
use scubamax::game::{Game, GameContext};
use scubamax::platform::DrawCmd;
use scubamax::platform::headless::HeadlessPlatform;
use scubamax::resources::assets::{ImageId, MusicId};
use scubamax::resources::gameconfig::GameConfig;
use scubamax::resources::spritecatalog::SpriteCatalog;
use scubamax::screens::gameplay::GamePlayScreen;
use scubamax::screens::text::TextScreen;
use scubamax::screens::{Screen, ScreenId, Screens};

fn seeded_config() -> GameConfig {
    let mut config = GameConfig::new();
    config.seed = Some(2024);
    config
}

#[test]
fn intro_space_leads_to_rules_and_leaves_later_events_queued() {
    let platform = HeadlessPlatform::new(
        640,
        480,
        [InputEvent::KeyUp(Key::Space), InputEvent::KeyUp(Key::Space)],
    );
    let probe = platform.probe();
    let mut ctx = GameContext::new(Box::new(platform), seeded_config());
    let mut intro = TextScreen::intro();
    intro.initialize(&mut ctx).unwrap();

    assert_eq!(intro.run(&mut ctx), ScreenId::Rules);
    assert_eq!(probe.pending_events(), 1);
    assert_eq!(probe.current_music(), Some(MusicId::Intro));
}

#[test]
fn full_game_from_intro_to_quit() {
    let platform = HeadlessPlatform::new(
        800,
        600,
        [
            InputEvent::KeyUp(Key::Space),
            InputEvent::KeyUp(Key::Space),
        ],
    )
    .idle(3)
    .then([InputEvent::KeyUp(Key::Escape)]);
    let probe = platform.probe();
    let mut game = Game::new(Box::new(platform), seeded_config());
    game.initialize().unwrap();

    assert_eq!(game.main_loop(), ScreenId::Quit);
    assert!(!game.context().is_enabled());
    assert_eq!(probe.pending_events(), 0);
    // Three idle polls on the play screen each end with a presented frame.
    assert_eq!(probe.frames_presented(), 3);
    // Music is stopped on the way out.
    assert_eq!(probe.current_music(), None);
}

#[test]
fn play_screen_draws_world_and_stops_animations_on_exit() {
    let platform = HeadlessPlatform::new(800, 600, []).idle(2);
    let probe = platform.probe();
    let mut ctx = GameContext::new(Box::new(platform), seeded_config());
    let catalog = SpriteCatalog::builtin().unwrap();
    let mut play = GamePlayScreen::new(&catalog).unwrap();
    play.initialize(&mut ctx).unwrap();

    // The script runs dry after two frames and the platform asks to quit.
    assert_eq!(play.run(&mut ctx), ScreenId::Quit);
    assert_eq!(play.running_animations(), 0);
    let frame = probe.last_frame().unwrap();
    assert!(frame.commands().iter().any(|c| matches!(
        c,
        DrawCmd::Sprite {
            image: ImageId::ScubaDiver01,
            ..
        }
    )));
}

#[test]
fn credits_from_any_text_screen() {
    let platform = HeadlessPlatform::new(640, 480, [InputEvent::KeyUp(Key::C)]);
    let mut ctx = GameContext::new(Box::new(platform), seeded_config());
    let catalog = SpriteCatalog::builtin().unwrap();
    let mut screens = Screens::new(&mut ctx, &catalog).unwrap();
    assert_eq!(screens.switch_to(&mut ctx, ScreenId::Rules), ScreenId::Credits);
}

#[test]
fn missing_image_fails_initialization() {
    let platform =
        HeadlessPlatform::new(640, 480, []).with_missing_image(ImageId::TreasureChest01);
    let mut game = Game::new(Box::new(platform), seeded_config());
    assert!(game.initialize().is_err());
    assert_eq!(game.main_loop(), ScreenId::Quit);
}
