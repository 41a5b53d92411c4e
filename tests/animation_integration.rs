//! Animation integration tests: catalog sprites driven by worker threads.

use std::thread;
use std::time::Duration;

use scubamax::components::anchor::Anchorage;
use scubamax::components::animatedsprite::AnimatedSprite;
use scubamax::components::animation::{
    AnimationEntry, DirectionFlags, PlayMode, SpriteAnimation, StateFlags,
};
use scubamax::components::movable::Movable;
use scubamax::resources::random::RandomSource;
use scubamax::resources::spritecatalog::SpriteCatalog;
use scubamax::systems::animation::AnimationDriver;
use scubamax::systems::collision::{collides, collisions};

fn catalog_sprite(name: &str) -> AnimatedSprite {
    let catalog = SpriteCatalog::builtin().unwrap();
    AnimatedSprite::from_def(name, catalog.get(name).unwrap())
}

#[test]
fn catalog_sprite_cycles_through_its_own_row() {
    let mut boat = catalog_sprite("boat");
    boat.reset(PlayMode::Loop, StateFlags::WALK, DirectionFlags::LEFT);
    let mut rng = RandomSource::with_seed(11);
    boat.start_animation(&mut rng).unwrap();
    assert!(boat.is_animating());

    let mut seen = Vec::new();
    for _ in 0..10 {
        thread::sleep(Duration::from_millis(60));
        let tile = boat.current_tile();
        assert_eq!((tile.w, tile.h), (200, 150));
        // WALK/LEFT is tiles 0..6, the whole first row of a 6-column sheet.
        assert_eq!(tile.y, 0);
        assert!(tile.x >= 0 && tile.x <= 1000 && tile.x % 200 == 0);
        seen.push(tile.x);
    }
    boat.stop_animation();
    assert!(!boat.is_animating());
    seen.dedup();
    assert!(seen.len() > 1, "tile never changed: {:?}", seen);
}

#[test]
fn many_drivers_run_and_stop_independently() {
    let mut drivers: Vec<AnimationDriver> = (0..16)
        .map(|i| {
            let mut animation = SpriteAnimation::new(8, 16, 16).with_entries([
                AnimationEntry::new(StateFlags::SWIM, DirectionFlags::LEFT, 0, 8, 1),
            ]);
            animation.reset(PlayMode::Loop, StateFlags::SWIM, DirectionFlags::LEFT);
            AnimationDriver::new(format!("fish_{}", i), animation)
        })
        .collect();
    for (i, driver) in drivers.iter_mut().enumerate() {
        driver.start(RandomSource::with_seed(i as u64)).unwrap();
    }
    thread::sleep(Duration::from_millis(30));
    assert!(drivers.iter().all(|d| d.is_running()));

    // Stopping half leaves the other half running.
    for driver in drivers.iter_mut().step_by(2) {
        driver.stop();
    }
    assert!(drivers.iter().step_by(2).all(|d| !d.is_running()));
    assert!(drivers.iter().skip(1).step_by(2).all(|d| d.is_running()));

    for driver in drivers.iter_mut() {
        driver.stop();
    }
    assert!(drivers.iter().all(|d| !d.is_attached()));
}

#[test]
fn reset_while_running_switches_row() {
    let mut diver = catalog_sprite("scuba_diver");
    diver.reset(PlayMode::Loop, StateFlags::SWIM, DirectionFlags::LEFT);
    let mut rng = RandomSource::with_seed(5);
    diver.start_animation(&mut rng).unwrap();
    thread::sleep(Duration::from_millis(300));
    // SWIM/LEFT is tiles 48..60: the fifth row of a 12-column sheet.
    assert_eq!(diver.current_tile().y, 4 * 200);

    diver.reset(PlayMode::Loop, StateFlags::SWIM, DirectionFlags::RIGHT);
    thread::sleep(Duration::from_millis(400));
    assert_eq!(diver.current_tile().y, 5 * 200);
    assert_eq!(
        diver.state(),
        (StateFlags::SWIM, DirectionFlags::RIGHT)
    );
    diver.stop_animation();
}

#[test]
fn animated_sprites_collide_by_placement() {
    let mut diver = catalog_sprite("scuba_diver");
    let mut crab = catalog_sprite("crab");
    let mut boat = catalog_sprite("boat");
    diver.set_position_anchored(500, 500, Anchorage::CENTER);
    crab.set_position_anchored(500, 590, Anchorage::NORTH);
    boat.set_position_anchored(0, 0, Anchorage::NORTH_WEST);

    assert!(collides(&diver, &crab));
    assert!(!collides(&diver, &boat));
    assert_eq!(collisions(&diver, [&boat, &crab]), vec![1]);
    assert!(diver.collides(&crab));
}
