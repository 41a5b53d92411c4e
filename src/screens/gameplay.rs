//! The play screen.
//!
//! Max the diver explores a 2000×1000 world scrolled behind the viewport.
//! Oxygen drains under water and refills at the surface; opening treasure
//! chests scores, and four chests complete the level. A golden fish shows up
//! now and then in deep water and refills oxygen when caught.
//!
//! Sprites live in two owning layers and are addressed by index:
//!
//! - `actors` – boat, treasure, crab and player, in a [`BoundedLayer`] that
//!   scrolls opposite to the player and never uncovers the viewport
//! - `wildlife` – three birds, three fish and the golden fish
//!
//! Background layers (sky, clouds, ground, ground items) follow the actors
//! layer with their own speeds. Every animated sprite runs its own driver
//! thread between [`reset`](Screen::reset) and [`on_exit`](Screen::on_exit).

use std::ops::Range;

use log::{debug, error, info};

use crate::components::anchor::Anchorage;
use crate::components::animatedsprite::AnimatedSprite;
use crate::components::animation::{DirectionFlags, PlayMode, StateFlags};
use crate::components::color::Color;
use crate::components::drawable::Drawable;
use crate::components::movable::Movable;
use crate::components::rect::{Bounded, Point, Rect, Size};
use crate::components::sprite::{Sprite, SpriteSource};
use crate::components::spritelayer::{BoundedLayer, SpriteLayer};
use crate::events::input::{InputEvent, Key};
use crate::game::{
    BACKGROUND_COLOR, CANVAS_HEIGHT, CANVAS_WIDTH, GameContext, GameError, PAUSE_COLOR,
    PAUSE_TEXT,
};
use crate::platform::Frame;
use crate::resources::assets::{FontId, ImageId, MusicId, SoundId};
use crate::resources::random::RandomSource;
use crate::resources::spritecatalog::SpriteCatalog;
use crate::screens::{Screen, ScreenId, from_common_event};
use crate::systems::collision::collides_with;

// Indices into `actors`.
const BOAT: usize = 0;
const TREASURE: usize = 1;
const CRAB: usize = 2;
const PLAYER: usize = 3;

// Indices into `wildlife`.
const BIRDS: Range<usize> = 0..3;
const FISH: Range<usize> = 3..6;
const GOLDEN_FISH: usize = 6;

const ACTOR_NAMES: [&str; 4] = ["boat", "treasure", "crab", "scuba_diver"];
const WILDLIFE_NAMES: [&str; 7] = [
    "bird_01",
    "bird_02",
    "bird_03",
    "fish_01",
    "fish_02",
    "fish_03",
    "golden_fish",
];

const CLOUD_IMAGES: [ImageId; 3] = [ImageId::Cloud01, ImageId::Cloud02, ImageId::Cloud03];
const GROUND_ITEM_IMAGES: [ImageId; 3] = [
    ImageId::GroundItem01,
    ImageId::GroundItem02,
    ImageId::GroundItem03,
];
const GROUND_ITEM_COUNT: usize = 7;

const COMMON_DY: i32 = 5;
const MAX_OXYGEN: i32 = 100;
const GOLDEN_FISH_OXYGEN: i32 = 25;
const WINNING_SCORE: u32 = 3;
const SCORE_TILE: Rect = Rect::new(600, 0, 100, 100);

pub struct GamePlayScreen {
    window: Size,
    center: Point,
    paused: bool,
    wait_sync: bool,
    oxygen: i32,
    score: u32,
    golden_fish_lifetime: i32,
    bird_index: usize,
    fish_index: usize,
    pause_sprite: Sprite,
    score_sprite: Sprite,
    sky: Sprite,
    clouds: SpriteLayer<Sprite>,
    ground: Sprite,
    ground_items: SpriteLayer<Sprite>,
    actors: BoundedLayer<AnimatedSprite>,
    wildlife: SpriteLayer<AnimatedSprite>,
}

fn animated(catalog: &SpriteCatalog, name: &str) -> Result<AnimatedSprite, GameError> {
    let def = catalog
        .get(name)
        .ok_or_else(|| GameError::MissingSprite(name.to_string()))?;
    Ok(AnimatedSprite::from_def(name, def))
}

fn image_sprite(ctx: &GameContext, image: ImageId) -> Result<Sprite, GameError> {
    Sprite::from_platform(ctx.platform.as_ref(), image).ok_or(GameError::MissingImage(image))
}

fn facing(x: i32) -> DirectionFlags {
    if x > 0 {
        DirectionFlags::RIGHT
    } else {
        DirectionFlags::LEFT
    }
}

/// Starts the sprite's animation thread. Failures are logged by the sprite.
fn start(sprite: &mut AnimatedSprite, random: &mut RandomSource) -> bool {
    sprite.start_animation(random).is_ok()
}

impl GamePlayScreen {
    /// Builds the animated sprites from `catalog`. Images are checked in
    /// [`initialize`](Screen::initialize).
    pub fn new(catalog: &SpriteCatalog) -> Result<Self, GameError> {
        let canvas = Rect::new(0, 0, CANVAS_WIDTH, CANVAS_HEIGHT);
        let mut actors = BoundedLayer::new(canvas, canvas);
        for name in ACTOR_NAMES {
            actors.layer.push(animated(catalog, name)?);
        }
        let mut wildlife = SpriteLayer::new();
        for name in WILDLIFE_NAMES {
            wildlife.push(animated(catalog, name)?);
        }
        Ok(Self {
            window: Size::default(),
            center: Point::default(),
            paused: false,
            wait_sync: false,
            oxygen: MAX_OXYGEN,
            score: 0,
            golden_fish_lifetime: 0,
            bird_index: 0,
            fish_index: 0,
            pause_sprite: Sprite::new(),
            score_sprite: Sprite::new(),
            sky: Sprite::new(),
            clouds: SpriteLayer::new(),
            ground: Sprite::new(),
            ground_items: SpriteLayer::new(),
            actors,
            wildlife,
        })
    }

    pub fn oxygen(&self) -> i32 {
        self.oxygen
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn player(&self) -> &AnimatedSprite {
        &self.actors[PLAYER]
    }

    pub fn treasure(&self) -> &AnimatedSprite {
        &self.actors[TREASURE]
    }

    /// Number of sprites whose animation driver is running.
    pub fn running_animations(&self) -> usize {
        self.actors
            .layer
            .iter()
            .chain(self.wildlife.iter())
            .filter(|s| s.is_animating())
            .count()
    }

    fn surface_y(&self) -> i32 {
        self.actors.frame_rect().top() + self.center.y
    }

    fn change_bird(&mut self, random: &mut RandomSource, anchor: Point, direction: Point) -> bool {
        for i in BIRDS {
            let bird = &mut self.wildlife[i];
            bird.sprite.visible = false;
            bird.set_position(anchor.x, anchor.y);
            bird.sprite.motion.direction = direction;
            bird.sprite.motion.set_speed(3, 0);
            bird.stop_animation();
        }
        self.bird_index = (self.bird_index + 1) % BIRDS.len();

        let top = self.actors.frame_rect().top();
        let center_y = self.center.y;
        let bird = &mut self.wildlife[BIRDS.start + self.bird_index];
        let dir_x = if direction.x > 0 { 1 } else { -1 };
        bird.sprite.motion.direction.x = dir_x;
        bird.reset(PlayMode::Loop, StateFlags::FLY, facing(dir_x));
        let size = bird.sprite.renderer_rect.size();
        let y = top + random.range(size.h / 2, center_y - size.h / 2);
        bird.set_position_anchored(anchor.x - dir_x * size.w / 2, y, Anchorage::CENTER);
        let started = start(bird, random);
        bird.sprite.visible = true;
        debug!("Bird {} enters, heading {}", self.bird_index, dir_x);
        started
    }

    fn change_fish(&mut self, random: &mut RandomSource, anchor: Point, direction: Point) -> bool {
        for i in FISH {
            let fish = &mut self.wildlife[i];
            fish.sprite.visible = false;
            fish.set_position(anchor.x, anchor.y);
            fish.sprite.motion.direction = direction;
            fish.sprite.motion.set_speed(3, 0);
            fish.stop_animation();
        }
        self.fish_index = (self.fish_index + 1) % FISH.len();

        let top = self.actors.frame_rect().top();
        let window_h = self.window.h;
        let fish = &mut self.wildlife[FISH.start + self.fish_index];
        let dir_x = if direction.x > 0 { 1 } else { -1 };
        fish.sprite.motion.direction.x = dir_x;
        fish.reset(PlayMode::Loop, StateFlags::SWIM, facing(dir_x));
        let w = fish.sprite.renderer_rect.w;
        let y = top + window_h + random.range(50, 150);
        fish.set_position_anchored(anchor.x - dir_x * w / 2, y, Anchorage::CENTER);
        let started = start(fish, random);
        fish.sprite.visible = true;
        debug!("Fish {} enters, heading {}", self.fish_index, dir_x);
        started
    }

    fn player_idle(&mut self) {
        if self.paused {
            return;
        }
        let surface_y = self.surface_y();
        let player = &mut self.actors[PLAYER];
        player.sprite.motion.set_direction(0, 0);
        let (_, direction) = player.state();
        let state = if player.anchor().y > surface_y {
            StateFlags::IDLE
        } else {
            StateFlags::ENJOY
        };
        player.reset(PlayMode::Loop, state, direction);
    }

    /// Adds `(dx, dy)` to the player's heading, one step per axis at most.
    fn player_steer(&mut self, dx: i32, dy: i32) {
        if self.paused {
            return;
        }
        let player = &mut self.actors[PLAYER];
        let motion = &mut player.sprite.motion;
        motion.direction.x = (motion.direction.x + dx).clamp(-1, 1);
        motion.direction.y = (motion.direction.y + dy).clamp(-1, 1);
        let heading = motion.direction;
        if heading == Point::new(0, 0) {
            self.player_idle();
            return;
        }
        let (_, mut direction) = player.state();
        if dx != 0 {
            direction = if heading.x < 0 {
                DirectionFlags::LEFT
            } else {
                DirectionFlags::RIGHT
            };
        }
        player.reset(PlayMode::Loop, StateFlags::SWIM, direction);
    }

    fn player_recenter(&mut self) {
        if self.paused {
            return;
        }
        let x = self.center.x;
        let player = &mut self.actors[PLAYER];
        let y = player.anchor().y;
        player.set_position(x, y);
        self.player_idle();
    }

    fn player_action(&mut self, ctx: &mut GameContext) {
        if self.paused {
            return;
        }

        if self.golden_fish_lifetime > 0
            && collides_with(&self.actors[PLAYER], self.wildlife.get(GOLDEN_FISH))
        {
            self.oxygen = (self.oxygen + GOLDEN_FISH_OXYGEN).min(MAX_OXYGEN);
            self.golden_fish_lifetime = 0;
            self.wildlife[GOLDEN_FISH].sprite.color.a = 0;
            info!("Golden fish caught, oxygen {}", self.oxygen);
        }

        if !self.wait_sync && collides_with(&self.actors[PLAYER], self.actors.layer.get(TREASURE))
        {
            self.wait_sync = true;
            self.player_idle();
            let treasure = &mut self.actors[TREASURE];
            if ctx.random.randomize(3) == 1 {
                treasure.reset(PlayMode::Sequential, StateFlags::WIN, DirectionFlags::LEFT);
                if self.score < WINNING_SCORE {
                    ctx.emit_sound(SoundId::Win);
                }
                self.score += 1;
                info!("Treasure found, score {}", self.score);
            } else {
                treasure.reset(PlayMode::Sequential, StateFlags::LOSE, DirectionFlags::LEFT);
                ctx.emit_sound(SoundId::Lose);
            }
            treasure.rewind();
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("Game {}", if self.paused { "paused" } else { "resumed" });
    }

    fn place_treasure(&mut self, random: &mut RandomSource) {
        let frame = self.actors.frame_rect();
        let x = random.range(frame.left() + 100, frame.right() - 100);
        let y = frame.bottom() - random.range(40, 100);
        self.actors[TREASURE].set_position_anchored(x, y, Anchorage::CENTER);
    }

    fn update_player(&mut self) {
        let frame = self.actors.frame_rect();
        let surface_y = self.surface_y();
        let player = &mut self.actors[PLAYER];
        player.move_step();
        let bounds = player.bounds();
        let mut idle = false;

        if bounds.right() > frame.right() {
            player.move_direction(Point::new(-1, 0));
            idle = true;
        } else if bounds.left() < frame.left() {
            player.move_direction(Point::new(1, 0));
            idle = true;
        }

        if bounds.bottom() > frame.bottom() {
            player.move_direction(Point::new(0, -1));
            idle = true;
        } else if player.anchor().y < surface_y {
            let x = player.anchor().x;
            player.set_position(x, surface_y);
            idle = true;
            if self.oxygen < MAX_OXYGEN {
                self.oxygen += 1;
            }
        }

        if idle {
            self.player_idle();
        }
    }

    fn update_treasure(&mut self, random: &mut RandomSource) {
        let treasure = &mut self.actors[TREASURE];
        let (state, _) = treasure.state();
        if state == StateFlags::IDLE || !treasure.sequence_ended() {
            return;
        }
        self.wait_sync = true;
        if treasure.sprite.color.a > 5 {
            treasure.sprite.color.a -= 5;
            return;
        }
        treasure.reset(PlayMode::Static, StateFlags::IDLE, DirectionFlags::LEFT);
        treasure.rewind();
        self.place_treasure(random);
        self.actors[TREASURE].sprite.color.a = 255;
        self.wait_sync = false;
    }

    fn update_layers(&mut self) {
        let heading = self.actors[PLAYER].direction();
        self.actors.layer.motion.direction = Point::new(-heading.x, -heading.y);
        self.actors.move_around_step();
        let world = self.actors.layer.motion;

        self.wildlife.move_direction(world.direction);
        self.sky.move_with(0, world.dy, world.direction);
        self.clouds.move_direction(world.direction);
        self.ground.move_with(0, world.dy, world.direction);
        self.ground_items.move_direction(world.direction);
    }

    fn logic_shallow_water(&mut self, ctx: &mut GameContext) -> ScreenId {
        let frame = self.actors.frame_rect();
        for cloud in self.clouds.iter_mut() {
            if ctx.random.randomize(10) != 3 {
                continue;
            }
            cloud.move_step();
            if cloud.bounds().right() > frame.right() {
                cloud.motion.direction.x = -1;
            } else if cloud.bounds().left() < frame.left() {
                cloud.motion.direction.x = 1;
            }
        }

        let bird = &mut self.wildlife[BIRDS.start + self.bird_index];
        bird.move_step();
        let bounds = bird.bounds();
        let started = if bounds.left() > frame.right() {
            self.change_bird(&mut ctx.random, frame.top_right(), Point::new(-1, 0))
        } else if bounds.right() < frame.left() {
            self.change_bird(&mut ctx.random, frame.top_left(), Point::new(1, 0))
        } else {
            true
        };
        if !started {
            return ScreenId::Quit;
        }
        ScreenId::Current
    }

    fn logic_deep_water(&mut self, ctx: &mut GameContext) -> ScreenId {
        let frame = self.actors.frame_rect();

        let crab = &mut self.actors[CRAB];
        if ctx.random.randomize(20) == 7 {
            crab.sprite.motion.dx = ctx.random.randomize(3);
            crab.sprite.motion.direction.x = ctx.random.range(-1, 1);
        }
        crab.move_step();
        if crab.bounds().right() > frame.right() {
            crab.sprite.motion.direction.x = -1;
        } else if crab.bounds().left() < frame.left() {
            crab.sprite.motion.direction.x = 1;
        }

        let fish = &mut self.wildlife[FISH.start + self.fish_index];
        fish.move_step();
        let bounds = fish.bounds();
        let started = if bounds.left() > frame.right() {
            self.change_fish(&mut ctx.random, Point::new(frame.right(), 0), Point::new(-1, 0))
        } else if bounds.right() < frame.left() {
            self.change_fish(&mut ctx.random, Point::new(frame.left(), 0), Point::new(1, 0))
        } else {
            true
        };
        if !started {
            return ScreenId::Quit;
        }

        if self.golden_fish_lifetime == 0 && ctx.random.randomize(500) == 42 {
            self.golden_fish_lifetime = 200 * ctx.random.range(1, 5);
            let dir_x = if ctx.random.randomize(1) == 1 { 1 } else { -1 };
            let x = if dir_x > 0 { 0 } else { self.window.w };
            let y = ctx.random.range(self.center.y / 2, self.center.y);
            let golden = &mut self.wildlife[GOLDEN_FISH];
            golden.sprite.motion.set_direction(dir_x, 0);
            golden.set_position_anchored(x, y, Anchorage::CENTER);
            golden.reset(PlayMode::Loop, StateFlags::SWIM, facing(dir_x));
            ctx.emit_sound(SoundId::GoldenFish);
            info!("Golden fish appears for {} frames", self.golden_fish_lifetime);
        }
        ScreenId::Current
    }

    fn oxygen_gauge(&self) -> (Rect, Color) {
        let height = 2 * self.oxygen;
        let rect = Rect::new(10, self.center.y + 100 - height, 20, height);
        let color = Color::new(
            (300 - 2 * self.oxygen).clamp(0, 255) as u8,
            (3 * self.oxygen).clamp(0, 255) as u8,
            (50 + 2 * self.oxygen).clamp(0, 255) as u8,
            200,
        );
        (rect, color)
    }
}

impl Screen for GamePlayScreen {
    fn initialize(&mut self, ctx: &mut GameContext) -> Result<(), GameError> {
        self.window = ctx.window_size();
        self.center = ctx.window_center();

        self.pause_sprite =
            Sprite::text(ctx.platform.as_ref(), FontId::Pause, PAUSE_TEXT, PAUSE_COLOR);
        self.pause_sprite
            .set_position_anchored(self.center.x, self.center.y, Anchorage::CENTER);

        // Score icons are the open chest tile of the treasure sheet.
        self.score_sprite = image_sprite(ctx, ImageId::TreasureChest01)?;
        self.score_sprite.texture_rect = SCORE_TILE;
        self.score_sprite.renderer_rect = SCORE_TILE;

        self.sky = image_sprite(ctx, ImageId::Sky01)?;

        self.clouds = SpriteLayer::new();
        for image in CLOUD_IMAGES {
            self.clouds.push(image_sprite(ctx, image)?);
        }

        self.ground = image_sprite(ctx, ImageId::Ground01)?;

        self.ground_items = SpriteLayer::new();
        for _ in 0..GROUND_ITEM_COUNT {
            let pick = ctx.random.randomize(GROUND_ITEM_IMAGES.len() as i32 - 1) as usize;
            self.ground_items
                .push(image_sprite(ctx, GROUND_ITEM_IMAGES[pick])?);
        }

        for sprite in self.actors.layer.iter().chain(self.wildlife.iter()) {
            if let SpriteSource::Image(image) = &sprite.sprite.source
                && ctx.platform.image_size(*image).is_none()
            {
                return Err(GameError::MissingImage(*image));
            }
        }

        let viewport = ctx.platform.viewport();
        self.actors
            .set_area(Rect::new(0, 0, CANVAS_WIDTH, CANVAS_HEIGHT), viewport);
        Ok(())
    }

    fn reset(&mut self, ctx: &mut GameContext) -> ScreenId {
        let music = if ctx.random.randomize(1) == 0 {
            MusicId::Play1
        } else {
            MusicId::Play2
        };
        ctx.play_music(music);
        ctx.user_info.reset(self.center, Anchorage::CENTER);

        self.paused = false;
        self.wait_sync = false;
        self.oxygen = MAX_OXYGEN;
        self.score = 0;
        let center = self.center;
        let window = self.window;

        self.sky.set_position_anchored(0, 0, Anchorage::NORTH_WEST);

        self.clouds.set_position_anchored(0, 0, Anchorage::NORTH_WEST);
        self.clouds.motion.set_speed(3, COMMON_DY);
        self.clouds.motion.set_direction(0, 0);
        for cloud in self.clouds.iter_mut() {
            let x = ctx.random.randomize(window.w);
            let y = ctx.random.range(20, center.y - 50);
            cloud.set_position_anchored(x, y, Anchorage::CENTER);
            cloud.motion.set_speed(1, 0);
            let dir_x = if ctx.random.randomize(1) == 1 { 1 } else { -1 };
            cloud.motion.set_direction(dir_x, 0);
        }

        self.actors
            .set_position_anchored(center.x, 0, Anchorage::NORTH);
        self.actors.layer.motion.set_speed(5, COMMON_DY);
        self.actors.layer.motion.set_direction(0, 0);

        self.wildlife.set_position_anchored(0, 0, Anchorage::NORTH_WEST);
        self.wildlife.motion.set_speed(7, COMMON_DY);
        self.wildlife.motion.set_direction(0, 0);

        let frame = self.actors.frame_rect();
        self.ground
            .set_position_anchored(0, frame.bottom(), Anchorage::SOUTH_WEST);

        self.ground_items
            .set_position_anchored(0, 0, Anchorage::NORTH_WEST);
        self.ground_items.motion.set_speed(5, COMMON_DY);
        self.ground_items.motion.set_direction(0, 0);
        let slot = frame.w / GROUND_ITEM_COUNT as i32;
        for (i, item) in self.ground_items.iter_mut().enumerate() {
            let x = frame.left() + i as i32 * slot + ctx.random.randomize(slot);
            let y = frame.bottom() - 10 * ctx.random.range(8, 11);
            item.set_position_anchored(x, y, Anchorage::CENTER);
        }

        let player = &mut self.actors[PLAYER];
        player.set_position_anchored(center.x / 2, center.y, Anchorage::CENTER);
        player.sprite.motion.set_speed(5, COMMON_DY);
        player.sprite.motion.set_direction(0, 0);
        player.reset(PlayMode::Loop, StateFlags::ENJOY, DirectionFlags::RIGHT);
        self.player_idle();
        let mut started = start(&mut self.actors[PLAYER], &mut ctx.random);

        let anchor = Point::new(center.x + ctx.random.range(-50, 50), 0);
        let direction = Point::new(ctx.random.randomize(1), 0);
        started &= self.change_bird(&mut ctx.random, anchor, direction);

        let boat = &mut self.actors[BOAT];
        let x = center.x + ctx.random.randomize(window.w / 4);
        boat.set_position_anchored(x, center.y - 40, Anchorage::CENTER);
        boat.reset(PlayMode::Loop, StateFlags::IDLE, DirectionFlags::LEFT);
        started &= start(boat, &mut ctx.random);

        let crab = &mut self.actors[CRAB];
        let x = ctx.random.randomize(window.w);
        crab.set_position_anchored(x, frame.bottom() - 10, Anchorage::SOUTH);
        crab.sprite.motion.set_speed(0, 0);
        crab.sprite.motion.set_direction(0, 0);
        crab.reset(PlayMode::Loop, StateFlags::IDLE, DirectionFlags::LEFT);
        started &= start(crab, &mut ctx.random);

        let direction = Point::new(ctx.random.range(-1, 1), 0);
        started &= self.change_fish(&mut ctx.random, center, direction);

        self.golden_fish_lifetime = 0;
        let golden = &mut self.wildlife[GOLDEN_FISH];
        golden.set_position_anchored(center.x, center.y, Anchorage::CENTER);
        golden.sprite.color.a = 0;
        golden.sprite.motion.set_speed(3, 0);
        golden.sprite.motion.set_direction(0, 0);
        golden.reset(PlayMode::Loop, StateFlags::SWIM, DirectionFlags::LEFT);
        started &= start(golden, &mut ctx.random);

        self.place_treasure(&mut ctx.random);
        let treasure = &mut self.actors[TREASURE];
        treasure.sprite.motion.set_speed(0, 0);
        treasure.sprite.motion.set_direction(0, 0);
        treasure.sprite.color.a = 255;
        treasure.reset(PlayMode::Static, StateFlags::IDLE, DirectionFlags::LEFT);
        treasure.rewind();
        started &= start(treasure, &mut ctx.random);

        if !started {
            error!("Play screen could not start its animations");
            return ScreenId::Quit;
        }
        ScreenId::Current
    }

    fn do_events(&mut self, ctx: &mut GameContext) -> ScreenId {
        while let Some(event) = ctx.poll_event() {
            // "Play" keys double as player keys here, so they keep the screen.
            let screen = from_common_event(ctx, &event, ScreenId::Current);
            if screen != ScreenId::Current {
                return screen;
            }
            match event {
                InputEvent::MouseMotion => ctx.set_cursor_visible(true),
                InputEvent::KeyUp(key) => {
                    ctx.set_cursor_visible(false);
                    match key {
                        Key::Left => self.player_steer(-1, 0),
                        Key::Right => self.player_steer(1, 0),
                        Key::Up => self.player_steer(0, -1),
                        Key::Down => self.player_steer(0, 1),
                        Key::Space | Key::RightCtrl => self.player_action(ctx),
                        Key::RightShift => self.player_idle(),
                        Key::Return => self.player_recenter(),
                        Key::P => self.toggle_pause(),
                        _ => {}
                    }
                }
                _ => {}
            }
        }
        ScreenId::Current
    }

    fn do_logic(&mut self, ctx: &mut GameContext) -> ScreenId {
        if self.paused {
            return ScreenId::Current;
        }

        self.update_player();

        let deep = self.actors[PLAYER].anchor().y > self.surface_y();
        if !deep && self.oxygen < MAX_OXYGEN {
            self.oxygen += 1;
        } else if ctx.random.randomize(10) == 3 {
            self.oxygen -= 1;
        }
        if self.oxygen <= 0 {
            info!("Out of oxygen");
            return ScreenId::GameOver;
        }

        if self.golden_fish_lifetime > 0 {
            self.golden_fish_lifetime -= 1;
            let lifetime = self.golden_fish_lifetime;
            let golden = &mut self.wildlife[GOLDEN_FISH];
            golden.sprite.color.a = if lifetime <= 50 {
                (10 * (lifetime / 10)) as u8
            } else {
                255
            };
            golden.move_step();
        }

        if self.score > WINNING_SCORE {
            return ScreenId::LevelComplete;
        }
        self.update_treasure(&mut ctx.random);

        self.update_layers();

        if self.actors.frame_rect().top() > -self.center.y {
            self.logic_shallow_water(ctx)
        } else {
            self.logic_deep_water(ctx)
        }
    }

    fn do_drawings(&mut self, ctx: &mut GameContext) -> ScreenId {
        let mut frame = Frame::new();
        frame.clear(BACKGROUND_COLOR);
        self.sky.draw(&mut frame);
        self.clouds.draw(&mut frame);
        self.ground.draw(&mut frame);
        self.ground_items.draw(&mut frame);
        self.actors.draw(&mut frame);
        self.wildlife.draw(&mut frame);

        if self.paused {
            self.pause_sprite.draw(&mut frame);
        }

        let step = self.score_sprite.renderer_rect.w - 10;
        for i in 0..self.score as i32 {
            self.score_sprite
                .set_position_anchored(self.window.w - i * step, 0, Anchorage::NORTH_EAST);
            self.score_sprite.draw(&mut frame);
        }

        let (gauge, color) = self.oxygen_gauge();
        frame.fill_rect(gauge, color);
        frame.stroke_rect(Rect::new(10, self.center.y - 100, 20, 200), Color::RED);

        ctx.present(&mut frame);
        ScreenId::Current
    }

    fn on_exit(&mut self, _ctx: &mut GameContext, screen: ScreenId) -> ScreenId {
        for sprite in self.actors.layer.iter_mut().chain(self.wildlife.iter_mut()) {
            sprite.stop_animation();
        }
        screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::DrawCmd;
    use crate::platform::headless::{HeadlessPlatform, HeadlessProbe};
    use crate::resources::gameconfig::GameConfig;

    fn setup(platform: HeadlessPlatform) -> (GameContext, GamePlayScreen, HeadlessProbe) {
        let probe = platform.probe();
        let mut config = GameConfig::new();
        config.seed = Some(11);
        let mut ctx = GameContext::new(Box::new(platform), config);
        let catalog = SpriteCatalog::builtin().unwrap();
        let mut screen = GamePlayScreen::new(&catalog).unwrap();
        screen.initialize(&mut ctx).unwrap();
        (ctx, screen, probe)
    }

    fn headless() -> HeadlessPlatform {
        HeadlessPlatform::new(640, 480, [])
    }

    fn dive(screen: &mut GamePlayScreen) {
        let x = screen.actors[PLAYER].anchor().x;
        screen.actors[PLAYER].set_position(x, 700);
    }

    #[test]
    fn test_missing_image_fails_initialize() {
        let mut ctx = GameContext::new(
            Box::new(headless().with_missing_image(ImageId::Crab01)),
            GameConfig::new(),
        );
        let catalog = SpriteCatalog::builtin().unwrap();
        let mut screen = GamePlayScreen::new(&catalog).unwrap();
        assert!(matches!(
            screen.initialize(&mut ctx),
            Err(GameError::MissingImage(ImageId::Crab01))
        ));
    }

    #[test]
    fn test_missing_catalog_entry() {
        let catalog = SpriteCatalog::from_json("{}").unwrap();
        assert!(matches!(
            GamePlayScreen::new(&catalog),
            Err(GameError::MissingSprite(name)) if name == "boat"
        ));
    }

    #[test]
    fn test_reset_starts_drivers_and_exit_stops_them() {
        let (mut ctx, mut screen, probe) = setup(headless());
        assert_eq!(screen.reset(&mut ctx), ScreenId::Current);
        // Player, boat, crab, treasure, golden fish, one bird and one fish.
        assert_eq!(screen.running_animations(), 7);
        assert!(matches!(
            probe.current_music(),
            Some(MusicId::Play1 | MusicId::Play2)
        ));
        assert_eq!(screen.on_exit(&mut ctx, ScreenId::Quit), ScreenId::Quit);
        assert_eq!(screen.running_animations(), 0);
    }

    #[test]
    fn test_reset_quits_when_animations_cannot_start() {
        let (mut ctx, mut screen, _) = setup(headless());
        assert_eq!(screen.reset(&mut ctx), ScreenId::Current);
        // Entering again without leaving finds the threads still attached.
        assert_eq!(screen.reset(&mut ctx), ScreenId::Quit);
        screen.on_exit(&mut ctx, ScreenId::Quit);
        assert_eq!(screen.running_animations(), 0);
    }

    #[test]
    fn test_world_starts_clamped_to_viewport() {
        let (mut ctx, mut screen, _) = setup(headless());
        screen.reset(&mut ctx);
        let frame = screen.actors.frame_rect();
        assert_eq!(frame, Rect::new(320 - 1000, 0, 2000, 1000));
        // Swimming up at the top edge cannot uncover the viewport.
        screen.actors[PLAYER].sprite.motion.set_direction(0, -1);
        screen.update_layers();
        assert_eq!(screen.actors.frame_rect().top(), 0);
        assert_eq!(screen.actors.layer.motion.direction.y, 0);
        screen.on_exit(&mut ctx, ScreenId::Quit);
    }

    #[test]
    fn test_steering_sets_swim_state() {
        let (mut ctx, mut screen, _) = setup(headless());
        screen.reset(&mut ctx);
        screen.player_steer(1, 0);
        assert_eq!(screen.player().direction(), Point::new(1, 0));
        assert_eq!(
            screen.player().state(),
            (StateFlags::SWIM, DirectionFlags::RIGHT)
        );
        screen.player_steer(0, 1);
        assert_eq!(screen.player().direction(), Point::new(1, 1));
        screen.player_steer(0, -1);
        screen.player_steer(-1, 0);
        // Back to still at the surface: the diver enjoys the sun.
        assert_eq!(screen.player().direction(), Point::new(0, 0));
        assert_eq!(screen.player().state().0, StateFlags::ENJOY);
        screen.on_exit(&mut ctx, ScreenId::Quit);
    }

    #[test]
    fn test_oxygen_runs_out_under_water() {
        let (mut ctx, mut screen, _) = setup(headless());
        screen.reset(&mut ctx);
        dive(&mut screen);
        screen.oxygen = 1;
        let mut outcome = ScreenId::Current;
        for _ in 0..1000 {
            outcome = screen.do_logic(&mut ctx);
            if outcome != ScreenId::Current {
                break;
            }
        }
        assert_eq!(outcome, ScreenId::GameOver);
        screen.on_exit(&mut ctx, outcome);
    }

    #[test]
    fn test_surface_refills_oxygen() {
        let (mut ctx, mut screen, _) = setup(headless());
        screen.reset(&mut ctx);
        screen.oxygen = 50;
        screen.do_logic(&mut ctx);
        assert_eq!(screen.oxygen(), 51);
        screen.on_exit(&mut ctx, ScreenId::Quit);
    }

    #[test]
    fn test_fourth_chest_completes_level() {
        let (mut ctx, mut screen, _) = setup(headless());
        screen.reset(&mut ctx);
        screen.score = WINNING_SCORE + 1;
        assert_eq!(screen.do_logic(&mut ctx), ScreenId::LevelComplete);
        screen.on_exit(&mut ctx, ScreenId::LevelComplete);
    }

    #[test]
    fn test_pause_freezes_logic_and_controls() {
        let (mut ctx, mut screen, _) = setup(headless());
        screen.reset(&mut ctx);
        dive(&mut screen);
        screen.oxygen = 50;
        screen.toggle_pause();
        for _ in 0..200 {
            assert_eq!(screen.do_logic(&mut ctx), ScreenId::Current);
        }
        screen.player_steer(1, 0);
        assert_eq!(screen.oxygen(), 50);
        assert_eq!(screen.player().direction(), Point::new(0, 0));
        screen.toggle_pause();
        assert!(!screen.is_paused());
        screen.on_exit(&mut ctx, ScreenId::Quit);
    }

    #[test]
    fn test_opening_treasure_plays_once() {
        let (mut ctx, mut screen, probe) = setup(headless());
        screen.reset(&mut ctx);
        let chest = screen.treasure().anchor();
        screen.actors[PLAYER].set_position(chest.x, chest.y);
        screen.player_action(&mut ctx);
        let (state, _) = screen.treasure().state();
        assert!(state == StateFlags::WIN || state == StateFlags::LOSE);
        assert!(!screen.treasure().sequence_ended());
        let sounds = probe.sounds_played();
        assert_eq!(sounds.len(), 1);
        assert!(matches!(sounds[0], SoundId::Win | SoundId::Lose));
        // The chest is busy until it respawns.
        screen.player_action(&mut ctx);
        assert_eq!(probe.sounds_played().len(), 1);
        screen.on_exit(&mut ctx, ScreenId::Quit);
    }

    #[test]
    fn test_oxygen_gauge_shape() {
        let (_, mut screen, _) = setup(headless());
        screen.oxygen = 100;
        let (rect, color) = screen.oxygen_gauge();
        assert_eq!(rect, Rect::new(10, 140, 20, 200));
        assert_eq!(color, Color::new(100, 255, 250, 200));
        screen.oxygen = 0;
        assert_eq!(screen.oxygen_gauge().0.h, 0);
    }

    #[test]
    fn test_drawings_show_score_icons_and_pause_text() {
        let (mut ctx, mut screen, probe) = setup(headless());
        screen.reset(&mut ctx);
        screen.score = 2;
        screen.toggle_pause();
        screen.do_drawings(&mut ctx);
        let frame = probe.last_frame().unwrap();
        let icons = frame
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::Sprite { source, .. } if *source == SCORE_TILE))
            .count();
        assert_eq!(icons, 2);
        assert!(frame.commands().iter().any(|c| matches!(
            c,
            DrawCmd::Text { text, .. } if text == PAUSE_TEXT
        )));
        screen.on_exit(&mut ctx, ScreenId::Quit);
    }
}
