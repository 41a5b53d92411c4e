//! Animated sprite.
//!
//! An [`AnimatedSprite`] is a [`Sprite`] whose source region is chosen by an
//! [`AnimationDriver`]. Positioning and collision go through the inner
//! sprite; the source rectangle comes from the driver's published frame.
//!
//! # Related
//!
//! - [`crate::systems::animation`] – the driver and its worker thread
//! - [`crate::resources::spritecatalog`] – sheet layouts and entry tables

use std::sync::MutexGuard;

use log::error;

use crate::components::animation::{
    AnimationEntry, DirectionFlags, PlayMode, SpriteAnimation, StateFlags,
};
use crate::components::color::Color;
use crate::components::drawable::Drawable;
use crate::components::movable::{Motion, Movable};
use crate::components::rect::{Bounded, Rect, Size};
use crate::components::sprite::Sprite;
use crate::platform::Frame;
use crate::resources::assets::ImageId;
use crate::resources::random::RandomSource;
use crate::resources::spritecatalog::SpriteDef;
use crate::systems::animation::AnimationDriver;
use crate::systems::worker::WorkerError;

pub struct AnimatedSprite {
    pub sprite: Sprite,
    driver: AnimationDriver,
}

impl AnimatedSprite {
    /// A sprite showing one `tile_width` x `tile_height` tile of a sheet
    /// `columns` tiles wide.
    pub fn new(
        name: impl Into<String>,
        image: ImageId,
        columns: u32,
        tile_width: u32,
        tile_height: u32,
    ) -> Self {
        let sprite = Sprite::with_image(image, Size::new(tile_width as i32, tile_height as i32));
        let animation = SpriteAnimation::new(columns, tile_width, tile_height);
        Self {
            sprite,
            driver: AnimationDriver::new(name, animation),
        }
    }

    pub fn from_def(name: impl Into<String>, def: &SpriteDef) -> Self {
        let animated = Self::new(name, def.image, def.columns, def.tile_width, def.tile_height);
        animated.lock().extend(def.animations.iter().copied());
        animated
    }

    pub fn name(&self) -> &str {
        self.driver.name()
    }

    /// Exclusive access to the animation state.
    pub fn lock(&self) -> MutexGuard<'_, SpriteAnimation> {
        self.driver.lock()
    }

    pub fn push_animation(&self, entry: AnimationEntry) {
        self.lock().push(entry);
    }

    pub fn reset(&self, play_mode: PlayMode, state: StateFlags, direction: DirectionFlags) {
        self.driver.reset(play_mode, state, direction);
    }

    pub fn state(&self) -> (StateFlags, DirectionFlags) {
        let animation = self.lock();
        (animation.state, animation.direction)
    }

    pub fn sequence_ended(&self) -> bool {
        self.lock().sequence_ended
    }

    /// Restarts the current run from its first tile and shows it right away.
    pub fn rewind(&self) {
        self.lock().rewind();
        self.driver.sync_frame();
    }

    pub fn start_animation(&mut self, rng: &mut RandomSource) -> Result<(), WorkerError> {
        self.driver.start(rng.fork()).inspect_err(|e| {
            error!("Could not start animation of '{}': {}", self.driver.name(), e);
        })
    }

    pub fn stop_animation(&mut self) {
        self.driver.stop();
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_running()
    }

    /// Source rectangle as of the last published frame.
    pub fn current_tile(&self) -> Rect {
        let offset = self.driver.current_frame();
        Rect::new(
            offset.x,
            offset.y,
            self.sprite.texture_rect.w,
            self.sprite.texture_rect.h,
        )
    }

    pub fn collides<B: Bounded + ?Sized>(&self, other: &B) -> bool {
        self.sprite.renderer_rect.intersects(&other.bounds())
    }
}

impl Movable for AnimatedSprite {
    fn motion(&self) -> &Motion {
        &self.sprite.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.sprite.motion
    }

    fn update_position(&mut self) {
        self.sprite.update_position();
    }
}

impl Drawable for AnimatedSprite {
    fn is_visible(&self) -> bool {
        self.sprite.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.sprite.visible = visible;
    }

    fn color(&self) -> Color {
        self.sprite.color
    }

    fn draw_tinted(&self, frame: &mut Frame, tint: Color) {
        self.sprite.draw_region(frame, self.current_tile(), tint);
    }
}

impl Bounded for AnimatedSprite {
    fn bounds(&self) -> Rect {
        self.sprite.renderer_rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::DrawCmd;
    use std::thread;
    use std::time::Duration;

    fn treasure() -> AnimatedSprite {
        let s = AnimatedSprite::new("treasure", ImageId::TreasureChest01, 7, 100, 100);
        s.push_animation(AnimationEntry::new(
            StateFlags::WIN,
            DirectionFlags::LEFT,
            0,
            7,
            1,
        ));
        s
    }

    #[test]
    fn test_sequential_win_ends_on_last_tile() {
        let mut s = treasure();
        let mut rng = RandomSource::with_seed(3);
        s.reset(PlayMode::Sequential, StateFlags::WIN, DirectionFlags::LEFT);
        s.start_animation(&mut rng).unwrap();
        thread::sleep(Duration::from_millis(60));
        s.stop_animation();
        assert!(s.sequence_ended());
        assert_eq!(s.current_tile(), Rect::new(600, 0, 100, 100));
    }

    #[test]
    fn test_draw_uses_published_tile() {
        let mut s = treasure();
        s.lock().tile_index = 3;
        s.reset(PlayMode::Static, StateFlags::WIN, DirectionFlags::LEFT);
        s.rewind();
        s.set_position(50, 50);
        let mut frame = Frame::new();
        s.draw(&mut frame);
        match &frame.commands()[0] {
            DrawCmd::Sprite {
                source,
                destination,
                ..
            } => {
                assert_eq!(*source, Rect::new(0, 0, 100, 100));
                assert_eq!(*destination, Rect::new(0, 0, 100, 100));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rewind_without_match_keeps_index() {
        let s = treasure();
        s.lock().tile_index = 3;
        s.reset(PlayMode::Static, StateFlags::LOSE, DirectionFlags::LEFT);
        s.rewind();
        assert_eq!(s.lock().tile_index, 3);
        assert_eq!(s.current_tile(), Rect::new(300, 0, 100, 100));
    }
}
