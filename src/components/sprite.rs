//! Static sprite.
//!
//! A [`Sprite`] is a region of an image (or a rendered string) placed on
//! screen. It is built by composition: drawing state lives in the struct,
//! movement state in its [`Motion`], and the on-screen box is recomputed
//! from the anchor whenever the sprite moves.
//!
//! # Related
//!
//! - [`crate::components::animatedsprite::AnimatedSprite`] – a sprite whose
//!   source region is driven by an animation worker
//! - [`crate::components::spritelayer::SpriteLayer`] – owning collections of sprites

use log::warn;

use crate::components::anchor::{Anchorage, anchor_rect};
use crate::components::color::Color;
use crate::components::drawable::Drawable;
use crate::components::movable::{Motion, Movable};
use crate::components::rect::{Bounded, Rect, Size};
use crate::platform::{DrawCmd, Frame, Platform};
use crate::resources::assets::{FontId, ImageId};

/// What a sprite shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SpriteSource {
    #[default]
    None,
    Image(ImageId),
    Text { font: FontId, text: String },
}

#[derive(Debug, Clone, Default)]
pub struct Sprite {
    pub source: SpriteSource,
    /// Region of the source image copied on draw.
    pub texture_rect: Rect,
    /// On-screen box. Follows the anchor.
    pub renderer_rect: Rect,
    pub color: Color,
    pub visible: bool,
    pub motion: Motion,
}

impl Sprite {
    pub fn new() -> Self {
        Self {
            visible: true,
            ..Default::default()
        }
    }

    /// Sprite showing the whole of `image`.
    pub fn with_image(image: ImageId, size: Size) -> Self {
        let mut sprite = Self::new();
        sprite.set_image(image, size);
        sprite
    }

    /// Sprite showing the whole of `image`, sized by the platform. `None` if
    /// the image is not loaded.
    pub fn from_platform(platform: &dyn Platform, image: ImageId) -> Option<Self> {
        match platform.image_size(image) {
            Some(size) => Some(Self::with_image(image, size)),
            None => {
                warn!("Image {:?} is not loaded", image);
                None
            }
        }
    }

    /// Text sprite measured by the platform.
    pub fn text(platform: &dyn Platform, font: FontId, text: &str, color: Color) -> Self {
        let mut sprite = Self::new();
        sprite.set_text(font, text, platform.text_size(font, text), color);
        sprite
    }

    pub fn set_image(&mut self, image: ImageId, size: Size) {
        self.source = SpriteSource::Image(image);
        self.texture_rect = Rect::from_size(size);
        self.renderer_rect.w = size.w;
        self.renderer_rect.h = size.h;
        self.update_position();
    }

    pub fn set_text(&mut self, font: FontId, text: &str, size: Size, color: Color) {
        self.source = SpriteSource::Text {
            font,
            text: text.to_string(),
        };
        self.texture_rect = Rect::from_size(size);
        self.renderer_rect.w = size.w;
        self.renderer_rect.h = size.h;
        self.color = color;
        self.update_position();
    }

    pub fn set_anchorage(&mut self, anchorage: Anchorage) {
        self.motion.anchorage = anchorage;
        self.update_position();
    }

    pub fn collides(&self, other: &Sprite) -> bool {
        self.renderer_rect.intersects(&other.renderer_rect)
    }

    /// Appends a draw command for `source` with this sprite's box.
    pub(crate) fn draw_region(&self, frame: &mut Frame, source: Rect, tint: Color) {
        if !self.visible || tint.a == 0 {
            return;
        }
        match &self.source {
            SpriteSource::None => {}
            SpriteSource::Image(image) => frame.push(DrawCmd::Sprite {
                image: *image,
                source,
                destination: self.renderer_rect,
                tint,
            }),
            SpriteSource::Text { font, text } => frame.push(DrawCmd::Text {
                font: *font,
                text: text.clone(),
                destination: self.renderer_rect,
                tint,
            }),
        }
    }
}

impl Movable for Sprite {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn update_position(&mut self) {
        anchor_rect(
            &mut self.renderer_rect,
            self.motion.anchor,
            self.motion.anchorage,
        );
    }
}

impl Drawable for Sprite {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn draw_tinted(&self, frame: &mut Frame, tint: Color) {
        self.draw_region(frame, self.texture_rect, tint);
    }
}

impl Bounded for Sprite {
    fn bounds(&self) -> Rect {
        self.renderer_rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::rect::Point;

    #[test]
    fn test_image_sprite_follows_anchor() {
        let mut s = Sprite::with_image(ImageId::Sky01, Size::new(100, 50));
        s.set_position_anchored(320, 0, Anchorage::NORTH);
        assert_eq!(s.renderer_rect, Rect::new(270, 0, 100, 50));
        s.move_by(10, 5);
        assert_eq!(s.renderer_rect.top_left(), Point::new(280, 5));
    }

    #[test]
    fn test_draw_emits_sprite_command() {
        let mut s = Sprite::with_image(ImageId::Crab01, Size::new(10, 10));
        s.set_position(5, 5);
        let mut frame = Frame::new();
        s.draw(&mut frame);
        assert_eq!(
            frame.commands(),
            &[DrawCmd::Sprite {
                image: ImageId::Crab01,
                source: Rect::new(0, 0, 10, 10),
                destination: Rect::new(0, 0, 10, 10),
                tint: Color::WHITE,
            }]
        );
    }

    #[test]
    fn test_invisible_or_transparent_sprites_are_skipped() {
        let mut s = Sprite::with_image(ImageId::Crab01, Size::new(10, 10));
        let mut frame = Frame::new();
        s.draw_alpha(&mut frame, 0);
        s.visible = false;
        s.draw(&mut frame);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_collides() {
        let mut a = Sprite::with_image(ImageId::Crab01, Size::new(10, 10));
        let mut b = Sprite::with_image(ImageId::Crab01, Size::new(10, 10));
        a.set_position_anchored(0, 0, Anchorage::NORTH_WEST);
        b.set_position_anchored(5, 5, Anchorage::NORTH_WEST);
        assert!(a.collides(&b));
        b.set_position_anchored(20, 20, Anchorage::NORTH_WEST);
        assert!(!a.collides(&b));
    }
}
