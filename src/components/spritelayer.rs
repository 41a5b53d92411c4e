//! Sprite layers.
//!
//! A [`SpriteLayer`] owns an ordered list of drawables and moves them as a
//! group: every relative move of the layer is applied to each member and to
//! the layer's own anchor. Members are addressed by index; nothing else holds
//! a reference to them.
//!
//! A [`BoundedLayer`] is a layer with a world frame larger than the visible
//! viewport. [`BoundedLayer::move_around`] scrolls it but never lets the
//! frame uncover the viewport: a move that would is cut short at the edge and
//! the drift direction on that axis is zeroed.
//!
//! Layers are themselves [`Movable`] and [`Drawable`], so they nest.

use std::ops::{Index, IndexMut};

use crate::components::anchor::anchor_rect;
use crate::components::color::Color;
use crate::components::drawable::Drawable;
use crate::components::movable::{Motion, Movable};
use crate::components::rect::{Point, Rect};
use crate::platform::Frame;

pub struct SpriteLayer<T> {
    members: Vec<T>,
    pub motion: Motion,
    pub visible: bool,
}

impl<T> Default for SpriteLayer<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            motion: Motion::default(),
            visible: true,
        }
    }
}

impl<T: Movable + Drawable> SpriteLayer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, member: T) -> usize {
        self.members.push(member);
        self.members.len() - 1
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.members.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.members.iter_mut()
    }

    /// Takes every member out, leaving the layer empty.
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.members.drain(..)
    }

    /// Moves every member one step with its own speed and direction. The
    /// layer anchor does not move.
    pub fn move_self(&mut self) {
        for member in &mut self.members {
            member.move_step();
        }
    }

    fn move_members(&mut self, dx: i32, dy: i32, dir: Point) {
        for member in &mut self.members {
            member.move_with(dx, dy, dir);
        }
    }
}

impl<T> Index<usize> for SpriteLayer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.members[index]
    }
}

impl<T> IndexMut<usize> for SpriteLayer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.members[index]
    }
}

impl<T: Movable + Drawable> Movable for SpriteLayer<T> {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn update_position(&mut self) {}

    fn move_with(&mut self, dx: i32, dy: i32, dir: Point) {
        self.move_members(dx, dy, dir);
        self.motion.anchor.x += dx * dir.x;
        self.motion.anchor.y += dy * dir.y;
        self.update_position();
    }

    /// Absolute moves become a relative move of the whole group.
    fn set_position(&mut self, x: i32, y: i32) {
        let anchor = self.motion.anchor;
        self.move_with(x - anchor.x, y - anchor.y, Point::new(1, 1));
    }
}

impl<T: Movable + Drawable> Drawable for SpriteLayer<T> {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn color(&self) -> Color {
        Color::WHITE
    }

    fn draw(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        for member in &self.members {
            member.draw(frame);
        }
    }

    fn draw_tinted(&self, frame: &mut Frame, tint: Color) {
        if !self.visible {
            return;
        }
        for member in &self.members {
            member.draw_tinted(frame, tint);
        }
    }
}

/// A layer whose world frame scrolls behind a fixed viewport.
pub struct BoundedLayer<T> {
    pub layer: SpriteLayer<T>,
    frame_rect: Rect,
    viewport: Rect,
}

impl<T: Movable + Drawable> BoundedLayer<T> {
    pub fn new(frame_rect: Rect, viewport: Rect) -> Self {
        Self {
            layer: SpriteLayer::new(),
            frame_rect,
            viewport,
        }
    }

    pub fn frame_rect(&self) -> Rect {
        self.frame_rect
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Resizes the world frame and re-anchors it.
    pub fn set_area(&mut self, frame_rect: Rect, viewport: Rect) {
        self.frame_rect = frame_rect;
        self.viewport = viewport;
        self.update_position();
    }

    /// Scrolls by `(dx * dir.x, dy * dir.y)` without uncovering the viewport.
    ///
    /// Does nothing unless the frame is strictly larger than the viewport on
    /// both axes.
    pub fn move_around(&mut self, dx: i32, dy: i32, dir: Point) {
        let vp = self.viewport;
        if self.frame_rect.w <= vp.w || self.frame_rect.h <= vp.h {
            return;
        }
        self.move_with(dx, dy, dir);

        let frame = self.frame_rect;
        if frame.left() > vp.left() {
            self.move_with(vp.left() - frame.left(), 0, Point::new(1, 1));
            self.layer.motion.direction.x = 0;
        } else if frame.right() < vp.right() {
            self.move_with(vp.right() - frame.right(), 0, Point::new(1, 1));
            self.layer.motion.direction.x = 0;
        }

        let frame = self.frame_rect;
        if frame.top() > vp.top() {
            self.move_with(0, vp.top() - frame.top(), Point::new(1, 1));
            self.layer.motion.direction.y = 0;
        } else if frame.bottom() < vp.bottom() {
            self.move_with(0, vp.bottom() - frame.bottom(), Point::new(1, 1));
            self.layer.motion.direction.y = 0;
        }
    }

    /// [`move_around`](Self::move_around) with the layer's own speed and
    /// direction.
    pub fn move_around_step(&mut self) {
        let motion = self.layer.motion;
        self.move_around(motion.dx, motion.dy, motion.direction);
    }
}

impl<T> Index<usize> for BoundedLayer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.layer[index]
    }
}

impl<T> IndexMut<usize> for BoundedLayer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.layer[index]
    }
}

impl<T: Movable + Drawable> Movable for BoundedLayer<T> {
    fn motion(&self) -> &Motion {
        &self.layer.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.layer.motion
    }

    fn update_position(&mut self) {
        anchor_rect(
            &mut self.frame_rect,
            self.layer.motion.anchor,
            self.layer.motion.anchorage,
        );
    }

    fn move_with(&mut self, dx: i32, dy: i32, dir: Point) {
        self.layer.move_members(dx, dy, dir);
        self.layer.motion.anchor.x += dx * dir.x;
        self.layer.motion.anchor.y += dy * dir.y;
        self.update_position();
    }

    fn set_position(&mut self, x: i32, y: i32) {
        let anchor = self.layer.motion.anchor;
        self.move_with(x - anchor.x, y - anchor.y, Point::new(1, 1));
    }
}

impl<T: Movable + Drawable> Drawable for BoundedLayer<T> {
    fn is_visible(&self) -> bool {
        self.layer.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.layer.visible = visible;
    }

    fn color(&self) -> Color {
        Color::WHITE
    }

    fn draw(&self, frame: &mut Frame) {
        self.layer.draw(frame);
    }

    fn draw_tinted(&self, frame: &mut Frame, tint: Color) {
        self.layer.draw_tinted(frame, tint);
    }
}

impl<T: Movable + Drawable> SpriteLayer<BoundedLayer<T>> {
    /// Scrolls every bounded layer; each one clamps to its own viewport.
    pub fn move_around(&mut self, dx: i32, dy: i32, dir: Point) {
        for member in &mut self.members {
            member.move_around(dx, dy, dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::anchor::Anchorage;
    use crate::components::rect::Size;
    use crate::components::sprite::Sprite;
    use crate::resources::assets::ImageId;

    fn sprite_at(x: i32, y: i32) -> Sprite {
        let mut s = Sprite::with_image(ImageId::Cloud01, Size::new(10, 10));
        s.set_position_anchored(x, y, Anchorage::NORTH_WEST);
        s
    }

    fn world() -> BoundedLayer<Sprite> {
        // 2000x1000 world, top-left aligned with a 640x480 viewport.
        let mut layer = BoundedLayer::new(Rect::new(0, 0, 2000, 1000), Rect::new(0, 0, 640, 480));
        layer.layer.motion.anchorage = Anchorage::NORTH_WEST;
        layer.update_position();
        layer
    }

    // --- SpriteLayer ---

    #[test]
    fn test_move_broadcasts_to_members() {
        let mut layer = SpriteLayer::new();
        layer.push(sprite_at(0, 0));
        layer.push(sprite_at(100, 100));
        layer.move_by(5, -5);
        assert_eq!(layer[0].renderer_rect.top_left(), Point::new(5, -5));
        assert_eq!(layer[1].renderer_rect.top_left(), Point::new(105, 95));
        assert_eq!(layer.anchor(), Point::new(5, -5));
    }

    #[test]
    fn test_set_position_moves_by_delta() {
        let mut layer = SpriteLayer::new();
        layer.push(sprite_at(10, 10));
        layer.set_position(100, 0);
        layer.set_position(50, 20);
        assert_eq!(layer.anchor(), Point::new(50, 20));
        assert_eq!(layer[0].renderer_rect.top_left(), Point::new(60, 30));
    }

    #[test]
    fn test_move_self_uses_member_speed() {
        let mut layer = SpriteLayer::new();
        let idx = layer.push(sprite_at(0, 0));
        layer[idx].motion.set_speed(3, 0);
        layer[idx].motion.set_direction(-1, 1);
        layer.move_self();
        assert_eq!(layer[idx].renderer_rect.top_left(), Point::new(-3, 0));
        assert_eq!(layer.anchor(), Point::default());
    }

    #[test]
    fn test_invisible_layer_draws_nothing() {
        let mut layer = SpriteLayer::new();
        layer.push(sprite_at(0, 0));
        layer.visible = false;
        let mut frame = Frame::new();
        layer.draw(&mut frame);
        assert!(frame.is_empty());
    }

    // --- BoundedLayer ---

    #[test]
    fn test_move_around_inside_bounds() {
        let mut layer = world();
        layer.move_around(10, 10, Point::new(-1, -1));
        assert_eq!(layer.frame_rect(), Rect::new(-10, -10, 2000, 1000));
    }

    #[test]
    fn test_move_around_clamps_left_edge_and_zeroes_direction() {
        let mut layer = world();
        layer.layer.motion.set_direction(1, 1);
        layer.move_around(15, 0, Point::new(1, 1));
        assert_eq!(layer.frame_rect().left(), 0);
        assert_eq!(layer.direction().x, 0);
    }

    #[test]
    fn test_move_around_clamps_right_edge() {
        let mut layer = world();
        layer.move_around(5000, 0, Point::new(-1, 1));
        assert_eq!(layer.frame_rect().right(), 640);
        assert_eq!(layer.direction().x, 0);
    }

    #[test]
    fn test_move_around_clamps_bottom_edge() {
        let mut layer = world();
        layer.move_around(0, 900, Point::new(1, -1));
        assert_eq!(layer.frame_rect().bottom(), 480);
        assert_eq!(layer.direction().y, 0);
    }

    #[test]
    fn test_move_around_carries_members_with_clamp() {
        let mut layer = world();
        layer.layer.push(sprite_at(100, 100));
        layer.move_around(30, 0, Point::new(1, 1));
        // Moved +30 then pulled back -30.
        assert_eq!(layer[0].renderer_rect.top_left(), Point::new(100, 100));
    }

    #[test]
    fn test_move_around_needs_larger_frame() {
        let mut layer = BoundedLayer::<Sprite>::new(Rect::new(0, 0, 640, 1000), Rect::new(0, 0, 640, 480));
        layer.move_around(10, 10, Point::new(-1, -1));
        assert_eq!(layer.frame_rect(), Rect::new(0, 0, 640, 1000));
    }

    #[test]
    fn test_layer_of_bounded_layers() {
        let mut stack = SpriteLayer::new();
        stack.push(world());
        stack.push(world());
        stack.move_around(20, 0, Point::new(-1, 1));
        assert_eq!(stack[0].frame_rect().left(), -20);
        assert_eq!(stack[1].frame_rect().left(), -20);
    }
}
