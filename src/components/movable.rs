//! Movement state shared by sprites and sprite layers.
//!
//! [`Motion`] holds the anchor point, the anchorage, a per-step speed and a
//! direction multiplier. The [`Movable`] trait provides the movement
//! operations on top of it; implementors only say where their `Motion` lives
//! and how to recompute their on-screen box after the anchor changes.
//!
//! Layers override [`Movable::move_with`] and [`Movable::set_position`] to
//! broadcast moves to their members.
//!
//! # Related
//!
//! - [`crate::components::anchor::anchor_rect`] – how the box follows the anchor
//! - [`crate::components::spritelayer`] – broadcasting implementations

use crate::components::anchor::Anchorage;
use crate::components::rect::Point;

/// Anchor, anchorage, speed and drift direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub anchorage: Anchorage,
    pub anchor: Point,
    /// Per-axis multiplier applied to every move, usually -1, 0 or 1.
    pub direction: Point,
    pub dx: i32,
    pub dy: i32,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            anchorage: Anchorage::CENTER,
            anchor: Point::default(),
            direction: Point::new(1, 1),
            dx: 0,
            dy: 0,
        }
    }
}

impl Motion {
    pub fn set_speed(&mut self, dx: i32, dy: i32) {
        self.dx = dx;
        self.dy = dy;
    }

    pub fn set_direction(&mut self, x: i32, y: i32) {
        self.direction = Point::new(x, y);
    }
}

pub trait Movable {
    fn motion(&self) -> &Motion;

    fn motion_mut(&mut self) -> &mut Motion;

    /// Recomputes the on-screen box from the current anchor.
    fn update_position(&mut self);

    /// Moves the anchor by `(dx * dir.x, dy * dir.y)`.
    fn move_with(&mut self, dx: i32, dy: i32, dir: Point) {
        let motion = self.motion_mut();
        motion.anchor.x += dx * dir.x;
        motion.anchor.y += dy * dir.y;
        self.update_position();
    }

    /// One step at the stored speed in the stored direction.
    fn move_step(&mut self) {
        let motion = *self.motion();
        self.move_with(motion.dx, motion.dy, motion.direction);
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        let dir = self.motion().direction;
        self.move_with(dx, dy, dir);
    }

    fn move_direction(&mut self, dir: Point) {
        let motion = *self.motion();
        self.move_with(motion.dx, motion.dy, dir);
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.motion_mut().anchor = Point::new(x, y);
        self.update_position();
    }

    fn set_position_anchored(&mut self, x: i32, y: i32, anchorage: Anchorage) {
        self.motion_mut().anchorage = anchorage;
        self.set_position(x, y);
    }

    fn anchor(&self) -> Point {
        self.motion().anchor
    }

    fn direction(&self) -> Point {
        self.motion().direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        motion: Motion,
        updates: u32,
    }

    impl Movable for Probe {
        fn motion(&self) -> &Motion {
            &self.motion
        }
        fn motion_mut(&mut self) -> &mut Motion {
            &mut self.motion
        }
        fn update_position(&mut self) {
            self.updates += 1;
        }
    }

    #[test]
    fn test_default_direction_is_positive() {
        let m = Motion::default();
        assert_eq!(m.direction, Point::new(1, 1));
        assert_eq!(m.anchorage, Anchorage::CENTER);
    }

    #[test]
    fn test_move_with_applies_direction() {
        let mut p = Probe::default();
        p.move_with(3, 4, Point::new(-1, 0));
        assert_eq!(p.anchor(), Point::new(-3, 0));
        assert_eq!(p.updates, 1);
    }

    #[test]
    fn test_move_step_uses_speed_and_direction() {
        let mut p = Probe::default();
        p.motion.set_speed(2, 5);
        p.motion.set_direction(1, -1);
        p.move_step();
        p.move_step();
        assert_eq!(p.anchor(), Point::new(4, -10));
    }

    #[test]
    fn test_set_position_anchored() {
        let mut p = Probe::default();
        p.set_position_anchored(7, 8, Anchorage::SOUTH);
        assert_eq!(p.anchor(), Point::new(7, 8));
        assert_eq!(p.motion.anchorage, Anchorage::SOUTH);
    }
}
