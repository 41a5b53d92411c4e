//! Anchorage flags and rectangle placement around an anchor point.
//!
//! An anchorage says which part of a rectangle sits on the anchor. An empty
//! set means the rectangle is centered on it; `NORTH` puts the top edge on the
//! anchor, `WEST` the left edge, and so on. Opposite flags cancel each other.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::components::rect::{Point, Rect};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Anchorage: u8 {
        const NORTH = 1 << 0;
        const SOUTH = 1 << 1;
        const EAST = 1 << 2;
        const WEST = 1 << 3;
        const NORTH_EAST = Self::NORTH.bits() | Self::EAST.bits();
        const NORTH_WEST = Self::NORTH.bits() | Self::WEST.bits();
        const SOUTH_EAST = Self::SOUTH.bits() | Self::EAST.bits();
        const SOUTH_WEST = Self::SOUTH.bits() | Self::WEST.bits();
    }
}

impl Anchorage {
    pub const CENTER: Anchorage = Anchorage::empty();

    fn factor(&self, low: Anchorage, high: Anchorage) -> i32 {
        self.contains(low) as i32 - self.contains(high) as i32 - 1
    }
}

impl Default for Anchorage {
    fn default() -> Self {
        Anchorage::CENTER
    }
}

/// Moves `rect` so that the part selected by `anchorage` lies on `anchor`.
/// Width and height are preserved.
pub fn anchor_rect(rect: &mut Rect, anchor: Point, anchorage: Anchorage) {
    let half_w = (rect.w / 2).abs();
    let half_h = (rect.h / 2).abs();
    rect.x = anchor.x + anchorage.factor(Anchorage::WEST, Anchorage::EAST) * half_w;
    rect.y = anchor.y + anchorage.factor(Anchorage::NORTH, Anchorage::SOUTH) * half_h;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(anchorage: Anchorage) -> Rect {
        let mut r = Rect::new(0, 0, 20, 10);
        anchor_rect(&mut r, Point::new(100, 50), anchorage);
        r
    }

    #[test]
    fn test_center_anchorage() {
        assert_eq!(placed(Anchorage::CENTER), Rect::new(90, 45, 20, 10));
    }

    #[test]
    fn test_north_west_puts_top_left_on_anchor() {
        assert_eq!(placed(Anchorage::NORTH_WEST), Rect::new(100, 50, 20, 10));
    }

    #[test]
    fn test_south_east_puts_bottom_right_on_anchor() {
        let r = placed(Anchorage::SOUTH_EAST);
        assert_eq!(r.bottom_right(), Point::new(100, 50));
    }

    #[test]
    fn test_north_only_centers_horizontally() {
        assert_eq!(placed(Anchorage::NORTH), Rect::new(90, 50, 20, 10));
    }
}
