//! Sprite animation state machine.
//!
//! A sprite sheet holds every frame of every animation of a character. An
//! [`AnimationEntry`] says which run of tiles to play for a given
//! `(state, direction)` pair; a [`SpriteAnimation`] owns the entry table and
//! the playback state, and [`SpriteAnimation::advance`] moves to the next
//! frame according to the current [`PlayMode`].
//!
//! `SpriteAnimation` is plain data. It is shared with its animation worker
//! behind a mutex, see [`crate::systems::animation`].
//!
//! # Related
//!
//! - [`crate::components::tilemap`] – tile index to pixel arithmetic
//! - [`crate::resources::spritecatalog`] – entry tables loaded from JSON

use bitflags::bitflags;
use log::error;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::components::rect::{Point, Rect};
use crate::components::tilemap::{tile_x, tile_y};
use crate::resources::random::RandomSource;

bitflags! {
    /// What a character is doing. An empty set is the idle state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct StateFlags: u32 {
        const WALK = 1 << 0;
        const RUN = 1 << 1;
        const JUMP = 1 << 2;
        const CLIMB = 1 << 3;
        const FALL = 1 << 4;
        const SLIDE = 1 << 5;
        const CRAWL = 1 << 6;
        const SWIM = 1 << 7;
        const DIVE = 1 << 8;
        const FLY = 1 << 9;
        const TAKE = 1 << 10;
        const GIVE = 1 << 11;
        const CATCH = 1 << 12;
        const THROW = 1 << 13;
        const HIT = 1 << 14;
        const SHOOT = 1 << 15;
        const MELEE = 1 << 16;
        const ATTACK = 1 << 17;
        const DEFEND = 1 << 18;
        const DRINK = 1 << 19;
        const EAT = 1 << 20;
        const SLEEP = 1 << 21;
        const LAUGH = 1 << 22;
        const ENJOY = 1 << 23;
        const FURIOUS = 1 << 24;
        const DEPICTED = 1 << 25;
        const WIN = 1 << 26;
        const LOSE = 1 << 27;
        const DEAD = 1 << 28;
        const USER_1 = 1 << 29;
        const USER_2 = 1 << 30;
        const USER_3 = 1 << 31;
    }
}

impl StateFlags {
    pub const IDLE: StateFlags = StateFlags::empty();
}

impl Default for StateFlags {
    fn default() -> Self {
        StateFlags::IDLE
    }
}

bitflags! {
    /// Where a character is facing. An empty set faces the camera.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DirectionFlags: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const FRONT = 1 << 4;
        const BACK = 1 << 5;
    }
}

impl DirectionFlags {
    pub const NONE: DirectionFlags = DirectionFlags::empty();
    pub const CENTER: DirectionFlags = DirectionFlags::empty();
}

impl Default for DirectionFlags {
    fn default() -> Self {
        DirectionFlags::NONE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Hold the current tile.
    #[default]
    Static,
    /// Play once and stay on the last tile.
    Sequential,
    /// Jump to a random tile of the run on every tick.
    Random,
    /// Play the run over and over.
    Loop,
}

/// A run of tiles played for one `(state, direction)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationEntry {
    pub state: StateFlags,
    pub direction: DirectionFlags,
    pub start: u32,
    /// Number of tiles in the run. Zero is treated as one.
    pub count: u32,
    /// Time each tile stays on screen.
    pub delay_ms: u32,
}

impl AnimationEntry {
    pub fn new(
        state: StateFlags,
        direction: DirectionFlags,
        start: u32,
        count: u32,
        delay_ms: u32,
    ) -> Self {
        Self {
            state,
            direction,
            start,
            count,
            delay_ms,
        }
    }

    /// Last tile index of the run. Runs reaching past `u32::MAX` are cut
    /// short there.
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.count.max(1) - 1)
    }
}

/// Configuration problems found while advancing an animation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error("animation table is empty")]
    EmptyTable,
    #[error("no animation for state {state:?} facing {direction:?}")]
    NoMatch {
        state: StateFlags,
        direction: DirectionFlags,
    },
    #[error("sprite sheet has zero tile columns")]
    ZeroColumns,
}

impl Extend<AnimationEntry> for SpriteAnimation {
    fn extend<I: IntoIterator<Item = AnimationEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

/// Entry table plus playback state of one animated sprite.
#[derive(Debug, Clone, Default)]
pub struct SpriteAnimation {
    entries: SmallVec<[AnimationEntry; 8]>,
    /// Position of the last matched entry; lookups start there.
    cursor: usize,
    pub play_mode: PlayMode,
    pub state: StateFlags,
    pub direction: DirectionFlags,
    pub tile_index: u32,
    pub sequence_ended: bool,
    pub columns: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl SpriteAnimation {
    pub fn new(columns: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            columns,
            tile_width,
            tile_height,
            ..Default::default()
        }
    }

    pub fn with_entries(mut self, entries: impl IntoIterator<Item = AnimationEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn push(&mut self, entry: AnimationEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AnimationEntry] {
        &self.entries
    }

    /// Selects what to play next. The tile index is left alone; the next
    /// [`advance`](Self::advance) clamps it into the new run.
    pub fn reset(&mut self, play_mode: PlayMode, state: StateFlags, direction: DirectionFlags) {
        self.play_mode = play_mode;
        self.state = state;
        self.direction = direction;
    }

    /// Restart the current run from its first tile.
    pub fn rewind(&mut self) {
        if let Some(entry) = self.find_entry() {
            self.tile_index = entry.start;
        }
        self.sequence_ended = false;
    }

    /// Round-robin exact match from the last matched position.
    fn find_entry(&mut self) -> Option<AnimationEntry> {
        let len = self.entries.len();
        let cursor = self.cursor;
        let found = (0..len).map(|offset| (cursor + offset) % len).find(|&i| {
            let e = &self.entries[i];
            e.state == self.state && e.direction == self.direction
        })?;
        self.cursor = found;
        Some(self.entries[found])
    }

    /// Moves to the next frame and returns how long it should stay on screen.
    pub fn try_advance(&mut self, rng: &mut RandomSource) -> Result<u32, AnimationError> {
        if self.entries.is_empty() {
            return Err(AnimationError::EmptyTable);
        }
        if self.columns == 0 {
            return Err(AnimationError::ZeroColumns);
        }
        let entry = self.find_entry().ok_or(AnimationError::NoMatch {
            state: self.state,
            direction: self.direction,
        })?;
        let start = entry.start;
        let end = entry.end();

        if self.tile_index < start || self.tile_index > end {
            self.tile_index = start;
        }

        match self.play_mode {
            PlayMode::Static => {
                self.sequence_ended = true;
            }
            PlayMode::Sequential => {
                self.tile_index = self.tile_index.saturating_add(1).min(end);
                self.sequence_ended = self.tile_index == end;
            }
            PlayMode::Random => {
                self.tile_index = rng.range_u32(start, end);
                self.sequence_ended = false;
            }
            PlayMode::Loop => {
                self.tile_index = if self.tile_index >= end {
                    start
                } else {
                    self.tile_index + 1
                };
                self.sequence_ended = self.tile_index == end;
            }
        }
        Ok(entry.delay_ms)
    }

    /// Like [`try_advance`](Self::try_advance) but reports configuration
    /// errors to the log and returns a zero delay instead.
    pub fn advance(&mut self, rng: &mut RandomSource) -> u32 {
        self.try_advance(rng).unwrap_or_else(|e| {
            error!("Animation error: {}", e);
            0
        })
    }

    /// Pixel offset of the current tile in the sheet.
    pub fn tile_offset(&self) -> Point {
        if self.columns == 0 {
            return Point::default();
        }
        let x = tile_x(self.tile_index, self.columns, self.tile_width);
        let y = tile_y(self.tile_index, self.columns, self.tile_height);
        Point::new(
            i32::try_from(x).unwrap_or(i32::MAX),
            i32::try_from(y).unwrap_or(i32::MAX),
        )
    }

    /// Source rectangle of the current tile.
    pub fn tile_rect(&self) -> Rect {
        let offset = self.tile_offset();
        Rect::new(
            offset.x,
            offset.y,
            self.tile_width as i32,
            self.tile_height as i32,
        )
    }
}
