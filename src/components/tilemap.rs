//! Tile index arithmetic.
//!
//! Sprite sheets are grids of equally sized tiles numbered row-major from 0.
//! [`tile_x`] and [`tile_y`] turn an index into the pixel offset of its tile;
//! [`SpriteSheet`] adds spacing between tiles, and [`TileMapLayer`] places the
//! k-th tile of a map on the destination grid.
//!
//! # Panics
//!
//! Every function here divides by the column count. A zero column count is a
//! caller bug and panics; code that reads column counts from data checks them
//! first (see [`SpriteAnimation::try_advance`]).
//!
//! [`SpriteAnimation::try_advance`]: crate::components::animation::SpriteAnimation::try_advance

use log::debug;
use serde::{Deserialize, Serialize};

use crate::components::rect::Rect;

/// Horizontal pixel offset of tile `index`.
pub fn tile_x(index: u32, columns: u32, tile_width: u32) -> u32 {
    tile_width.saturating_mul(index % columns)
}

/// Vertical pixel offset of tile `index`.
pub fn tile_y(index: u32, columns: u32, tile_height: u32) -> u32 {
    tile_height.saturating_mul(index / columns)
}

/// Source grid of a tileset image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub columns: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    #[serde(default)]
    pub spacing_x: u32,
    #[serde(default)]
    pub spacing_y: u32,
}

impl SpriteSheet {
    pub fn new(columns: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            columns,
            tile_width,
            tile_height,
            spacing_x: 0,
            spacing_y: 0,
        }
    }

    pub fn with_spacing(mut self, spacing_x: u32, spacing_y: u32) -> Self {
        self.spacing_x = spacing_x;
        self.spacing_y = spacing_y;
        self
    }

    pub fn tile_x(&self, index: u32) -> u32 {
        tile_x(index, self.columns, self.tile_width + self.spacing_x)
    }

    pub fn tile_y(&self, index: u32) -> u32 {
        tile_y(index, self.columns, self.tile_height + self.spacing_y)
    }

    /// Source rectangle of tile `index`.
    pub fn tile_rect(&self, index: u32) -> Rect {
        Rect::new(
            self.tile_x(index) as i32,
            self.tile_y(index) as i32,
            self.tile_width as i32,
            self.tile_height as i32,
        )
    }
}

/// A rectangular block of a tile map, in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileMapLayer {
    pub row: u32,
    pub column: u32,
    pub rows: u32,
    pub columns: u32,
    #[serde(default)]
    pub offset_x: i32,
    #[serde(default)]
    pub offset_y: i32,
}

impl TileMapLayer {
    /// A layer with no rows or no columns holds no tiles.
    pub fn is_ok(&self) -> bool {
        self.rows > 0 && self.columns > 0
    }

    pub fn len(&self) -> usize {
        (self.rows * self.columns) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Destination x of the `index`-th tile of this layer.
    pub fn tile_x(&self, index: u32, tile_width: u32) -> i32 {
        self.offset_x + (tile_width * (self.column + index % self.columns)) as i32
    }

    /// Destination y of the `index`-th tile of this layer.
    pub fn tile_y(&self, index: u32, tile_height: u32) -> i32 {
        self.offset_y + (tile_height * (self.row + index / self.columns)) as i32
    }
}

/// Source and destination of one placed tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub source: Rect,
    pub destination: Rect,
}

/// Walks `indices` across `layers` in order, filling each layer before
/// moving on to the next. Layers that are not [ok](TileMapLayer::is_ok) are
/// skipped. Indices left over once every layer is full are ignored.
pub fn layout_tiles(
    sheet: &SpriteSheet,
    indices: &[u32],
    layers: &[TileMapLayer],
) -> Vec<TilePlacement> {
    let mut placements = Vec::with_capacity(indices.len());
    let mut remaining = indices;
    for layer in layers.iter().filter(|l| l.is_ok()) {
        if remaining.is_empty() {
            break;
        }
        let take = layer.len().min(remaining.len());
        let (chunk, rest) = remaining.split_at(take);
        for (k, &index) in chunk.iter().enumerate() {
            let k = k as u32;
            placements.push(TilePlacement {
                source: sheet.tile_rect(index),
                destination: Rect::new(
                    layer.tile_x(k, sheet.tile_width),
                    layer.tile_y(k, sheet.tile_height),
                    sheet.tile_width as i32,
                    sheet.tile_height as i32,
                ),
            });
        }
        remaining = rest;
    }
    if !remaining.is_empty() {
        debug!("{} tile indices left without a layer", remaining.len());
    }
    placements
}
