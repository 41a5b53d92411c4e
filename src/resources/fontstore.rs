//! Font store.
//!
//! Fonts keyed by [`FontId`]. Several ids may share a file but each is loaded
//! at its own point size, see [`FontId::size`].
//!
//! Like textures, raylib fonts belong to the main thread; the store is owned
//! by the desktop platform.

use raylib::prelude::Font;
use rustc_hash::FxHashMap;

use crate::resources::assets::FontId;

/// Map of font ids to loaded fonts.
pub struct FontStore {
    fonts: FxHashMap<FontId, Font>,
}

impl FontStore {
    /// Create an empty font store.
    pub fn new() -> Self {
        Self {
            fonts: FxHashMap::default(),
        }
    }

    /// Add a font with the given id.
    pub fn add(&mut self, id: FontId, font: Font) {
        self.fonts.insert(id, font);
    }

    /// Get a font by its id.
    pub fn get(&self, id: FontId) -> Option<&Font> {
        self.fonts.get(&id)
    }

    /// Remove all loaded fonts.
    pub fn clear(&mut self) {
        self.fonts.clear();
    }

    /// Get the number of loaded fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }
}
