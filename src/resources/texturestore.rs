//! Texture store.
//!
//! Loaded images keyed by [`ImageId`]. Textures live on the GPU and must only
//! be touched from the thread that owns the raylib handle, so the store is
//! owned by the desktop platform and never shared.

use raylib::prelude::Texture2D;
use rustc_hash::FxHashMap;

use crate::components::rect::Size;
use crate::resources::assets::ImageId;

pub struct TextureStore {
    textures: FxHashMap<ImageId, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            textures: FxHashMap::default(),
        }
    }

    pub fn add(&mut self, id: ImageId, texture: Texture2D) {
        self.textures.insert(id, texture);
    }

    pub fn get(&self, id: ImageId) -> Option<&Texture2D> {
        self.textures.get(&id)
    }

    /// Pixel size of a loaded texture.
    pub fn size(&self, id: ImageId) -> Option<Size> {
        self.textures
            .get(&id)
            .map(|texture| Size::new(texture.width, texture.height))
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }
}
