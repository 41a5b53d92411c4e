//! Animated sprite registry.
//!
//! This module provides the catalog of every animated sprite in the game:
//! which image it uses, how the sheet is cut into tiles and which runs of
//! tiles play for each `(state, direction)` pair. The built-in catalog is
//! `assets/sprites.json`, embedded at compile time.

use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::animation::AnimationEntry;
use crate::resources::assets::ImageId;

const BUILTIN_CATALOG: &str = include_str!("../../assets/sprites.json");

/// Sheet layout and animation table of one sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDef {
    pub image: ImageId,
    pub columns: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub animations: Vec<AnimationEntry>,
}

/// Sprite definitions keyed by sprite name.
#[derive(Debug, Clone, Default)]
pub struct SpriteCatalog {
    sprites: FxHashMap<String, SpriteDef>,
}

impl SpriteCatalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let sprites: FxHashMap<String, SpriteDef> = serde_json::from_str(json)?;
        info!("Loaded {} sprite definitions", sprites.len());
        Ok(Self { sprites })
    }

    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&SpriteDef> {
        self.sprites.get(name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::{DirectionFlags, StateFlags};

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = SpriteCatalog::builtin().unwrap();
        for name in [
            "scuba_diver",
            "boat",
            "crab",
            "treasure",
            "bird_01",
            "bird_02",
            "bird_03",
            "fish_01",
            "fish_02",
            "fish_03",
            "golden_fish",
        ] {
            let def = catalog.get(name).unwrap_or_else(|| panic!("missing {name}"));
            assert!(def.columns > 0, "{name} has no columns");
            assert!(!def.animations.is_empty(), "{name} has no animations");
        }
    }

    #[test]
    fn test_diver_idle_right_entry() {
        let catalog = SpriteCatalog::builtin().unwrap();
        let diver = catalog.get("scuba_diver").unwrap();
        assert_eq!(diver.image, ImageId::ScubaDiver01);
        let idle_right = diver
            .animations
            .iter()
            .find(|e| e.state == StateFlags::IDLE && e.direction == DirectionFlags::RIGHT)
            .unwrap();
        assert_eq!(idle_right.start, 36);
        assert_eq!(idle_right.count, 12);
    }

    #[test]
    fn test_entries_fit_their_sheet() {
        let catalog = SpriteCatalog::builtin().unwrap();
        for def in catalog.sprites.values() {
            for entry in &def.animations {
                let rows = entry.end() / def.columns + 1;
                assert!(rows <= 6, "{:?} entry runs off the sheet", def.image);
            }
        }
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(SpriteCatalog::from_json("{\"x\": {\"image\": \"Nope\"}}").is_err());
    }
}
