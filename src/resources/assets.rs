//! Asset identifiers.
//!
//! Every image, font, music track and sound effect the game uses has a
//! variant here. Backends resolve an identifier to a file under the
//! configured assets directory via `file_name()`; screens never deal with
//! paths.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageId {
    Sky01,
    Ground01,
    Cloud01,
    Cloud02,
    Cloud03,
    GroundItem01,
    GroundItem02,
    GroundItem03,
    Boat03,
    Bird01,
    Bird02,
    Bird03,
    Fish01,
    Fish02,
    Fish03,
    GoldenFish01,
    Crab01,
    ScubaDiver01,
    TreasureChest01,
}

impl ImageId {
    pub const ALL: [ImageId; 19] = [
        ImageId::Sky01,
        ImageId::Ground01,
        ImageId::Cloud01,
        ImageId::Cloud02,
        ImageId::Cloud03,
        ImageId::GroundItem01,
        ImageId::GroundItem02,
        ImageId::GroundItem03,
        ImageId::Boat03,
        ImageId::Bird01,
        ImageId::Bird02,
        ImageId::Bird03,
        ImageId::Fish01,
        ImageId::Fish02,
        ImageId::Fish03,
        ImageId::GoldenFish01,
        ImageId::Crab01,
        ImageId::ScubaDiver01,
        ImageId::TreasureChest01,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ImageId::Sky01 => "images/sky_01.png",
            ImageId::Ground01 => "images/ground_01.png",
            ImageId::Cloud01 => "images/cloud_01.png",
            ImageId::Cloud02 => "images/cloud_02.png",
            ImageId::Cloud03 => "images/cloud_03.png",
            ImageId::GroundItem01 => "images/ground_item_01.png",
            ImageId::GroundItem02 => "images/ground_item_02.png",
            ImageId::GroundItem03 => "images/ground_item_03.png",
            ImageId::Boat03 => "images/boat_03.png",
            ImageId::Bird01 => "images/bird_01.png",
            ImageId::Bird02 => "images/bird_02.png",
            ImageId::Bird03 => "images/bird_03.png",
            ImageId::Fish01 => "images/fish_01.png",
            ImageId::Fish02 => "images/fish_02.png",
            ImageId::Fish03 => "images/fish_03.png",
            ImageId::GoldenFish01 => "images/golden_fish_01.png",
            ImageId::Crab01 => "images/crab_01.png",
            ImageId::ScubaDiver01 => "images/scuba_diver_01.png",
            ImageId::TreasureChest01 => "images/treasure_chest_01.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    GameName,
    Title,
    Menu,
    Tip,
    Pause,
    UserInfo,
}

impl FontId {
    pub const ALL: [FontId; 6] = [
        FontId::GameName,
        FontId::Title,
        FontId::Menu,
        FontId::Tip,
        FontId::Pause,
        FontId::UserInfo,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            FontId::GameName | FontId::Pause => "fonts/title.ttf",
            FontId::Title | FontId::Menu => "fonts/text.ttf",
            FontId::Tip | FontId::UserInfo => "fonts/tip.ttf",
        }
    }

    /// Point size the font is rendered at.
    pub fn size(&self) -> i32 {
        match self {
            FontId::GameName => 64,
            FontId::Title => 32,
            FontId::Menu => 22,
            FontId::Tip => 16,
            FontId::Pause => 48,
            FontId::UserInfo => 18,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicId {
    Intro,
    Rules,
    Credits,
    Play1,
    Play2,
}

impl MusicId {
    pub const ALL: [MusicId; 5] = [
        MusicId::Intro,
        MusicId::Rules,
        MusicId::Credits,
        MusicId::Play1,
        MusicId::Play2,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            MusicId::Intro => "music/intro.ogg",
            MusicId::Rules => "music/rules.ogg",
            MusicId::Credits => "music/credits.ogg",
            MusicId::Play1 => "music/play_1.ogg",
            MusicId::Play2 => "music/play_2.ogg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Win,
    Lose,
    GoldenFish,
    LevelComplete,
    GameOver,
}

impl SoundId {
    pub const ALL: [SoundId; 5] = [
        SoundId::Win,
        SoundId::Lose,
        SoundId::GoldenFish,
        SoundId::LevelComplete,
        SoundId::GameOver,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundId::Win => "sounds/win.wav",
            SoundId::Lose => "sounds/lose.wav",
            SoundId::GoldenFish => "sounds/golden_fish.wav",
            SoundId::LevelComplete => "sounds/level_complete.wav",
            SoundId::GameOver => "sounds/game_over.wav",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_image_file_names_are_unique() {
        let names: FxHashSet<_> = ImageId::ALL.iter().map(|i| i.file_name()).collect();
        assert_eq!(names.len(), ImageId::ALL.len());
    }

    #[test]
    fn test_image_id_serde_name() {
        let id: ImageId = serde_json::from_str("\"ScubaDiver01\"").unwrap();
        assert_eq!(id, ImageId::ScubaDiver01);
    }
}
