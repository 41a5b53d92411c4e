//! Long-lived data shared across screens.
//!
//! Overview
//! - `assets` – identifiers and file names of every image, font, track and sound
//! - `audio` – bridge and channels for the background audio thread (desktop)
//! - `fontstore` – loaded fonts keyed by [`assets::FontId`] (desktop)
//! - `gameconfig` – INI-backed configuration
//! - `random` – seedable random source
//! - `spritecatalog` – JSON sprite definitions
//! - `texturestore` – loaded textures keyed by [`assets::ImageId`] (desktop)
pub mod assets;
#[cfg(feature = "desktop")]
pub mod audio;
#[cfg(feature = "desktop")]
pub mod fontstore;
pub mod gameconfig;
pub mod random;
pub mod spritecatalog;
#[cfg(feature = "desktop")]
pub mod texturestore;
