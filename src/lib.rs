//! Scuba Max library.
//!
//! Exposes the game's components, screens, platform backends and systems so
//! integration tests can drive the whole game through the headless backend.

pub mod components;
pub mod events;
pub mod game;
pub mod platform;
pub mod resources;
pub mod screens;
pub mod systems;
