//! Event types exchanged between the platform, the screens and the audio
//! thread.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`common`] – keys every screen reacts to the same way
//! - [`input`] – backend-neutral input events
pub mod audio;
pub mod common;
pub mod input;
