//! Background work and per-frame checks.
//!
//! Submodules overview
//! - [`animation`] – animation drivers running on worker threads
//! - [`audio`] – the raylib audio thread (feature `desktop`)
//! - [`collision`] – overlap tests between sprites and layers
//! - [`worker`] – stoppable background thread with a shared snapshot

pub mod animation;
#[cfg(feature = "desktop")]
pub mod audio;
pub mod collision;
pub mod worker;
