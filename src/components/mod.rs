//! Data types the screens are built from.
//!
//! Submodules overview:
//! - [`anchor`] – anchorage points used to position a rectangle by one of its nine handles
//! - [`animatedsprite`] – a sprite whose tile index is driven by a worker thread
//! - [`animation`] – tile animation state machine and its kinds
//! - [`color`] – RGBA color
//! - [`drawable`] – anything that can emit draw commands into a frame
//! - [`movable`] – anchored and relative positioning
//! - [`rect`] – integer points, sizes and rectangles
//! - [`sprite`] – image region or text placed in the window
//! - [`spritelayer`] – ordered sprite collections, optionally clamped to an area
//! - [`tilemap`] – tile index to source rectangle math
//! - [`userinfo`] – transient notice shown on top of every screen

pub mod anchor;
pub mod animatedsprite;
pub mod animation;
pub mod color;
pub mod drawable;
pub mod movable;
pub mod rect;
pub mod sprite;
pub mod spritelayer;
pub mod tilemap;
pub mod userinfo;
