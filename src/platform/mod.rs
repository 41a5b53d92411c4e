//! Backend abstraction.
//!
//! Screens never talk to a window, a GPU or an audio device directly. They
//! poll [`InputEvent`]s, build a [`Frame`] of plain-data [`DrawCmd`]s and hand
//! it to [`Platform::present`]. This keeps every rendering call on the main
//! thread: animation workers only ever touch plain data, and the draw phase
//! turns that data into commands.
//!
//! Implementations:
//! - [`desktop::DesktopPlatform`] – raylib window, textures, fonts and audio
//!   thread (feature `desktop`)
//! - [`headless::HeadlessPlatform`] – scripted input and recorded frames, used
//!   by tests

#[cfg(feature = "desktop")]
pub mod desktop;
pub mod headless;

use crate::components::color::Color;
use crate::components::rect::{Rect, Size};
use crate::events::input::InputEvent;
use crate::resources::assets::{FontId, ImageId, MusicId, SoundId};

/// A single drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole viewport.
    Clear(Color),
    /// Copy `source` of an image into `destination`, modulated by `tint`.
    Sprite {
        image: ImageId,
        source: Rect,
        destination: Rect,
        tint: Color,
    },
    /// Render a string with its top-left corner at `destination`.
    Text {
        font: FontId,
        text: String,
        destination: Rect,
        tint: Color,
    },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color },
}

/// Ordered list of draw commands for one presented frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    commands: Vec<DrawCmd>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCmd::Clear(color));
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCmd::FillRect { rect, color });
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCmd::StrokeRect { rect, color });
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Window, renderer, input and audio services used by the screens.
pub trait Platform {
    /// Next pending input event, if any. Never blocks.
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Draws `frame` and shows it.
    fn present(&mut self, frame: &Frame);

    /// Blocks the calling thread for `ms` milliseconds.
    fn delay(&mut self, ms: u32);

    /// Visible area in window coordinates.
    fn viewport(&self) -> Rect;

    /// Pixel size of a loaded image, `None` if it failed to load.
    fn image_size(&self, image: ImageId) -> Option<Size>;

    /// Rendered size of `text` in `font`.
    fn text_size(&self, font: FontId, text: &str) -> Size;

    fn play_music(&mut self, music: MusicId, volume: f32);

    fn pause_music(&mut self);

    fn resume_music(&mut self);

    fn stop_music(&mut self);

    fn play_sound(&mut self, sound: SoundId);

    /// Stops every playing sound effect.
    fn halt_sounds(&mut self);

    fn toggle_fullscreen(&mut self);

    fn set_cursor_visible(&mut self, visible: bool);
}
