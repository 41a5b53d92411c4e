//! Windowless platform driven by a script of input events.
//!
//! Events are handed out in order. An idle step in the script makes one poll
//! report "no event", which lets a screen run a frame. Once the script runs
//! dry the platform reports [`InputEvent::Quit`] so that any screen loop
//! terminates. Presented
//! frames, sounds and music changes are recorded and can be inspected from a
//! [`HeadlessProbe`] kept by the caller, even after the platform itself has
//! been moved into a game.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use rustc_hash::FxHashMap;

use crate::components::rect::{Rect, Size};
use crate::events::input::InputEvent;
use crate::platform::{Frame, Platform};
use crate::resources::assets::{FontId, ImageId, MusicId, SoundId};

const DEFAULT_IMAGE_SIZE: Size = Size::new(200, 100);
const GLYPH_WIDTH: i32 = 8;

#[derive(Debug, Default)]
struct HeadlessLog {
    events: VecDeque<Option<InputEvent>>,
    frames_presented: usize,
    last_frame: Option<Frame>,
    sounds: Vec<SoundId>,
    music: Option<MusicId>,
    music_paused: bool,
    fullscreen: bool,
    total_delay_ms: u64,
}

/// Read access to what a [`HeadlessPlatform`] has seen so far.
#[derive(Debug, Clone)]
pub struct HeadlessProbe {
    log: Arc<Mutex<HeadlessLog>>,
}

impl HeadlessProbe {
    fn log(&self) -> MutexGuard<'_, HeadlessLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Script events not consumed yet.
    pub fn pending_events(&self) -> usize {
        self.log().events.len()
    }

    pub fn frames_presented(&self) -> usize {
        self.log().frames_presented
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.log().last_frame.clone()
    }

    pub fn sounds_played(&self) -> Vec<SoundId> {
        self.log().sounds.clone()
    }

    pub fn current_music(&self) -> Option<MusicId> {
        self.log().music
    }

    pub fn music_paused(&self) -> bool {
        self.log().music_paused
    }

    pub fn fullscreen(&self) -> bool {
        self.log().fullscreen
    }

    pub fn total_delay_ms(&self) -> u64 {
        self.log().total_delay_ms
    }
}

pub struct HeadlessPlatform {
    viewport: Rect,
    image_sizes: FxHashMap<ImageId, Size>,
    missing_images: Vec<ImageId>,
    real_delays: bool,
    log: Arc<Mutex<HeadlessLog>>,
}

impl HeadlessPlatform {
    pub fn new(width: i32, height: i32, script: impl IntoIterator<Item = InputEvent>) -> Self {
        let log = HeadlessLog {
            events: script.into_iter().map(Some).collect(),
            ..Default::default()
        };
        Self {
            viewport: Rect::new(0, 0, width, height),
            image_sizes: FxHashMap::default(),
            missing_images: Vec::new(),
            real_delays: false,
            log: Arc::new(Mutex::new(log)),
        }
    }

    pub fn probe(&self) -> HeadlessProbe {
        HeadlessProbe {
            log: Arc::clone(&self.log),
        }
    }

    /// Appends `polls` empty polls to the script.
    pub fn idle(self, polls: usize) -> Self {
        self.log().events.extend(std::iter::repeat_n(None, polls));
        self
    }

    /// Appends more events to the script.
    pub fn then(self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.log().events.extend(events.into_iter().map(Some));
        self
    }

    /// Overrides the size reported for an image.
    pub fn with_image_size(mut self, image: ImageId, size: Size) -> Self {
        self.image_sizes.insert(image, size);
        self
    }

    /// Makes an image behave as if its file failed to load.
    pub fn with_missing_image(mut self, image: ImageId) -> Self {
        self.missing_images.push(image);
        self
    }

    /// Actually sleep in [`Platform::delay`] instead of only accounting for it.
    pub fn with_real_delays(mut self) -> Self {
        self.real_delays = true;
        self
    }

    fn log(&self) -> MutexGuard<'_, HeadlessLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Platform for HeadlessPlatform {
    fn poll_event(&mut self) -> Option<InputEvent> {
        match self.log().events.pop_front() {
            Some(step) => step,
            None => Some(InputEvent::Quit),
        }
    }

    fn present(&mut self, frame: &Frame) {
        let mut log = self.log();
        log.frames_presented += 1;
        log.last_frame = Some(frame.clone());
    }

    fn delay(&mut self, ms: u32) {
        self.log().total_delay_ms += ms as u64;
        if self.real_delays {
            std::thread::sleep(std::time::Duration::from_millis(ms as u64));
        }
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn image_size(&self, image: ImageId) -> Option<Size> {
        if self.missing_images.contains(&image) {
            return None;
        }
        Some(
            self.image_sizes
                .get(&image)
                .copied()
                .unwrap_or(DEFAULT_IMAGE_SIZE),
        )
    }

    fn text_size(&self, font: FontId, text: &str) -> Size {
        Size::new(GLYPH_WIDTH * text.chars().count() as i32, font.size())
    }

    fn play_music(&mut self, music: MusicId, _volume: f32) {
        debug!("headless: play music {:?}", music);
        let mut log = self.log();
        log.music = Some(music);
        log.music_paused = false;
    }

    fn pause_music(&mut self) {
        self.log().music_paused = true;
    }

    fn resume_music(&mut self) {
        self.log().music_paused = false;
    }

    fn stop_music(&mut self) {
        self.log().music = None;
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.log().sounds.push(sound);
    }

    fn halt_sounds(&mut self) {}

    fn toggle_fullscreen(&mut self) {
        let mut log = self.log();
        log.fullscreen = !log.fullscreen;
    }

    fn set_cursor_visible(&mut self, _visible: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::input::Key;

    #[test]
    fn test_script_then_quit() {
        let mut p = HeadlessPlatform::new(640, 480, [InputEvent::KeyUp(Key::Space)]);
        let probe = p.probe();
        assert_eq!(probe.pending_events(), 1);
        assert_eq!(p.poll_event(), Some(InputEvent::KeyUp(Key::Space)));
        assert_eq!(p.poll_event(), Some(InputEvent::Quit));
        assert_eq!(probe.pending_events(), 0);
    }

    #[test]
    fn test_idle_steps_report_no_event() {
        let mut p = HeadlessPlatform::new(640, 480, [InputEvent::KeyUp(Key::Left)])
            .idle(2)
            .then([InputEvent::KeyUp(Key::Q)]);
        assert_eq!(p.poll_event(), Some(InputEvent::KeyUp(Key::Left)));
        assert_eq!(p.poll_event(), None);
        assert_eq!(p.poll_event(), None);
        assert_eq!(p.poll_event(), Some(InputEvent::KeyUp(Key::Q)));
        assert_eq!(p.poll_event(), Some(InputEvent::Quit));
    }

    #[test]
    fn test_image_sizes() {
        let p = HeadlessPlatform::new(640, 480, [])
            .with_image_size(ImageId::Sky01, Size::new(2000, 500))
            .with_missing_image(ImageId::Crab01);
        assert_eq!(p.image_size(ImageId::Sky01), Some(Size::new(2000, 500)));
        assert_eq!(p.image_size(ImageId::Crab01), None);
        assert_eq!(p.image_size(ImageId::Boat03), Some(DEFAULT_IMAGE_SIZE));
    }

    #[test]
    fn test_records_frames_and_sounds() {
        let mut p = HeadlessPlatform::new(640, 480, []);
        let probe = p.probe();
        p.present(&Frame::new());
        p.play_sound(SoundId::Win);
        p.delay(30);
        assert_eq!(probe.frames_presented(), 1);
        assert_eq!(probe.sounds_played(), vec![SoundId::Win]);
        assert_eq!(probe.total_delay_ms(), 30);
    }
}
