//! raylib backend.
//!
//! Owns the window, the texture and font stores and the audio thread bridge.
//! Everything raylib-related stays on the thread that built the platform;
//! music and sound effects are handed to [`audio_thread`] through
//! [`AudioBridge`].
//!
//! Input: raylib refreshes key state once per presented frame, so the key
//! table is scanned at most once between two [`Platform::present`] calls and
//! the resulting events are queued.
//!
//! [`audio_thread`]: crate::systems::audio::audio_thread

use std::collections::VecDeque;
use std::ffi::CString;
use std::time::Duration;

use log::{debug, info, warn};
use raylib::ffi;
use raylib::prelude::{
    Color as RlColor, KeyboardKey, MouseButton, RaylibDraw, RaylibHandle, RaylibThread,
    Rectangle, Vector2,
};

use crate::components::color::Color;
use crate::components::rect::{Rect, Size};
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::input::{InputEvent, Key};
use crate::game::GAME_NAME;
use crate::platform::{DrawCmd, Frame, Platform};
use crate::resources::assets::{FontId, ImageId, MusicId, SoundId};
use crate::resources::audio::AudioBridge;
use crate::resources::fontstore::FontStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::texturestore::TextureStore;

const TEXT_SPACING: f32 = 1.0;

const KEY_MAP: [(KeyboardKey, Key); 24] = [
    (KeyboardKey::KEY_ENTER, Key::Return),
    (KeyboardKey::KEY_SPACE, Key::Space),
    (KeyboardKey::KEY_ESCAPE, Key::Escape),
    (KeyboardKey::KEY_LEFT, Key::Left),
    (KeyboardKey::KEY_RIGHT, Key::Right),
    (KeyboardKey::KEY_UP, Key::Up),
    (KeyboardKey::KEY_DOWN, Key::Down),
    (KeyboardKey::KEY_RIGHT_CONTROL, Key::RightCtrl),
    (KeyboardKey::KEY_RIGHT_SHIFT, Key::RightShift),
    (KeyboardKey::KEY_F1, Key::F1),
    (KeyboardKey::KEY_F2, Key::F2),
    (KeyboardKey::KEY_F3, Key::F3),
    (KeyboardKey::KEY_F9, Key::F9),
    (KeyboardKey::KEY_F10, Key::F10),
    (KeyboardKey::KEY_F11, Key::F11),
    (KeyboardKey::KEY_C, Key::C),
    (KeyboardKey::KEY_F, Key::F),
    (KeyboardKey::KEY_H, Key::H),
    (KeyboardKey::KEY_I, Key::I),
    (KeyboardKey::KEY_M, Key::M),
    (KeyboardKey::KEY_P, Key::P),
    (KeyboardKey::KEY_Q, Key::Q),
    (KeyboardKey::KEY_S, Key::S),
    (KeyboardKey::KEY_X, Key::X),
];

fn rl_color(color: Color) -> RlColor {
    RlColor::new(color.r, color.g, color.b, color.a)
}

fn rl_rect(rect: Rect) -> Rectangle {
    Rectangle::new(rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32)
}

pub struct DesktopPlatform {
    // GPU resources are declared before the handle so they drop while the
    // window still exists.
    textures: TextureStore,
    fonts: FontStore,
    audio: Option<AudioBridge>,
    events: VecDeque<InputEvent>,
    input_fresh: bool,
    rl: RaylibHandle,
    thread: RaylibThread,
}

impl DesktopPlatform {
    /// Opens the window, loads every image and font under the configured
    /// assets directory and starts the audio thread with every track and
    /// sound effect queued for loading. Missing files are logged; screens
    /// that need them fail their own initialization.
    pub fn new(config: &GameConfig) -> Self {
        let (width, height) = config.window_size();
        let (mut rl, thread) = raylib::init()
            .size(width as i32, height as i32)
            .resizable()
            .title(GAME_NAME)
            .build();
        // Escape is a game key, not a close request.
        rl.set_exit_key(None);
        if config.fullscreen {
            rl.toggle_fullscreen();
        }

        let mut textures = TextureStore::new();
        for image in ImageId::ALL {
            let path = config.asset_path(image.file_name());
            match rl.load_texture(&thread, &path.to_string_lossy()) {
                Ok(texture) => textures.add(image, texture),
                Err(e) => warn!("Failed to load image {:?} from {:?}: {}", image, path, e),
            }
        }

        let mut fonts = FontStore::new();
        for font in FontId::ALL {
            let path = config.asset_path(font.file_name());
            match rl.load_font_ex(&thread, &path.to_string_lossy(), font.size(), None) {
                Ok(loaded) => fonts.add(font, loaded),
                Err(e) => warn!("Failed to load font {:?} from {:?}: {}", font, path, e),
            }
        }
        info!(
            "Loaded {} textures and {} fonts",
            textures.len(),
            fonts.len()
        );

        let audio = AudioBridge::setup();
        for music in MusicId::ALL {
            let path = config.asset_path(music.file_name());
            audio.send(AudioCmd::LoadMusic {
                id: music,
                path: path.to_string_lossy().into_owned(),
            });
        }
        for sound in SoundId::ALL {
            let path = config.asset_path(sound.file_name());
            audio.send(AudioCmd::LoadFx {
                id: sound,
                path: path.to_string_lossy().into_owned(),
            });
        }

        Self {
            textures,
            fonts,
            audio: Some(audio),
            events: VecDeque::new(),
            input_fresh: true,
            rl,
            thread,
        }
    }

    fn send_audio(&self, cmd: AudioCmd) {
        if let Some(audio) = &self.audio {
            audio.send(cmd);
        }
    }

    fn drain_audio_messages(&self) {
        let Some(audio) = &self.audio else {
            return;
        };
        for message in audio.drain() {
            match message {
                AudioMessage::MusicLoadFailed { id, error } => {
                    warn!("Music {:?} failed to load: {}", id, error)
                }
                AudioMessage::FxLoadFailed { id, error } => {
                    warn!("Sound {:?} failed to load: {}", id, error)
                }
                other => debug!("audio: {:?}", other),
            }
        }
    }

    /// Turns this frame's key and mouse state into queued events.
    fn gather_input(&mut self) {
        if self.rl.window_should_close() {
            self.events.push_back(InputEvent::Quit);
        }
        for (rl_key, key) in KEY_MAP {
            if self.rl.is_key_pressed(rl_key) {
                self.events.push_back(InputEvent::KeyDown(key));
            }
            if self.rl.is_key_released(rl_key) {
                self.events.push_back(InputEvent::KeyUp(key));
            }
        }
        if self
            .rl
            .is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT)
        {
            self.events.push_back(InputEvent::MouseButtonUp);
        }
        let delta = self.rl.get_mouse_delta();
        if delta.x != 0.0 || delta.y != 0.0 {
            self.events.push_back(InputEvent::MouseMotion);
        }
    }
}

impl Platform for DesktopPlatform {
    fn poll_event(&mut self) -> Option<InputEvent> {
        if self.input_fresh {
            self.input_fresh = false;
            self.drain_audio_messages();
            self.gather_input();
        }
        self.events.pop_front()
    }

    fn present(&mut self, frame: &Frame) {
        let mut d = self.rl.begin_drawing(&self.thread);
        for cmd in frame.commands() {
            match cmd {
                DrawCmd::Clear(color) => d.clear_background(rl_color(*color)),
                DrawCmd::Sprite {
                    image,
                    source,
                    destination,
                    tint,
                } => {
                    if let Some(texture) = self.textures.get(*image) {
                        d.draw_texture_pro(
                            texture,
                            rl_rect(*source),
                            rl_rect(*destination),
                            Vector2::zero(),
                            0.0,
                            rl_color(*tint),
                        );
                    }
                }
                DrawCmd::Text {
                    font,
                    text,
                    destination,
                    tint,
                } => {
                    let position = Vector2::new(destination.x as f32, destination.y as f32);
                    match self.fonts.get(*font) {
                        Some(loaded) => d.draw_text_ex(
                            loaded,
                            text,
                            position,
                            font.size() as f32,
                            TEXT_SPACING,
                            rl_color(*tint),
                        ),
                        None => d.draw_text(
                            text,
                            destination.x,
                            destination.y,
                            font.size(),
                            rl_color(*tint),
                        ),
                    }
                }
                DrawCmd::FillRect { rect, color } => {
                    d.draw_rectangle(rect.x, rect.y, rect.w, rect.h, rl_color(*color))
                }
                DrawCmd::StrokeRect { rect, color } => {
                    d.draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, rl_color(*color))
                }
            }
        }
        drop(d);
        self.input_fresh = true;
    }

    fn delay(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }

    fn viewport(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.rl.get_screen_width(),
            self.rl.get_screen_height(),
        )
    }

    fn image_size(&self, image: ImageId) -> Option<Size> {
        self.textures.size(image)
    }

    fn text_size(&self, font: FontId, text: &str) -> Size {
        let Ok(c_text) = CString::new(text) else {
            warn!("Text with an interior NUL cannot be measured: {:?}", text);
            return Size::new(0, font.size());
        };
        match self.fonts.get(font) {
            Some(loaded) => {
                let measured = unsafe {
                    ffi::MeasureTextEx(
                        **loaded,
                        c_text.as_ptr(),
                        font.size() as f32,
                        TEXT_SPACING,
                    )
                };
                Size::new(measured.x.ceil() as i32, measured.y.ceil() as i32)
            }
            None => {
                let width = unsafe { ffi::MeasureText(c_text.as_ptr(), font.size()) };
                Size::new(width, font.size())
            }
        }
    }

    fn play_music(&mut self, music: MusicId, volume: f32) {
        self.send_audio(AudioCmd::PlayMusic { id: music, volume });
    }

    fn pause_music(&mut self) {
        self.send_audio(AudioCmd::PauseMusic);
    }

    fn resume_music(&mut self) {
        self.send_audio(AudioCmd::ResumeMusic);
    }

    fn stop_music(&mut self) {
        self.send_audio(AudioCmd::StopMusic);
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.send_audio(AudioCmd::PlayFx { id: sound });
    }

    fn halt_sounds(&mut self) {
        self.send_audio(AudioCmd::HaltFx);
    }

    fn toggle_fullscreen(&mut self) {
        self.rl.toggle_fullscreen();
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if visible {
            self.rl.show_cursor();
        } else {
            self.rl.hide_cursor();
        }
    }
}

impl Drop for DesktopPlatform {
    fn drop(&mut self) {
        if let Some(audio) = self.audio.take() {
            audio.shutdown();
        }
    }
}
