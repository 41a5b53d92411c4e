//! Screen-independent events.
//!
//! Every screen understands the same small vocabulary of commands (quit, go
//! to the help page, toggle music...). [`CommonEvent::from_input`] maps raw
//! [`InputEvent`]s onto it; screens then translate a [`CommonEvent`] into a
//! screen transition with
//! [`from_common_event`](crate::screens::from_common_event).

use crate::events::input::{InputEvent, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonEvent {
    None,
    Quit,
    Play,
    Help,
    Credits,
    Intro,
    ToggleFullscreen,
    ToggleMusic,
    ToggleSound,
}

impl CommonEvent {
    /// Decodes a raw input event. Only key releases and mouse button releases
    /// carry meaning; everything else is [`CommonEvent::None`].
    pub fn from_input(event: &InputEvent) -> CommonEvent {
        match event {
            InputEvent::Quit => CommonEvent::Quit,
            InputEvent::MouseButtonUp => CommonEvent::Play,
            InputEvent::KeyUp(key) => match key {
                Key::Return | Key::Space => CommonEvent::Play,
                Key::F1 | Key::H => CommonEvent::Help,
                Key::F2 | Key::I => CommonEvent::Intro,
                Key::F3 | Key::C => CommonEvent::Credits,
                Key::Q | Key::X | Key::Escape => CommonEvent::Quit,
                Key::F9 | Key::S => CommonEvent::ToggleSound,
                Key::F10 | Key::M => CommonEvent::ToggleMusic,
                Key::F11 | Key::F => CommonEvent::ToggleFullscreen,
                _ => CommonEvent::None,
            },
            InputEvent::KeyDown(_) | InputEvent::MouseMotion => CommonEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_keys() {
        for key in [Key::Return, Key::Space] {
            assert_eq!(
                CommonEvent::from_input(&InputEvent::KeyUp(key)),
                CommonEvent::Play
            );
        }
        assert_eq!(
            CommonEvent::from_input(&InputEvent::MouseButtonUp),
            CommonEvent::Play
        );
    }

    #[test]
    fn test_quit_keys_and_window_close() {
        for key in [Key::Q, Key::X, Key::Escape] {
            assert_eq!(
                CommonEvent::from_input(&InputEvent::KeyUp(key)),
                CommonEvent::Quit
            );
        }
        assert_eq!(CommonEvent::from_input(&InputEvent::Quit), CommonEvent::Quit);
    }

    #[test]
    fn test_navigation_and_toggles() {
        let decode = |k| CommonEvent::from_input(&InputEvent::KeyUp(k));
        assert_eq!(decode(Key::F1), CommonEvent::Help);
        assert_eq!(decode(Key::H), CommonEvent::Help);
        assert_eq!(decode(Key::F2), CommonEvent::Intro);
        assert_eq!(decode(Key::I), CommonEvent::Intro);
        assert_eq!(decode(Key::F3), CommonEvent::Credits);
        assert_eq!(decode(Key::C), CommonEvent::Credits);
        assert_eq!(decode(Key::F9), CommonEvent::ToggleSound);
        assert_eq!(decode(Key::S), CommonEvent::ToggleSound);
        assert_eq!(decode(Key::F10), CommonEvent::ToggleMusic);
        assert_eq!(decode(Key::M), CommonEvent::ToggleMusic);
        assert_eq!(decode(Key::F11), CommonEvent::ToggleFullscreen);
        assert_eq!(decode(Key::F), CommonEvent::ToggleFullscreen);
    }

    #[test]
    fn test_key_down_is_ignored() {
        assert_eq!(
            CommonEvent::from_input(&InputEvent::KeyDown(Key::Space)),
            CommonEvent::None
        );
        assert_eq!(
            CommonEvent::from_input(&InputEvent::KeyUp(Key::Left)),
            CommonEvent::None
        );
        assert_eq!(
            CommonEvent::from_input(&InputEvent::MouseMotion),
            CommonEvent::None
        );
    }
}
