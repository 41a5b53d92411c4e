//! Raw input events.
//!
//! This module defines [`InputEvent`], the backend-neutral event a
//! [`Platform`](crate::platform::Platform) hands to the screens, and the
//! [`Key`] enum listing every key the game reacts to. Backends translate
//! their own key codes into these; unknown keys are dropped at the source.

/// Physical keys the game knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Return,
    Space,
    Escape,
    Left,
    Right,
    Up,
    Down,
    RightCtrl,
    RightShift,
    F1,
    F2,
    F3,
    F9,
    F10,
    F11,
    C,
    F,
    H,
    I,
    M,
    P,
    Q,
    S,
    X,
}

/// Enumeration of input events delivered by a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was asked to close.
    Quit,
    /// A key went down.
    KeyDown(Key),
    /// A key was released.
    KeyUp(Key),
    /// A mouse button was released.
    MouseButtonUp,
    /// The pointer moved.
    MouseMotion,
}
