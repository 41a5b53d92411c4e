//! Transient on-screen notice ("music disabled", ...).
//!
//! [`UserInfo::show`] sets the text and starts a detached worker that fades
//! the alpha in over a quarter of the delay, holds it for half, then fades it
//! out again. The draw phase reads the alpha from an atomic and never waits
//! on the worker.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use log::{debug, error};

use crate::components::anchor::Anchorage;
use crate::components::color::Color;
use crate::components::drawable::Drawable;
use crate::components::movable::Movable;
use crate::components::rect::Point;
use crate::components::sprite::{Sprite, SpriteSource};
use crate::platform::{Frame, Platform};
use crate::resources::assets::FontId;
use crate::systems::worker::{Worker, WorkerContext};

const FADE_STEPS: u32 = 10;
const MIN_DELAY_MS: u32 = 10;

pub struct UserInfo {
    sprite: Sprite,
    default_font: FontId,
    default_color: Color,
    font: FontId,
    color: Color,
    anchor: Point,
    anchorage: Anchorage,
    alpha: Arc<AtomicU8>,
    worker: Worker<()>,
}

impl UserInfo {
    pub fn new(font: FontId, color: Color) -> Self {
        Self {
            sprite: Sprite::new(),
            default_font: font,
            default_color: color,
            font,
            color,
            anchor: Point::default(),
            anchorage: Anchorage::CENTER,
            alpha: Arc::new(AtomicU8::new(0)),
            worker: Worker::new("user-info", ()),
        }
    }

    /// Hides any notice, restores the font and color given to
    /// [`new`](Self::new) and moves the notice to `anchor`.
    pub fn reset(&mut self, anchor: Point, anchorage: Anchorage) {
        self.worker.stop();
        // The fade holds the lock for its whole run.
        drop(self.worker.lock());
        self.alpha.store(0, Ordering::Release);
        self.set_color(self.default_color);
        self.set_font(self.default_font);
        self.set_anchorage_point(anchor, anchorage);
    }

    pub fn set_anchorage_point(&mut self, anchor: Point, anchorage: Anchorage) {
        self.anchor = anchor;
        self.anchorage = anchorage;
        self.sprite
            .set_position_anchored(anchor.x, anchor.y, anchorage);
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.sprite.color = color;
    }

    pub fn set_font(&mut self, font: FontId) {
        self.font = font;
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    pub fn alpha(&self) -> u8 {
        self.alpha.load(Ordering::Acquire)
    }

    pub fn message(&self) -> Option<&str> {
        match &self.sprite.source {
            SpriteSource::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Shows `message` for roughly `delay_ms` milliseconds. An empty message
    /// or a zero delay is refused.
    pub fn show(&mut self, platform: &dyn Platform, message: &str, delay_ms: u32) -> bool {
        if message.is_empty() || delay_ms == 0 {
            error!("Refusing to show user info {:?} for {} ms", message, delay_ms);
            return false;
        }
        let size = platform.text_size(self.font, message);
        self.sprite.set_text(self.font, message, size, self.color);
        self.sprite
            .set_position_anchored(self.anchor.x, self.anchor.y, self.anchorage);

        let delay_ms = delay_ms.max(MIN_DELAY_MS);
        let alpha = Arc::clone(&self.alpha);
        // A previous notice still fading is told to stop by `start`; the new
        // run waits for it to release the lock before touching alpha.
        if let Err(e) = self
            .worker
            .start(false, move |ctx| fade(ctx, alpha, delay_ms))
        {
            error!("Could not show user info: {}", e);
            return false;
        }
        self.worker.detach();
        debug!("User info: {}", message);
        true
    }

    pub fn draw(&self, frame: &mut Frame) {
        let alpha = self.alpha();
        if alpha > 0 {
            self.sprite.draw_alpha(frame, alpha);
        }
    }
}

fn fade(ctx: WorkerContext<()>, alpha: Arc<AtomicU8>, delay_ms: u32) {
    let _guard = ctx.lock();
    let ratio = 255.0 / FADE_STEPS as f32;
    let step = Duration::from_millis((delay_ms / 4 / FADE_STEPS) as u64);
    let hold = Duration::from_millis((delay_ms / 2) as u64);
    let set = |value: f32| alpha.store(value.clamp(0.0, 255.0) as u8, Ordering::Release);

    let mut value = 0.0;
    for _ in 0..FADE_STEPS {
        if !ctx.is_enabled() {
            return;
        }
        set(value);
        value += ratio;
        if !ctx.sleep(step) {
            return;
        }
    }
    set(255.0);
    if !ctx.sleep(hold) {
        set(0.0);
        return;
    }
    let mut value = 255.0;
    while value >= ratio {
        value -= ratio;
        set(value);
        if !ctx.sleep(step) {
            break;
        }
    }
    set(0.0);
}
