//! Animation driver.
//!
//! Every animated sprite owns an [`AnimationDriver`]: a [`Worker`] running
//! over the sprite's [`SpriteAnimation`]. While enabled, the worker thread
//! loops:
//!
//! 1. lock the animation
//! 2. [`advance`](SpriteAnimation::advance) it and publish the new tile offset
//! 3. unlock
//! 4. sleep for the returned frame delay, or [`DEFAULT_FRAME_DELAY_MS`] when
//!    the animation returned zero
//!
//! The draw phase never takes the lock. It reads the last published tile
//! offset from a [`FrameSnapshot`], which may be one tick old but is never
//! half-written.
//!
//! # Related
//!
//! - [`crate::systems::worker`] – thread lifecycle
//! - [`crate::components::animatedsprite`] – the sprite type using this driver

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, MutexGuard};
use std::time::Duration;

use log::debug;

use crate::components::animation::{DirectionFlags, PlayMode, SpriteAnimation, StateFlags};
use crate::components::rect::Point;
use crate::resources::random::RandomSource;
use crate::systems::worker::{Worker, WorkerContext, WorkerError};

/// Sleep used when an animation reports no delay of its own.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 50;

/// Tile offset packed into one atomic word.
#[derive(Debug, Default)]
pub struct FrameSnapshot {
    packed: AtomicU64,
}

impl FrameSnapshot {
    pub fn store(&self, offset: Point) {
        let packed = ((offset.x as u32 as u64) << 32) | (offset.y as u32 as u64);
        self.packed.store(packed, Ordering::Release);
    }

    pub fn load(&self) -> Point {
        let packed = self.packed.load(Ordering::Acquire);
        Point::new((packed >> 32) as u32 as i32, packed as u32 as i32)
    }
}

pub struct AnimationDriver {
    worker: Worker<SpriteAnimation>,
    frame: Arc<FrameSnapshot>,
}

impl AnimationDriver {
    pub fn new(name: impl Into<String>, animation: SpriteAnimation) -> Self {
        let frame = Arc::new(FrameSnapshot::default());
        frame.store(animation.tile_offset());
        Self {
            worker: Worker::new(name, animation),
            frame,
        }
    }

    pub fn name(&self) -> &str {
        self.worker.name()
    }

    /// Exclusive access to the animation. Keep it short: the worker blocks
    /// on the same lock every tick.
    pub fn lock(&self) -> MutexGuard<'_, SpriteAnimation> {
        self.worker.lock()
    }

    pub fn try_lock(&self) -> Option<MutexGuard<'_, SpriteAnimation>> {
        self.worker.try_lock()
    }

    /// Locks and selects the next animation.
    pub fn reset(&self, play_mode: PlayMode, state: StateFlags, direction: DirectionFlags) {
        self.lock().reset(play_mode, state, direction);
    }

    /// Publishes the current tile without waiting for the next tick.
    pub fn sync_frame(&self) {
        let offset = self.lock().tile_offset();
        self.frame.store(offset);
    }

    /// Last published tile offset.
    pub fn current_frame(&self) -> Point {
        self.frame.load()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_enabled()
    }

    pub fn is_attached(&self) -> bool {
        self.worker.is_attached()
    }

    /// Starts ticking on an attached thread. Fails if already running or if
    /// the animation is locked by someone else.
    pub fn start(&mut self, rng: RandomSource) -> Result<(), WorkerError> {
        let frame = Arc::clone(&self.frame);
        self.worker
            .start(true, move |ctx| run_animation(ctx, frame, rng))
    }

    /// Starts ticking and lets the thread run on its own.
    pub fn start_detached(&mut self, rng: RandomSource) -> Result<(), WorkerError> {
        self.start(rng)?;
        self.worker.detach();
        Ok(())
    }

    /// Stops ticking. Returns once the thread has exited if it was attached.
    pub fn stop(&mut self) {
        self.worker.stop();
    }
}

fn run_animation(
    ctx: WorkerContext<SpriteAnimation>,
    frame: Arc<FrameSnapshot>,
    mut rng: RandomSource,
) {
    debug!("Animation thread {:?} running", std::thread::current().name());
    while ctx.is_enabled() {
        let delay_ms = {
            let mut animation = ctx.lock();
            let delay_ms = animation.advance(&mut rng);
            frame.store(animation.tile_offset());
            delay_ms
        };
        let delay_ms = if delay_ms > 0 {
            delay_ms
        } else {
            DEFAULT_FRAME_DELAY_MS
        };
        if !ctx.sleep(Duration::from_millis(delay_ms as u64)) {
            break;
        }
    }
    debug!("Animation thread {:?} done", std::thread::current().name());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::AnimationEntry;
    use std::thread;

    fn looping(delay_ms: u32) -> SpriteAnimation {
        let mut a = SpriteAnimation::new(4, 10, 10).with_entries([AnimationEntry::new(
            StateFlags::SWIM,
            DirectionFlags::LEFT,
            0,
            8,
            delay_ms,
        )]);
        a.reset(PlayMode::Loop, StateFlags::SWIM, DirectionFlags::LEFT);
        a
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let s = FrameSnapshot::default();
        s.store(Point::new(2880, 1000));
        assert_eq!(s.load(), Point::new(2880, 1000));
    }

    #[test]
    fn test_driver_advances_and_publishes() {
        let mut d = AnimationDriver::new("fish", looping(2));
        d.start(RandomSource::with_seed(0)).unwrap();
        thread::sleep(Duration::from_millis(40));
        d.stop();
        let animation = d.lock();
        assert!(animation.tile_index < 8);
        assert_eq!(d.current_frame(), animation.tile_offset());
    }

    #[test]
    fn test_stop_joins_and_freezes_index() {
        let mut d = AnimationDriver::new("bird", looping(1));
        d.start(RandomSource::with_seed(0)).unwrap();
        thread::sleep(Duration::from_millis(20));
        d.stop();
        assert!(!d.is_attached());
        assert!(!d.is_running());
        let frozen = d.lock().tile_index;
        thread::sleep(Duration::from_millis(20));
        assert_eq!(d.lock().tile_index, frozen);
    }

    #[test]
    fn test_detached_driver_winds_down_after_stop() {
        let mut d = AnimationDriver::new("turtle", looping(1));
        d.start_detached(RandomSource::with_seed(0)).unwrap();
        assert!(!d.is_attached());
        assert!(d.is_running());
        thread::sleep(Duration::from_millis(20));
        d.stop();
        assert!(!d.is_running());
        // The thread exits on its own; give it time, then ticks must stop.
        thread::sleep(Duration::from_millis(50));
        let frozen = d.lock().tile_index;
        thread::sleep(Duration::from_millis(30));
        assert_eq!(d.lock().tile_index, frozen);
        assert_eq!(d.current_frame(), d.lock().tile_offset());
    }

    #[test]
    fn test_double_start_fails() {
        let mut d = AnimationDriver::new("crab", looping(5));
        d.start(RandomSource::with_seed(0)).unwrap();
        assert!(d.start(RandomSource::with_seed(0)).is_err());
        d.stop();
    }

    #[test]
    fn test_no_match_falls_back_to_default_delay() {
        let mut a = looping(5);
        a.reset(PlayMode::Loop, StateFlags::FLY, DirectionFlags::RIGHT);
        let mut d = AnimationDriver::new("lost", a);
        d.start(RandomSource::with_seed(0)).unwrap();
        thread::sleep(Duration::from_millis(10));
        assert!(d.is_running());
        d.stop();
        assert_eq!(d.lock().tile_index, 0);
    }

    #[test]
    fn test_reset_is_seen_by_worker() {
        let mut d = AnimationDriver::new("diver", looping(1));
        d.lock().push(AnimationEntry::new(
            StateFlags::IDLE,
            DirectionFlags::RIGHT,
            20,
            2,
            1,
        ));
        d.start(RandomSource::with_seed(0)).unwrap();
        d.reset(PlayMode::Loop, StateFlags::IDLE, DirectionFlags::RIGHT);
        thread::sleep(Duration::from_millis(30));
        d.stop();
        assert!((20..22).contains(&d.lock().tile_index));
    }
}
