//! Background worker threads with shared, mutex-protected state.
//!
//! A [`Worker<T>`] owns some state `T` behind an `Arc<Mutex<T>>` and can run
//! one OS thread at a time over it. The thread body receives a
//! [`WorkerContext`] giving it the shared state, its enabled flag and an
//! interruptible sleep.
//!
//! Lifecycle:
//! - [`Worker::start`] spawns a thread. Starting while a previous thread is
//!   still attached is refused. In safe mode the state mutex is try-locked
//!   first and the start is abandoned if someone holds it.
//! - [`Worker::detach`] gives up the join handle; the thread keeps running
//!   until stopped or until its body returns.
//! - [`Worker::stop`] clears the enabled flag and wakes the thread. An
//!   attached thread is joined; a detached one winds down on its own.
//!
//! Each run gets its own enabled flag and wake channel, so a later start can
//! never revive a thread that was told to stop.
//!
//! Lock poisoning is ignored: the state is plain data and a panicking worker
//! leaves it as consistent as any interrupted tick would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::{debug, error, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker '{0}' already has an attached thread")]
    AlreadyAttached(String),
    #[error("worker '{0}' state is locked")]
    StateLocked(String),
    #[error("failed to spawn worker '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// What a running thread sees of its worker.
pub struct WorkerContext<T> {
    state: Arc<Mutex<T>>,
    enabled: Arc<AtomicBool>,
    wake: Receiver<()>,
}

impl<T> WorkerContext<T> {
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        lock_state(&self.state)
    }

    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        try_lock_state(&self.state)
    }

    /// Sleeps for `duration` or until the worker is stopped, whichever comes
    /// first. Returns whether the worker is still enabled.
    pub fn sleep(&self, duration: Duration) -> bool {
        match self.wake.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => self.is_enabled(),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }
}

struct Run {
    enabled: Arc<AtomicBool>,
    // Dropping the sender wakes the thread out of `WorkerContext::sleep`.
    wake: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Run {
    fn signal_stop(&mut self) {
        self.enabled.store(false, Ordering::Release);
        self.wake.take();
    }

    fn is_attached(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

pub struct Worker<T> {
    name: String,
    state: Arc<Mutex<T>>,
    run: Option<Run>,
}

impl<T: Send + 'static> Worker<T> {
    pub fn new(name: impl Into<String>, state: T) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(state)),
            run: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        lock_state(&self.state)
    }

    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        try_lock_state(&self.state)
    }

    /// Shared handle to the state, for readers that outlive a borrow.
    pub fn state(&self) -> Arc<Mutex<T>> {
        Arc::clone(&self.state)
    }

    /// A thread is running and still joinable.
    pub fn is_attached(&self) -> bool {
        self.run.as_ref().is_some_and(Run::is_attached)
    }

    /// The current run has not been told to stop. Says nothing about whether
    /// its body already returned.
    pub fn is_enabled(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|r| r.enabled.load(Ordering::Acquire))
    }

    /// Spawns `body` on a new thread.
    ///
    /// Any previous detached or finished run is told to stop first.
    pub fn start<F>(&mut self, safe_mode: bool, body: F) -> Result<(), WorkerError>
    where
        F: FnOnce(WorkerContext<T>) + Send + 'static,
    {
        if self.is_attached() {
            error!("Worker '{}' is already running", self.name);
            return Err(WorkerError::AlreadyAttached(self.name.clone()));
        }
        if safe_mode {
            match self.state.try_lock() {
                Ok(_) | Err(TryLockError::Poisoned(_)) => {}
                Err(TryLockError::WouldBlock) => {
                    warn!("Worker '{}' state is locked, not starting", self.name);
                    return Err(WorkerError::StateLocked(self.name.clone()));
                }
            }
        }
        self.retire();

        let enabled = Arc::new(AtomicBool::new(true));
        let (wake_tx, wake_rx) = crossbeam_channel::bounded::<()>(0);
        let context = WorkerContext {
            state: Arc::clone(&self.state),
            enabled: Arc::clone(&enabled),
            wake: wake_rx,
        };
        let handle = thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || body(context))
            .map_err(|source| WorkerError::Spawn {
                name: self.name.clone(),
                source,
            })?;
        debug!("Worker '{}' started", self.name);
        self.run = Some(Run {
            enabled,
            wake: Some(wake_tx),
            handle: Some(handle),
        });
        Ok(())
    }

    /// Lets the current thread run on its own. It can still be stopped.
    pub fn detach(&mut self) {
        if let Some(run) = self.run.as_mut() {
            run.handle.take();
        }
    }

    /// Stops the current run, joining it if attached.
    pub fn stop(&mut self) {
        let Some(mut run) = self.run.take() else {
            return;
        };
        run.signal_stop();
        if let Some(handle) = run.handle.take() {
            if handle.thread().id() == thread::current().id() {
                warn!("Worker '{}' asked to join itself", self.name);
                return;
            }
            if handle.join().is_err() {
                error!("Worker '{}' panicked", self.name);
            }
        }
        debug!("Worker '{}' stopped", self.name);
    }

    // Tells a detached or finished run to stop without waiting for it.
    fn retire(&mut self) {
        if let Some(mut run) = self.run.take() {
            run.signal_stop();
        }
    }
}

impl<T> Drop for Worker<T> {
    fn drop(&mut self) {
        if let Some(mut run) = self.run.take() {
            run.signal_stop();
            if let Some(handle) = run.handle.take()
                && handle.thread().id() != thread::current().id()
            {
                let _ = handle.join();
            }
        }
    }
}

fn lock_state<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn try_lock_state<T>(state: &Mutex<T>) -> Option<MutexGuard<'_, T>> {
    match state.try_lock() {
        Ok(guard) => Some(guard),
        Err(TryLockError::Poisoned(e)) => Some(e.into_inner()),
        Err(TryLockError::WouldBlock) => None,
    }
}
