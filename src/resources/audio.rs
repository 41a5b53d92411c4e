//! Bridge between the main thread and the background audio thread.
//!
//! Use [`AudioBridge::setup`] once during initialization to spawn the audio
//! thread. Call [`AudioBridge::shutdown`] during teardown to stop the thread
//! and free audio resources.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;

/// Shared bridge between the game and the audio thread.
///
/// Commands go out through [`AudioBridge::tx_cmd`]; state changes come back
/// through [`AudioBridge::rx_msg`].
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (game -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> game).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

impl AudioBridge {
    /// Creates the command/message channels and spawns [`audio_thread`].
    pub fn setup() -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
        let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

        let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

        Self {
            tx_cmd,
            rx_msg,
            handle,
        }
    }

    /// Queues a command. A closed channel means the thread already exited.
    pub fn send(&self, cmd: AudioCmd) {
        if self.tx_cmd.send(cmd).is_err() {
            warn!("Audio thread is gone, command dropped");
        }
    }

    /// Non-blocking drain of everything the audio thread reported.
    pub fn drain(&self) -> Vec<AudioMessage> {
        self.rx_msg.try_iter().collect()
    }

    /// Sends [`AudioCmd::Shutdown`] and waits for the thread to exit.
    pub fn shutdown(self) {
        let _ = self.tx_cmd.send(AudioCmd::Shutdown);
        let _ = self.handle.join();
    }
}
