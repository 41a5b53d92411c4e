//! Dedicated audio thread backed by raylib.
//!
//! [`audio_thread`] runs on its own OS thread, owns the raylib audio device
//! and every `Music`/`Sound` handle, and processes
//! [`AudioCmd`](crate::events::audio::AudioCmd) messages, answering with
//! [`AudioMessage`](crate::events::audio::AudioMessage)s.
//!
//! Only one music track plays at a time and it always loops; the game
//! switches tracks when it changes screens.
//!
//! See also: [`crate::events::audio`] and [`crate::resources::audio`].

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::assets::{MusicId, SoundId};
use crossbeam_channel::{Receiver, Sender};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Entry point of the dedicated audio thread.
///
/// Blocks until it receives [`AudioCmd::Shutdown`], then drops every handle
/// before the audio device. If the device cannot be opened the thread keeps
/// draining commands so senders never block, and plays nothing.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            eprintln!("[audio] device init failed error='{}', running silent", e);
            for cmd in rx_cmd.iter() {
                if matches!(cmd, AudioCmd::Shutdown) {
                    break;
                }
            }
            return;
        }
    };

    eprintln!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut musics: FxHashMap<MusicId, Music> = FxHashMap::default();
    let mut current: Option<MusicId> = None;
    let mut paused = false;
    let mut sounds: FxHashMap<SoundId, Sound> = FxHashMap::default();
    let mut fx_playing: FxHashSet<SoundId> = FxHashSet::default();

    'run: loop {
        // 1) Drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        eprintln!("[audio] loaded id={:?} path='{}'", id, path);
                        musics.insert(id, music);
                        let _ = tx_evt.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        eprintln!(
                            "[audio] load failed id={:?} path='{}' error='{}'",
                            id, path, e
                        );
                        let _ = tx_evt.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic { id, volume } => {
                    if let Some(previous) = current.take()
                        && let Some(music) = musics.get(&previous)
                    {
                        music.stop_stream();
                        let _ = tx_evt.send(AudioMessage::MusicStopped { id: previous });
                    }
                    if let Some(music) = musics.get(&id) {
                        eprintln!("[audio] play start id={:?} volume={}", id, volume);
                        music.set_volume(volume);
                        music.seek_stream(0.0);
                        music.play_stream();
                        current = Some(id);
                        paused = false;
                        let _ = tx_evt.send(AudioMessage::MusicPlayStarted { id });
                    } else {
                        eprintln!("[audio] play failed id={:?} reason='not loaded'", id);
                    }
                }
                AudioCmd::StopMusic => {
                    if let Some(id) = current.take()
                        && let Some(music) = musics.get(&id)
                    {
                        eprintln!("[audio] stop id={:?}", id);
                        music.stop_stream();
                        let _ = tx_evt.send(AudioMessage::MusicStopped { id });
                    }
                    paused = false;
                }
                AudioCmd::PauseMusic => {
                    if let Some(id) = current
                        && let Some(music) = musics.get(&id)
                    {
                        eprintln!("[audio] pause id={:?}", id);
                        music.pause_stream();
                    }
                    paused = true;
                }
                AudioCmd::ResumeMusic => {
                    if let Some(id) = current
                        && let Some(music) = musics.get(&id)
                    {
                        eprintln!("[audio] resume id={:?}", id);
                        music.resume_stream();
                    }
                    paused = false;
                }
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        eprintln!("[audio] fx loaded id={:?} path='{}'", id, path);
                        sounds.insert(id, sound);
                        let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        eprintln!(
                            "[audio] fx load failed id={:?} path='{}' error='{}'",
                            id, path, e
                        );
                        let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        eprintln!("[audio] fx play id={:?}", id);
                        sound.play();
                        fx_playing.insert(id);
                    } else {
                        eprintln!("[audio] fx play failed id={:?} reason='not loaded'", id);
                    }
                }
                AudioCmd::HaltFx => {
                    for id in fx_playing.drain() {
                        if let Some(sound) = sounds.get(&id) {
                            sound.stop();
                        }
                    }
                }
                AudioCmd::Shutdown => {
                    eprintln!("[audio] shutdown requested");
                    current = None;
                    musics.clear();
                    sounds.clear();
                    fx_playing.clear();
                    break 'run;
                }
            }
        }

        // 2) Pump the current stream; restart it when it runs out
        if let Some(id) = current
            && !paused
            && let Some(music) = musics.get(&id)
        {
            if music.is_stream_playing() {
                music.update_stream();
            } else {
                let len = music.get_time_length();
                let played = music.get_time_played();
                if played >= len - 0.01 {
                    eprintln!("[audio] restarting looped id={:?}", id);
                    let _ = tx_evt.send(AudioMessage::MusicFinished { id });
                    music.seek_stream(0.0);
                    music.play_stream();
                    let _ = tx_evt.send(AudioMessage::MusicPlayStarted { id });
                }
            }
        }

        // 3) Report sound effects that ended on their own
        let fx_ended: Vec<SoundId> = fx_playing
            .iter()
            .copied()
            .filter(|id| !sounds.get(id).is_some_and(|sound| sound.is_playing()))
            .collect();
        for id in fx_ended {
            fx_playing.remove(&id);
            let _ = tx_evt.send(AudioMessage::FxFinished { id });
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    } // 'run

    eprintln!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
}
