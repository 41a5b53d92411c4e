use crate::resources::assets::{MusicId, SoundId};

/// Commands sent *to* the audio thread
#[derive(Debug, Clone)]
pub enum AudioCmd {
    LoadMusic { id: MusicId, path: String },
    PlayMusic { id: MusicId, volume: f32 },
    StopMusic,
    PauseMusic,
    ResumeMusic,
    LoadFx { id: SoundId, path: String },
    PlayFx { id: SoundId },
    HaltFx,
    Shutdown,
}

/// Events sent *back* from the audio thread
#[derive(Debug, Clone)]
pub enum AudioMessage {
    MusicLoaded { id: MusicId },
    MusicLoadFailed { id: MusicId, error: String },
    MusicPlayStarted { id: MusicId },
    MusicStopped { id: MusicId },
    MusicFinished { id: MusicId },
    FxLoaded { id: SoundId },
    FxLoadFailed { id: SoundId, error: String },
    FxFinished { id: SoundId },
}
