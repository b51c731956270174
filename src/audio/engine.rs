//! The media engine boundary.
//!
//! The playback session only talks to audio through these traits, so any
//! engine able to load a source, control a loaded sound and push status
//! updates can back it.

use tokio::sync::mpsc;

use super::error::EngineResult;
use super::types::{EngineStatus, LoadOptions};

/// Status updates pushed by the engine for one loaded sound.
///
/// The stream ends when the sound is unloaded.
pub type StatusUpdates = mpsc::UnboundedReceiver<EngineStatus>;

/// A freshly loaded sound together with its status subscription.
pub struct Loaded<S> {
    pub sound: S,
    pub updates: StatusUpdates,
}

#[allow(async_fn_in_trait)]
pub trait MediaEngine {
    type Sound: SoundHandle;

    /// Create a sound for `uri` and load it, starting playback right away
    /// when `options.autoplay` is set.
    async fn load(&self, uri: &str, options: LoadOptions) -> EngineResult<Loaded<Self::Sound>>;
}

/// Controls for one loaded sound.
#[allow(async_fn_in_trait)]
pub trait SoundHandle {
    async fn status(&self) -> EngineResult<EngineStatus>;
    async fn play(&self) -> EngineResult<()>;
    async fn pause(&self) -> EngineResult<()>;
    /// Pause and rewind.
    async fn stop(&self) -> EngineResult<()>;
    async fn set_position(&self, position_millis: u64) -> EngineResult<()>;
    /// Release the engine resources held by this sound.
    async fn unload(&self) -> EngineResult<()>;
}
