//! Audio subsystem: the playback session and the engines behind it.
//!
//! `session` arbitrates the single playback slot and publishes state to the
//! UI. It talks to audio only through the `engine` traits; `player` provides
//! the `rodio`-backed implementation used by the binary.

mod engine;
mod error;
mod player;
mod session;
mod sink;
mod source;
mod thread;
mod types;

pub use engine::{Loaded, MediaEngine, SoundHandle, StatusUpdates};
pub use error::{EngineError, EngineResult};
pub use player::{RodioEngine, RodioSound};
pub use session::PlaybackSession;
pub use types::{
    EngineStatus, Generation, LoadOptions, PlaybackState, Progress, SessionSnapshot,
};
