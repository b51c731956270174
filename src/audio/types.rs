//! Audio-related small types.
//!
//! This module defines the values exchanged between the playback session,
//! the media engine and the UI (progress, published snapshots, engine
//! status reports and generation tokens).

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::catalog::Track;

use super::error::EngineResult;

/// Playback position and length of the current sound, in milliseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Progress {
    pub position_millis: u64,
    /// Never zero so progress bars can divide by it.
    pub duration_millis: u64,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            position_millis: 0,
            duration_millis: 1,
        }
    }
}

impl Progress {
    /// Fraction of the track already played, clamped to `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        let duration = self.duration_millis.max(1) as f64;
        (self.position_millis as f64 / duration).clamp(0.0, 1.0)
    }
}

/// The state of the playback session as seen by observers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No track.
    Idle,
    /// A track was requested and its handle is not confirmed yet.
    Loading,
    Playing,
    Paused,
    /// Handle loaded, position reset, not playing.
    Stopped,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything the session publishes to UI observers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    /// The track whose sound is loaded.
    pub current_track: Option<Track>,
    /// The track of the newest request still loading.
    pub pending_track: Option<Track>,
    pub is_playing: bool,
    pub is_loading: bool,
    pub show_mini_player: bool,
    pub progress: Progress,
    /// Set by `stop`, cleared as soon as playback starts again.
    pub stopped: bool,
    /// Message of the last failed load, cleared by the next request.
    pub last_error: Option<String>,
}

impl SessionSnapshot {
    pub fn state(&self) -> PlaybackState {
        if self.is_loading {
            PlaybackState::Loading
        } else if self.current_track.is_none() {
            PlaybackState::Idle
        } else if self.is_playing {
            PlaybackState::Playing
        } else if self.stopped {
            PlaybackState::Stopped
        } else {
            PlaybackState::Paused
        }
    }

    /// The track observers should name: the loaded one, else the one
    /// being loaded.
    pub fn displayed_track(&self) -> Option<&Track> {
        self.current_track.as_ref().or(self.pending_track.as_ref())
    }
}

/// Token identifying one `play_track` request.
///
/// Tokens are issued in increasing order; a request may only commit state
/// while its token is still the latest one issued.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub(crate) const fn initial() -> Self {
        Self(0)
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Status pushed by the media engine for a loaded sound.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EngineStatus {
    pub is_loaded: bool,
    pub is_playing: bool,
    pub position_millis: u64,
    pub duration_millis: Option<u64>,
    pub did_just_finish: bool,
    pub is_looping: bool,
}

/// How the engine should start a freshly loaded sound.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Start playing as soon as the sound is loaded.
    pub autoplay: bool,
    /// Repeat the sound forever.
    pub looping: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            looping: true,
        }
    }
}

/// Commands understood by the audio thread.
///
/// Every command carrying a `reply` gets exactly one answer.
#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Decode `data` and register it as sound `id`.
    Load {
        id: u64,
        uri: String,
        data: Arc<[u8]>,
        options: LoadOptions,
        updates: mpsc::UnboundedSender<EngineStatus>,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    /// Start or resume playback.
    Play {
        id: u64,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    Pause {
        id: u64,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    /// Pause and rewind to the start.
    Stop {
        id: u64,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    /// Jump to an absolute position, keeping the paused/playing state.
    SetPosition {
        id: u64,
        position_millis: u64,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    Status {
        id: u64,
        reply: oneshot::Sender<EngineResult<EngineStatus>>,
    },
    /// Drop the sound and close its status stream.
    Unload {
        id: u64,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    /// Stop everything and exit the audio thread.
    Shutdown,
}
