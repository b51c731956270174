use std::cell::Cell;
use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tokio::sync::{mpsc as tokio_mpsc, oneshot};
use tracing::debug;

use crate::config::AudioSettings;

use super::engine::{Loaded, MediaEngine, SoundHandle};
use super::error::{EngineError, EngineResult};
use super::source;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, EngineStatus, LoadOptions};

/// Media engine backed by `rodio`, running on a dedicated audio thread.
pub struct RodioEngine {
    tx: Sender<AudioCmd>,
    next_id: Cell<u64>,
    fetch_timeout: Duration,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioEngine {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let fetch_timeout = Duration::from_millis(audio_settings.fetch_timeout_ms);
        let audio_handle = spawn_audio_thread(rx, audio_settings);

        Self {
            tx,
            next_id: Cell::new(0),
            fetch_timeout,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    /// Stop the audio thread and wait for it to exit.
    pub fn shutdown(&self) {
        let _ = self.tx.send(AudioCmd::Shutdown);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl MediaEngine for RodioEngine {
    type Sound = RodioSound;

    async fn load(&self, uri: &str, options: LoadOptions) -> EngineResult<Loaded<RodioSound>> {
        let owned = uri.to_string();
        let timeout = self.fetch_timeout;
        let data = tokio::task::spawn_blocking(move || source::fetch(&owned, timeout))
            .await
            .map_err(|e| EngineError::Fetch {
                uri: uri.to_string(),
                reason: e.to_string(),
            })??;

        let id = self.next_id();
        debug!("Loading sound #{id} from {uri}");
        let (updates_tx, updates) = tokio_mpsc::unbounded_channel::<EngineStatus>();
        request(&self.tx, |reply| AudioCmd::Load {
            id,
            uri: uri.to_string(),
            data,
            options,
            updates: updates_tx,
            reply,
        })
        .await?;

        Ok(Loaded {
            sound: RodioSound {
                id,
                tx: self.tx.clone(),
            },
            updates,
        })
    }
}

/// A sound loaded into the audio thread.
pub struct RodioSound {
    id: u64,
    tx: Sender<AudioCmd>,
}

impl SoundHandle for RodioSound {
    async fn status(&self) -> EngineResult<EngineStatus> {
        let id = self.id;
        request(&self.tx, |reply| AudioCmd::Status { id, reply }).await
    }

    async fn play(&self) -> EngineResult<()> {
        let id = self.id;
        request(&self.tx, |reply| AudioCmd::Play { id, reply }).await
    }

    async fn pause(&self) -> EngineResult<()> {
        let id = self.id;
        request(&self.tx, |reply| AudioCmd::Pause { id, reply }).await
    }

    async fn stop(&self) -> EngineResult<()> {
        let id = self.id;
        request(&self.tx, |reply| AudioCmd::Stop { id, reply }).await
    }

    async fn set_position(&self, position_millis: u64) -> EngineResult<()> {
        let id = self.id;
        request(&self.tx, |reply| AudioCmd::SetPosition {
            id,
            position_millis,
            reply,
        })
        .await
    }

    async fn unload(&self) -> EngineResult<()> {
        let id = self.id;
        request(&self.tx, |reply| AudioCmd::Unload { id, reply }).await
    }
}

/// Send a command and wait for the audio thread's answer.
async fn request<T>(
    tx: &Sender<AudioCmd>,
    build: impl FnOnce(oneshot::Sender<EngineResult<T>>) -> AudioCmd,
) -> EngineResult<T> {
    let (reply, answer) = oneshot::channel();
    tx.send(build(reply)).map_err(|_| EngineError::EngineGone)?;
    answer.await.map_err(|_| EngineError::EngineGone)?
}
