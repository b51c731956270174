//! The playback session: one slot, one loaded sound at a time.
//!
//! All operations run as local tasks on a single thread and interleave at
//! engine calls. Overlapping `play_track` requests are arbitrated with
//! generation tokens: a request only commits while its token is the latest
//! one issued, and a load that completes after being superseded is released
//! without touching the published state.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::catalog::Track;
use crate::config::{LoadFailurePolicy, PlaybackSettings};

use super::engine::{Loaded, MediaEngine, SoundHandle, StatusUpdates};
use super::error::EngineError;
use super::types::{EngineStatus, Generation, LoadOptions, Progress, SessionSnapshot};

/// Shared handle to the playback session.
///
/// Construct it once at startup and hand clones to every consumer; all
/// clones drive the same slot and publish to the same observers.
pub struct PlaybackSession<E: MediaEngine> {
    inner: Rc<Inner<E>>,
}

impl<E: MediaEngine> Clone for PlaybackSession<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct Inner<E: MediaEngine> {
    engine: E,
    settings: PlaybackSettings,
    state: watch::Sender<SessionSnapshot>,
    latest: Cell<Generation>,
    active: RefCell<Option<ActiveSound<E::Sound>>>,
}

/// The committed sound and the task forwarding its status updates.
struct ActiveSound<S> {
    sound: Rc<S>,
    generation: Generation,
    listener: JoinHandle<()>,
}

impl<S> Drop for ActiveSound<S> {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

impl<E: MediaEngine + 'static> PlaybackSession<E> {
    pub fn new(engine: E, settings: PlaybackSettings) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Rc::new(Inner {
                engine,
                settings,
                state,
                latest: Cell::new(Generation::initial()),
                active: RefCell::new(None),
            }),
        }
    }

    pub fn engine(&self) -> &E {
        &self.inner.engine
    }

    /// Current published state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Observe every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    /// Replace whatever is playing with `track`.
    ///
    /// Failures are logged and reflected in the snapshot only.
    pub async fn play_track(&self, track: Track) {
        let generation = self.inner.issue_generation();
        info!("Play requested: {} ({})", track.title, track.id);

        self.inner.state.send_modify(|s| {
            s.pending_track = Some(track.clone());
            s.is_loading = true;
            s.show_mini_player = true;
            s.last_error = None;
        });

        self.inner.unload_current().await;
        if !self.inner.is_latest(generation) {
            debug!("Request for {} superseded before loading", track.id);
            return;
        }
        self.inner.state.send_modify(|s| {
            s.current_track = None;
            s.is_playing = false;
            s.stopped = false;
        });

        let options = LoadOptions {
            autoplay: true,
            looping: self.inner.settings.looping,
        };

        match self.inner.engine.load(&track.uri, options).await {
            Ok(loaded) => {
                if !self.inner.is_latest(generation) {
                    debug!(
                        "Discarding stale load of {} (generation {})",
                        track.id,
                        generation.get()
                    );
                    release(&loaded.sound).await;
                    return;
                }
                self.commit(generation, track, loaded);
            }
            Err(e) => {
                error!("Failed to play track {}: {e}", track.id);
                if self.inner.is_latest(generation) {
                    self.inner.fail(&e);
                } else {
                    debug!("Ignoring failure of superseded request for {}", track.id);
                }
            }
        }
    }

    /// Pause the current sound. No-op when idle or already paused.
    pub async fn pause(&self) {
        let Some((sound, generation)) = self.inner.current_sound() else {
            return;
        };

        match sound.status().await {
            Ok(status) if status.is_loaded && status.is_playing => {}
            Ok(_) => return,
            Err(e) => {
                warn!("Failed to pause: {e}");
                return;
            }
        }

        if let Err(e) = sound.pause().await {
            warn!("Failed to pause: {e}");
            return;
        }

        if self.inner.owns(generation) {
            self.inner.state.send_modify(|s| s.is_playing = false);
        }
    }

    /// Resume the current sound. No-op when idle or already playing.
    pub async fn resume(&self) {
        let Some((sound, generation)) = self.inner.current_sound() else {
            return;
        };

        match sound.status().await {
            Ok(status) if status.is_loaded && !status.is_playing => {}
            Ok(_) => return,
            Err(e) => {
                warn!("Failed to resume: {e}");
                return;
            }
        }

        if let Err(e) = sound.play().await {
            warn!("Failed to resume: {e}");
            return;
        }

        if self.inner.owns(generation) {
            self.inner.state.send_modify(|s| {
                s.is_playing = true;
                s.stopped = false;
            });
        }
    }

    /// Pause when playing, resume otherwise. Ignored while a load is pending.
    pub async fn toggle(&self) {
        let (loading, playing) = {
            let s = self.inner.state.borrow();
            (s.is_loading, s.is_playing)
        };
        if loading {
            return;
        }
        if playing {
            self.pause().await;
        } else {
            self.resume().await;
        }
    }

    /// Stop and rewind the current sound, keeping it as the current track.
    pub async fn stop(&self) {
        let Some((sound, generation)) = self.inner.current_sound() else {
            return;
        };

        let result = async {
            let status = sound.status().await?;
            if status.is_loaded {
                sound.stop().await?;
                sound.set_position(0).await?;
            }
            Ok::<(), EngineError>(())
        }
        .await;
        if let Err(e) = result {
            warn!("Failed to stop: {e}");
        }

        if self.inner.owns(generation) {
            self.inner.state.send_modify(|s| {
                s.is_playing = false;
                s.stopped = true;
                s.progress.position_millis = 0;
            });
        }
    }

    /// Release the current sound and hide the mini-player.
    ///
    /// Loads still in flight are invalidated.
    pub async fn dismiss(&self) {
        let generation = self.inner.issue_generation();
        self.inner.unload_current().await;

        if self.inner.is_latest(generation) {
            self.inner
                .state
                .send_modify(|s| *s = SessionSnapshot::default());
        }
    }

    /// Release everything before the process exits.
    pub async fn shutdown(&self) {
        info!("Shutting down playback session");
        self.dismiss().await;
    }

    fn commit(&self, generation: Generation, track: Track, loaded: Loaded<E::Sound>) {
        let Loaded { sound, updates } = loaded;
        let listener = spawn_status_listener(Rc::downgrade(&self.inner), generation, updates);

        {
            let mut slot = self.inner.active.borrow_mut();
            debug_assert!(slot.is_none(), "slot must be empty when committing");
            *slot = Some(ActiveSound {
                sound: Rc::new(sound),
                generation,
                listener,
            });
        }

        info!("Now playing: {} ({})", track.title, track.id);
        self.inner.state.send_modify(|s| {
            s.current_track = Some(track);
            s.pending_track = None;
            s.is_playing = true;
            s.is_loading = false;
            s.stopped = false;
            s.progress = Progress::default();
        });
    }
}

impl<E: MediaEngine> Inner<E> {
    fn issue_generation(&self) -> Generation {
        let next = self.latest.get().next();
        self.latest.set(next);
        next
    }

    fn is_latest(&self, generation: Generation) -> bool {
        self.latest.get() == generation
    }

    /// Whether the committed sound still belongs to `generation`.
    fn owns(&self, generation: Generation) -> bool {
        self.active
            .borrow()
            .as_ref()
            .is_some_and(|a| a.generation == generation)
    }

    fn current_sound(&self) -> Option<(Rc<E::Sound>, Generation)> {
        self.active
            .borrow()
            .as_ref()
            .map(|a| (Rc::clone(&a.sound), a.generation))
    }

    /// Take the sound out of the slot and release it.
    ///
    /// The slot is emptied before the first engine call, so concurrent
    /// callers never release the same sound twice.
    async fn unload_current(&self) {
        let Some(active) = self.active.borrow_mut().take() else {
            return;
        };
        let sound = Rc::clone(&active.sound);
        drop(active);

        release(sound.as_ref()).await;
    }

    fn fail(&self, err: &EngineError) {
        let hide = self.settings.on_load_failure == LoadFailurePolicy::HideMiniPlayer;
        self.state.send_modify(|s| {
            s.current_track = None;
            s.pending_track = None;
            s.is_playing = false;
            s.is_loading = false;
            s.stopped = false;
            s.last_error = Some(err.to_string());
            if hide {
                s.show_mini_player = false;
            }
        });
    }

    fn apply_status(&self, status: EngineStatus) {
        self.state.send_modify(|s| {
            if !status.is_loaded {
                s.is_playing = false;
                return;
            }

            s.is_playing = status.is_playing;
            s.progress = Progress {
                position_millis: status.position_millis,
                duration_millis: status.duration_millis.filter(|&d| d > 0).unwrap_or(1),
            };
            if status.is_playing {
                s.stopped = false;
            }
            if status.did_just_finish && !status.is_looping {
                s.is_playing = false;
            }
        });
    }
}

/// Best-effort stop, then unload. Errors are logged, never propagated.
async fn release<S: SoundHandle>(sound: &S) {
    match sound.status().await {
        Ok(status) if status.is_loaded => {
            let _ = sound.stop().await;
        }
        _ => {}
    }

    if let Err(e) = sound.unload().await {
        error!("Failed to unload sound: {e}");
    }
}

fn spawn_status_listener<E: MediaEngine + 'static>(
    session: Weak<Inner<E>>,
    generation: Generation,
    mut updates: StatusUpdates,
) -> JoinHandle<()> {
    tokio::task::spawn_local(async move {
        while let Some(status) = updates.recv().await {
            let Some(inner) = session.upgrade() else {
                break;
            };
            if !inner.owns(generation) {
                break;
            }
            inner.apply_status(status);
        }
    })
}
