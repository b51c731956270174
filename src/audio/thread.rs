use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

use crate::config::AudioSettings;

use super::error::{EngineError, EngineResult};
use super::sink::create_sink_at;
use super::types::{AudioCmd, EngineStatus, LoadOptions};

/// A decoded sound owned by the audio thread.
struct LoadedSound {
    uri: String,
    data: Arc<[u8]>,
    sink: Sink,
    /// Length of one pass through the source.
    duration: Option<Duration>,
    looping: bool,
    paused: bool,
    finished: bool,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
    updates: UnboundedSender<EngineStatus>,
}

impl LoadedSound {
    fn open(
        stream: &OutputStream,
        uri: String,
        data: Arc<[u8]>,
        options: LoadOptions,
        updates: UnboundedSender<EngineStatus>,
        volume: f32,
    ) -> EngineResult<Self> {
        let (sink, duration) =
            create_sink_at(stream, &uri, &data, Duration::ZERO, options.looping, volume)?;

        let mut sound = Self {
            uri,
            data,
            sink,
            duration,
            looping: options.looping,
            paused: true,
            finished: false,
            started_at: None,
            accumulated: Duration::ZERO,
            updates,
        };
        if options.autoplay {
            sound.play();
        }
        Ok(sound)
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    /// Position inside the current pass through the source.
    fn position(&self) -> Duration {
        let elapsed = self.elapsed();
        match self.duration {
            Some(d) if self.looping && !d.is_zero() => {
                Duration::from_nanos((elapsed.as_nanos() % d.as_nanos()) as u64)
            }
            Some(d) => elapsed.min(d),
            None => elapsed,
        }
    }

    fn status(&self) -> EngineStatus {
        EngineStatus {
            is_loaded: true,
            is_playing: !self.paused,
            position_millis: self.position().as_millis() as u64,
            duration_millis: self.duration.map(|d| d.as_millis() as u64),
            did_just_finish: false,
            is_looping: self.looping,
        }
    }

    fn play(&mut self) {
        if !self.paused {
            return;
        }
        if self.finished {
            // Replaying a drained sound starts over.
            self.finished = false;
            self.accumulated = Duration::ZERO;
        }
        self.sink.play();
        self.paused = false;
        self.started_at = Some(Instant::now());
    }

    fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.sink.pause();
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
        self.paused = true;
    }

    /// Rebuild the sink and skip into the source.
    fn seek(&mut self, stream: &OutputStream, position: Duration, volume: f32) -> EngineResult<()> {
        let position = match self.duration {
            Some(d) if self.looping && !d.is_zero() => {
                Duration::from_nanos((position.as_nanos() % d.as_nanos()) as u64)
            }
            Some(d) if position > d => {
                return Err(EngineError::Seek(format!(
                    "{}ms is past the end of {} ({}ms)",
                    position.as_millis(),
                    self.uri,
                    d.as_millis()
                )));
            }
            _ => position,
        };
        let (new_sink, _) =
            create_sink_at(stream, &self.uri, &self.data, position, self.looping, volume)?;
        self.sink.stop();
        if !self.paused {
            new_sink.play();
            self.started_at = Some(Instant::now());
        }
        self.sink = new_sink;
        self.accumulated = position;
        self.finished = false;
        Ok(())
    }

    /// Push a status update; a drained non-looping sound reports completion once.
    fn report(&mut self) {
        if self.paused {
            return;
        }
        if !self.looping && self.sink.empty() && !self.finished {
            self.pause();
            self.finished = true;
            let status = EngineStatus {
                did_just_finish: true,
                ..self.status()
            };
            let _ = self.updates.send(status);
            return;
        }
        let _ = self.updates.send(self.status());
    }
}

pub(super) fn spawn_audio_thread(rx: Receiver<AudioCmd>, settings: AudioSettings) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // Dropping the stream would otherwise print over the TUI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!("No audio output device: {e}");
                None
            }
        };

        let mut sounds: HashMap<u64, LoadedSound> = HashMap::new();
        let interval = Duration::from_millis(settings.status_interval_ms.max(10));
        let mut last_report = Instant::now();

        loop {
            let timeout = interval.saturating_sub(last_report.elapsed());
            match rx.recv_timeout(timeout) {
                Ok(AudioCmd::Shutdown) => {
                    info!("Audio thread shutting down");
                    break;
                }
                Ok(cmd) => handle_command(cmd, stream.as_ref(), &mut sounds, settings.volume),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if last_report.elapsed() >= interval {
                for sound in sounds.values_mut() {
                    sound.report();
                }
                last_report = Instant::now();
            }
        }

        for (_, sound) in sounds.drain() {
            sound.sink.stop();
        }
    })
}

fn handle_command(
    cmd: AudioCmd,
    stream: Option<&OutputStream>,
    sounds: &mut HashMap<u64, LoadedSound>,
    volume: f32,
) {
    match cmd {
        AudioCmd::Load {
            id,
            uri,
            data,
            options,
            updates,
            reply,
        } => {
            let result = output(stream).and_then(|stream| {
                let sound = LoadedSound::open(stream, uri, data, options, updates, volume)?;
                debug!("Loaded sound #{id} ({} bytes)", sound.data.len());
                let _ = sound.updates.send(sound.status());
                sounds.insert(id, sound);
                Ok(())
            });
            let _ = reply.send(result);
        }
        AudioCmd::Play { id, reply } => {
            let _ = reply.send(with_sound(sounds, id, |sound| {
                sound.play();
                let _ = sound.updates.send(sound.status());
                Ok(())
            }));
        }
        AudioCmd::Pause { id, reply } => {
            let _ = reply.send(with_sound(sounds, id, |sound| {
                sound.pause();
                let _ = sound.updates.send(sound.status());
                Ok(())
            }));
        }
        AudioCmd::Stop { id, reply } => {
            let result = output(stream).and_then(|stream| {
                with_sound(sounds, id, |sound| {
                    sound.pause();
                    sound.seek(stream, Duration::ZERO, volume)
                })
            });
            let _ = reply.send(result);
        }
        AudioCmd::SetPosition {
            id,
            position_millis,
            reply,
        } => {
            let result = output(stream).and_then(|stream| {
                with_sound(sounds, id, |sound| {
                    sound.seek(stream, Duration::from_millis(position_millis), volume)
                })
            });
            let _ = reply.send(result);
        }
        AudioCmd::Status { id, reply } => {
            let _ = reply.send(with_sound(sounds, id, |sound| Ok(sound.status())));
        }
        AudioCmd::Unload { id, reply } => {
            let result = match sounds.remove(&id) {
                Some(sound) => {
                    // Dropping `updates` closes the subscription.
                    sound.sink.stop();
                    debug!("Unloaded sound #{id}");
                    Ok(())
                }
                None => Err(EngineError::UnknownSound(id)),
            };
            let _ = reply.send(result);
        }
        AudioCmd::Shutdown => {}
    }
}

fn output(stream: Option<&OutputStream>) -> EngineResult<&OutputStream> {
    stream.ok_or_else(|| EngineError::Output("no output device".to_string()))
}

fn with_sound<T>(
    sounds: &mut HashMap<u64, LoadedSound>,
    id: u64,
    f: impl FnOnce(&mut LoadedSound) -> EngineResult<T>,
) -> EngineResult<T> {
    let sound = sounds.get_mut(&id).ok_or(EngineError::UnknownSound(id))?;
    f(sound)
}
