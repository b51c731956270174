//! Utilities for creating `rodio` sinks from downloaded sources.
//!
//! The helper here decodes the retained bytes of a sound and prepares a
//! paused `Sink` at the requested start position. Seeking rebuilds the sink
//! through this helper.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::error::{EngineError, EngineResult};

/// Create a paused `Sink` for `data` that starts playback at `start_at`.
///
/// Also returns the length of one pass through the source, when known.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    uri: &str,
    data: &Arc<[u8]>,
    start_at: Duration,
    looping: bool,
    volume: f32,
) -> EngineResult<(Sink, Option<Duration>)> {
    let source = Decoder::new(Cursor::new(Arc::clone(data))).map_err(|e| EngineError::Decode {
        uri: uri.to_string(),
        reason: e.to_string(),
    })?;
    let duration = source.total_duration();

    let sink = Sink::connect_new(handle.mixer());
    sink.set_volume(volume);
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    if looping {
        sink.append(source.repeat_infinite().skip_duration(start_at));
    } else {
        sink.append(source.skip_duration(start_at));
    }
    sink.pause();
    Ok((sink, duration))
}
