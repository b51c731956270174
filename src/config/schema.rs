use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lull/config.toml` or `~/.config/lull/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LULL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub catalog: CatalogSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the engine reports progress for playing sounds (milliseconds).
    pub status_interval_ms: u64,
    /// Output volume, 1.0 being the source level.
    pub volume: f32,
    /// Give up on a remote source that has not fully arrived after this long
    /// (milliseconds).
    pub fetch_timeout_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            status_interval_ms: 500,
            volume: 1.0,
            fetch_timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Repeat tracks forever.
    pub looping: bool,
    /// What the mini-player does when a track fails to load.
    pub on_load_failure: LoadFailurePolicy,
    /// Track id to start playing as soon as the player opens.
    pub start_track: Option<String>,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            looping: true,
            on_load_failure: LoadFailurePolicy::ShowError,
            start_track: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadFailurePolicy {
    /// Keep the mini-player open and show the failure.
    #[serde(alias = "show_error", alias = "error")]
    ShowError,
    /// Close the mini-player; the failure is only logged.
    #[serde(alias = "hide_mini_player", alias = "hide")]
    HideMiniPlayer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Redraw interval (milliseconds).
    pub tick_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ lull: breathe in, breathe out ~ ".to_string(),
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// TOML catalog replacing the bundled one.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/lull/lull.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}
