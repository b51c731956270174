use std::{env, path::PathBuf};

use super::schema::Settings;

/// `Settings::load` starts from struct defaults, layers the optional config
/// file on top and lets `LULL__*` environment variables override both.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("LULL")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.audio.status_interval_ms < 10 {
            return Err("audio.status_interval_ms must be >= 10".to_string());
        }
        if !(0.0..=2.0).contains(&self.audio.volume) {
            return Err("audio.volume must be between 0.0 and 2.0".to_string());
        }
        if self.audio.fetch_timeout_ms < 100 {
            return Err("audio.fetch_timeout_ms must be >= 100".to_string());
        }
        if self.ui.tick_ms < 10 {
            return Err("ui.tick_ms must be >= 10".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `LULL_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os("LULL_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/lull/config.toml`, or `~/.config/lull/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join("lull").join("config.toml"))
}

/// `$XDG_STATE_HOME/lull/lull.log`, or `~/.local/state/lull/lull.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join("lull").join("lull.log"))
}

fn xdg_dir(var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    match env::var_os(var) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => env::var_os("HOME").map(|home| {
            home_fallback
                .iter()
                .fold(PathBuf::from(home), |path, part| path.join(part))
        }),
    }
}
