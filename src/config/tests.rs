use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_lull_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("LULL_CONFIG_PATH", "/tmp/lull-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/lull-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("lull")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("lull")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_falls_back_to_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/lull/lull.log")
    );
}

#[test]
fn defaults_loop_and_keep_the_mini_player_on_failure() {
    let s = Settings::default();
    assert!(s.playback.looping);
    assert_eq!(s.playback.on_load_failure, LoadFailurePolicy::ShowError);
    assert_eq!(s.audio.status_interval_ms, 500);
    assert_eq!(s.audio.fetch_timeout_ms, 30_000);
    assert_eq!(s.log.filter, "info");
    assert!(s.catalog.path.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.status_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume = 3.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.tick_ms = 1;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.fetch_timeout_ms = 0;
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file_and_parse_policy_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
looping = false
on_load_failure = "hide"
start_track = "gentle-rain"

[audio]
status_interval_ms = 250
volume = 0.5

[ui]
header_text = "hello"
tick_ms = 40

[catalog]
path = "/tmp/my-catalog.toml"

[log]
filter = "lull=debug"
file = "/tmp/lull.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LULL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("LULL__AUDIO__STATUS_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert!(!s.playback.looping);
    assert_eq!(s.playback.on_load_failure, LoadFailurePolicy::HideMiniPlayer);
    assert_eq!(s.playback.start_track.as_deref(), Some("gentle-rain"));
    assert_eq!(s.audio.status_interval_ms, 250);
    assert!((s.audio.volume - 0.5).abs() < f32::EPSILON);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.tick_ms, 40);
    assert_eq!(
        s.catalog.path.as_deref(),
        Some(std::path::Path::new("/tmp/my-catalog.toml"))
    );
    assert_eq!(s.log.filter, "lull=debug");
    assert_eq!(
        s.log.file.as_deref(),
        Some(std::path::Path::new("/tmp/lull.log"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
status_interval_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LULL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("LULL__AUDIO__STATUS_INTERVAL_MS", "750");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.status_interval_ms, 750);
}
