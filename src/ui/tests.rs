use super::*;
use crate::audio::Progress;
use crate::catalog::{Catalog, Track};
use ratatui::{Terminal, backend::TestBackend};

fn app() -> App {
    App::new(Catalog::builtin(), "breathe")
}

fn snapshot_of(track: Track) -> SessionSnapshot {
    SessionSnapshot {
        current_track: Some(track),
        is_playing: true,
        show_mini_player: true,
        progress: Progress {
            position_millis: 65_000,
            duration_millis: 180_000,
        },
        ..SessionSnapshot::default()
    }
}

fn render(app: &App, playback: &SessionSnapshot) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| draw(f, app, playback)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[test]
fn progress_label_shows_elapsed_and_total() {
    let app = app();
    let track = app.selected_track().unwrap().clone();
    assert_eq!(progress_label(&snapshot_of(track)), "01:05 / 03:00");
}

#[test]
fn progress_label_hides_unknown_total() {
    let s = SessionSnapshot {
        progress: Progress {
            position_millis: 3_000,
            duration_millis: 1,
        },
        ..SessionSnapshot::default()
    };
    assert_eq!(progress_label(&s), "00:03");
}

#[test]
fn now_playing_text_follows_session_state() {
    let app = app();
    let track = app.selected_track().unwrap().clone();

    let mut loading = SessionSnapshot {
        is_loading: true,
        show_mini_player: true,
        ..SessionSnapshot::default()
    };
    assert_eq!(now_playing_text(&loading), "Loading...");

    loading.pending_track = Some(track.clone());
    assert_eq!(
        now_playing_text(&loading),
        format!("Loading {}...", track.title)
    );

    let playing = snapshot_of(track.clone());
    assert_eq!(
        now_playing_text(&playing),
        format!("{} • {}", track.category, track.title)
    );
    assert_eq!(
        now_playing_text(&SessionSnapshot::default()),
        "Nothing playing"
    );
}

#[test]
fn loading_title_is_rendered_from_the_snapshot() {
    let app = app();
    let track = app.catalog().categories()[1].tracks[0].clone();
    let loading = SessionSnapshot {
        pending_track: Some(track.clone()),
        is_loading: true,
        show_mini_player: true,
        ..SessionSnapshot::default()
    };
    let screen = render(&app, &loading);
    assert!(screen.contains(&format!("Loading {}...", track.title)));
}

#[test]
fn mini_player_renders_only_when_shown() {
    let app = app();
    let hidden = render(&app, &SessionSnapshot::default());
    assert!(hidden.contains("breathe"));
    assert!(!hidden.contains("now playing"));

    let track = app.selected_track().unwrap().clone();
    let shown = render(&app, &snapshot_of(track));
    assert!(shown.contains("now playing"));
    assert!(shown.contains("Playing"));
}

#[test]
fn failed_load_shows_error_line() {
    let app = app();
    let failed = SessionSnapshot {
        show_mini_player: true,
        last_error: Some("network down".to_string()),
        ..SessionSnapshot::default()
    };
    let screen = render(&app, &failed);
    assert!(screen.contains("Could not play: network down"));
}
