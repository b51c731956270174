use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{Action, App};
use crate::audio::{MediaEngine, PlaybackSession};
use crate::config;
use crate::ui;

/// Main terminal event loop: draws, handles input and hands playback
/// requests to the session. Returns `Ok(())` when quit is requested.
pub async fn run<E: MediaEngine + 'static>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &PlaybackSession<E>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.ui.tick_ms);
    let mut changes = session.subscribe();

    loop {
        let playback = changes.borrow_and_update().clone();
        terminal.draw(|f| ui::draw(f, app, &playback))?;

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key.code, &session.snapshot()) {
                Some(Action::Quit) => return Ok(()),
                Some(action) => dispatch(session, action),
                None => {}
            }
        }

        // Redraw on the next tick, or sooner when playback state changes.
        tokio::select! {
            _ = tokio::time::sleep(tick) => {}
            _ = changes.changed() => {}
        }
    }
}

/// Run an action on the session as a local task so input stays responsive
/// while the engine works.
pub fn dispatch<E: MediaEngine + 'static>(session: &PlaybackSession<E>, action: Action) {
    debug!("Dispatching {action:?}");
    let session = session.clone();
    tokio::task::spawn_local(async move {
        match action {
            Action::Play(track) => session.play_track(track).await,
            Action::TogglePause => session.toggle().await,
            Action::Stop => session.stop().await,
            Action::Dismiss => session.dismiss().await,
            Action::Quit => {}
        }
    });
}
