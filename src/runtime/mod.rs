use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::task::LocalSet;
use tracing::{info, warn};

use crate::app::App;
use crate::audio::{PlaybackSession, RodioEngine};
use crate::catalog::Catalog;
use crate::config;

mod event_loop;
mod logging;
mod settings;

#[cfg(test)]
mod tests;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, problem) = settings::load_settings();
    // Still on the plain terminal, so stderr is visible.
    if let Err(e) = logging::init(&settings.log) {
        eprintln!("lull: logging disabled: {e}");
    }
    if let Some(problem) = problem {
        warn!("{problem}");
    }

    let catalog = load_catalog(env::args().nth(1).map(PathBuf::from), &settings)?;
    info!(
        "Catalog ready: {} categories, {} tracks",
        catalog.categories().len(),
        catalog.track_count()
    );

    // Session state is single-threaded; every playback operation runs as a
    // local task on this thread.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = LocalSet::new();
    let result = local.block_on(&rt, run_player(settings, catalog));

    // A fetch still blocked on the network must not hold up exit.
    drop(local);
    rt.shutdown_background();
    result
}

/// Catalog source: CLI argument, then `catalog.path`, then the bundled one.
fn load_catalog(
    arg: Option<PathBuf>,
    settings: &config::Settings,
) -> Result<Catalog, Box<dyn std::error::Error>> {
    match arg.or_else(|| settings.catalog.path.clone()) {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            Ok(Catalog::load(&path)?)
        }
        None => Ok(Catalog::builtin()),
    }
}

async fn run_player(
    settings: config::Settings,
    catalog: Catalog,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = RodioEngine::new(settings.audio.clone());
    let session = PlaybackSession::new(engine, settings.playback.clone());
    let mut app = App::new(catalog, settings.ui.header_text.clone());

    if let Some(id) = settings.playback.start_track.as_deref() {
        match app.play_by_id(id) {
            Some(action) => event_loop::dispatch(&session, action),
            None => warn!("Start track {id:?} is not in the catalog"),
        }
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &session).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Shutting down");
    session.shutdown().await;
    session.engine().shutdown();

    run_result
}
