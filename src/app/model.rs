//! Application model types: `App` and `Action`.
//!
//! The `App` struct holds the catalog and the cursor (selected category and
//! track). Key presses are turned into `Action`s that the runtime hands to
//! the playback session.

use crossterm::event::KeyCode;

use crate::audio::SessionSnapshot;
use crate::catalog::{Catalog, Category, Track};

/// Something the runtime should do in response to input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Play(Track),
    TogglePause,
    Stop,
    Dismiss,
    Quit,
}

/// The main application model.
pub struct App {
    catalog: Catalog,
    category: usize,
    selected: usize,
    pub header: String,
}

impl App {
    /// Create a new `App` browsing `catalog`, starting at its first category.
    pub fn new(catalog: Catalog, header: impl Into<String>) -> Self {
        Self {
            catalog,
            category: 0,
            selected: 0,
            header: header.into(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn category_index(&self) -> usize {
        self.category
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn current_category(&self) -> Option<&Category> {
        self.catalog.category(self.category)
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.current_category()
            .and_then(|c| c.tracks.get(self.selected))
    }

    /// Play request for the catalog track `id`, if there is one.
    pub fn play_by_id(&self, id: &str) -> Option<Action> {
        self.catalog.find(id).cloned().map(Action::Play)
    }

    fn track_len(&self) -> usize {
        self.current_category().map_or(0, |c| c.tracks.len())
    }

    /// Move selection to the next track in the category. Wraps around.
    pub fn next(&mut self) {
        let len = self.track_len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection to the previous track in the category. Wraps around.
    pub fn prev(&mut self) {
        let len = self.track_len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Switch to the next category and select its first track.
    pub fn next_category(&mut self) {
        let len = self.catalog.categories().len();
        if len > 0 {
            self.category = (self.category + 1) % len;
            self.selected = 0;
        }
    }

    /// Switch to the previous category and select its first track.
    pub fn prev_category(&mut self) {
        let len = self.catalog.categories().len();
        if len > 0 {
            self.category = (self.category + len - 1) % len;
            self.selected = 0;
        }
    }

    /// Apply a key press. Navigation is handled here; playback requests
    /// come back as an `Action`.
    pub fn handle_key(&mut self, code: KeyCode, playback: &SessionSnapshot) -> Option<Action> {
        match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => {
                self.next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.prev();
                None
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                self.next_category();
                None
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
                self.prev_category();
                None
            }
            KeyCode::Enter => {
                let track = self.selected_track()?;
                let already_playing = playback.is_playing
                    && playback.current_track.as_ref().is_some_and(|t| t.id == track.id);
                (!already_playing).then(|| Action::Play(track.clone()))
            }
            // Mini-player controls are disabled while a load is in flight.
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                (playback.current_track.is_some() && !playback.is_loading)
                    .then_some(Action::TogglePause)
            }
            KeyCode::Char('s') => {
                (playback.current_track.is_some() && !playback.is_loading).then_some(Action::Stop)
            }
            KeyCode::Char('x') => playback.show_mini_player.then_some(Action::Dismiss),
            _ => None,
        }
    }
}
