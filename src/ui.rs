//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`: the
//! full player (categories and tracks) and the mini-player panel.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::audio::{PlaybackState, SessionSnapshot};

const CONTROLS: [(&str, &str); 7] = [
    ("j/k", "up/down"),
    ("h/l", "category"),
    ("enter", "play"),
    ("space/p", "play/pause"),
    ("s", "stop"),
    ("x", "close player"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "Idle",
        PlaybackState::Loading => "Loading",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    }
}

/// `elapsed / total`, leaving the total out while the duration is unknown.
pub(crate) fn progress_label(playback: &SessionSnapshot) -> String {
    let elapsed = format_mmss(Duration::from_millis(playback.progress.position_millis));
    if playback.progress.duration_millis > 1 {
        let total = format_mmss(Duration::from_millis(playback.progress.duration_millis));
        format!("{elapsed} / {total}")
    } else {
        elapsed
    }
}

/// Title line of the mini-player.
pub(crate) fn now_playing_text(playback: &SessionSnapshot) -> String {
    match (playback.displayed_track(), playback.is_loading) {
        (Some(t), true) => format!("Loading {}...", t.title),
        (None, true) => "Loading...".to_string(),
        (Some(t), false) if t.category.is_empty() => t.title.clone(),
        (Some(t), false) => format!("{} • {}", t.category, t.title),
        (None, false) => "Nothing playing".to_string(),
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, playback: &SessionSnapshot) {
    let mini_height = if playback.show_mini_player { 6 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(mini_height),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(app.header.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" lull ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let titles: Vec<Line> = app
        .catalog()
        .categories()
        .iter()
        .map(|c| Line::from(c.title.as_str()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.category_index())
        .block(Block::default().borders(Borders::ALL).title(" categories "))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    frame.render_widget(tabs, chunks[1]);

    draw_tracks(frame, app, playback, chunks[2]);

    if playback.show_mini_player {
        draw_mini_player(frame, playback, chunks[3]);
    }

    let footer = Paragraph::new(controls_text())
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

fn draw_tracks(frame: &mut Frame, app: &App, playback: &SessionSnapshot, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let current_id = playback.current_track.as_ref().map(|t| t.id.as_str());
    let items: Vec<ListItem> = app
        .current_category()
        .map(|c| c.tracks.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|t| {
            if Some(t.id.as_str()) == current_id {
                ListItem::new(format!("♪ {}", t.title)).bold()
            } else {
                ListItem::new(format!("  {}", t.title))
            }
        })
        .collect();
    let has_items = !items.is_empty();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if has_items {
        state.select(Some(app.selected_index()));
    }
    frame.render_stateful_widget(list, columns[0], &mut state);

    let about = app
        .selected_track()
        .map(|t| {
            let mut text = t.description.clone().unwrap_or_default();
            if let Some(art) = &t.artwork {
                text.push_str(&format!("\n\nArtwork: {art}"));
            }
            text
        })
        .unwrap_or_else(|| "No track selected".to_string());
    let about = Paragraph::new(about)
        .block(padded_block(" about "))
        .wrap(Wrap { trim: true });
    frame.render_widget(about, columns[1]);
}

fn draw_mini_player(frame: &mut Frame, playback: &SessionSnapshot, area: Rect) {
    let block = padded_block(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let title = format!(
        "{}  [{}]",
        now_playing_text(playback),
        state_label(playback.state())
    );
    frame.render_widget(Paragraph::new(title), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(playback.progress.ratio())
        .label(progress_label(playback));
    frame.render_widget(gauge, rows[1]);

    if let Some(err) = &playback.last_error {
        let line = Paragraph::new(format!("Could not play: {err}")).fg(Color::Red);
        frame.render_widget(line, rows[2]);
    }
}

#[cfg(test)]
mod tests;
