//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::player::{MediaEngine, PlayerState, format_time, progress_percent, remaining};

const CONTROLS: &[(&str, &str)] = &[
    ("space/p", "play/pause"),
    ("h/l", "prev/next song"),
    ("j/k", "up/down"),
    ("enter", "play selected song"),
    ("gg/G", "top/bottom"),
    ("+/-", "volume"),
    ("m", "mute"),
    ("q", "quit"),
];

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: f64) -> String {
    let mut parts: Vec<String> = CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect();
    parts.insert(2, format!("[H/L] scrub -/+{scrub_seconds}s"));
    parts.join(" | ")
}

/// `elapsed / total (-remaining)`, with `--:--` until the duration is known.
fn time_label(state: &PlayerState) -> String {
    let elapsed = format_time(state.position);
    if state.duration > 0.0 {
        format!(
            "{elapsed} / {} (-{})",
            format_time(state.duration),
            format_time(remaining(state.position, state.duration))
        )
    } else {
        format!("{elapsed} / --:--")
    }
}

fn transport_line(state: &PlayerState) -> Line<'static> {
    let transport = if state.is_playing { "▶ playing" } else { "⏸ paused" };
    let speaker = if state.muted { "🔇" } else { "🔊" };
    let percent = (state.volume * 100.0).round() as u32;

    // Ten-cell volume bar.
    let filled = ((state.volume * 10.0).round() as usize).min(10);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));

    let mut spans = vec![
        Span::styled(transport, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::raw(format!("{speaker} ")),
        Span::raw(bar),
        Span::raw(format!(" {percent}%")),
    ];
    if state.muted {
        spans.push(Span::raw(" (muted)").dim());
    }
    Line::from(spans)
}

/// Window of `total` rows of height `height` keeping `selected` centered.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw<E: MediaEngine>(frame: &mut Frame, app: &App<E>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let state = app.player.state();
    let track = app.player.current_track();

    // Now playing
    let mut now_playing = vec![Line::from(Span::styled(
        track.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if !track.artist.trim().is_empty() {
        now_playing.push(Line::from(track.artist.clone()).dim());
    }
    let header = Paragraph::new(now_playing)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.header_text.as_str())
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Progress
    let ratio = progress_percent(state.position, state.duration) / 100.0;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().add_modifier(Modifier::REVERSED))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(time_label(state));
    frame.render_widget(gauge, chunks[1]);

    // Transport and volume
    let transport = Paragraph::new(transport_line(state)).block(
        Block::bordered().padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        }),
    );
    frame.render_widget(transport, chunks[2]);

    draw_playlist(frame, app, chunks[3]);

    let footer = Paragraph::new(controls_text(app.scrub_seconds()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

fn draw_playlist<E: MediaEngine>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let tracks = app.player.tracks();
    let current = app.player.state().current_index;

    // Only build ListItems for the visible window.
    let list_height = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_window(tracks.len(), list_height, app.cursor);

    let items: Vec<ListItem> = tracks[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let i = start + offset;
            let marker = if i == current { "♪ " } else { "  " };
            let item = ListItem::new(format!("{marker}{}", track.display()));
            if i == current {
                item.bold()
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlist "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if end > start {
        list_state.select(Some(app.cursor - start));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Shown instead of the player when the playlist source yields no tracks.
pub fn draw_empty(frame: &mut Frame, header_text: &str, source: &str) {
    let body = vec![
        Line::from(Span::styled(
            "nothing to play",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("no tracks found in {source}")).dim(),
        Line::from(""),
        Line::from("[q] quit"),
    ];
    let message = Paragraph::new(body)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(header_text)
                .title_alignment(Alignment::Center),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(message, frame.area());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_window_centers_cursor() {
        assert_eq!(visible_window(5, 10, 3), (0, 5));
        assert_eq!(visible_window(100, 10, 50), (45, 55));
        assert_eq!(visible_window(100, 10, 2), (0, 10));
        assert_eq!(visible_window(100, 10, 98), (90, 100));
    }

    #[test]
    fn time_label_hides_unknown_duration() {
        let mut state = PlayerState {
            position: 65.4,
            ..PlayerState::default()
        };
        assert_eq!(time_label(&state), "1:05 / --:--");

        state.duration = 200.0;
        assert_eq!(time_label(&state), "1:05 / 3:20 (-2:14)");
    }

    #[test]
    fn controls_text_includes_scrub_seconds() {
        let text = controls_text(5.0);
        assert!(text.contains("[H/L] scrub -/+5s"));
        assert!(text.contains("[q] quit"));
    }
}
