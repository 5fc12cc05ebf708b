use std::error::Error;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;
use crate::player::{EngineEvent, MediaEngine};
use crate::ui;

use super::Tui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: drains engine events, draws, handles input.
/// Returns `Ok(())` when shutdown is requested.
pub fn run<E: MediaEngine>(
    terminal: &mut Tui,
    app: &mut App<E>,
    events: &Receiver<EngineEvent>,
) -> Result<(), Box<dyn Error>> {
    let mut state = EventLoopState::default();

    loop {
        // Every transition happens on this thread, before the frame is drawn.
        while let Ok(ev) = events.try_recv() {
            app.handle_event(ev.generation, ev.event);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Loop shown when the playlist has no tracks; only `q` does anything.
pub fn run_empty(terminal: &mut Tui, header_text: &str, source: &str) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::draw_empty(f, header_text, source))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}

/// Apply one key press. Returns `true` when the user asked to quit.
pub(super) fn handle_key_event<E: MediaEngine>(
    key: KeyEvent,
    app: &mut App<E>,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_playback(),
        KeyCode::Char('l') | KeyCode::Right => app.next_track(),
        KeyCode::Char('h') | KeyCode::Left => app.previous_track(),
        KeyCode::Char('j') | KeyCode::Down => app.cursor_next(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_prev(),
        KeyCode::Enter => app.select_under_cursor(),
        KeyCode::Char('L') => app.scrub_forward(),
        KeyCode::Char('H') => app.scrub_back(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.volume_up(),
        KeyCode::Char('-') => app.volume_down(),
        KeyCode::Char('m') => app.toggle_mute(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.cursor_last(),
        _ => {}
    }

    false
}
