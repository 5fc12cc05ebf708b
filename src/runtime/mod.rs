use std::error::Error;
use std::path::Path;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioEngine;
use crate::config::{self, Settings};
use crate::contact::{self, ContactState};
use crate::logging;
use crate::player::Player;
use crate::playlist;

mod event_loop;
mod startup;

pub use startup::{Command, parse_args};


type Tui = Terminal<CrosstermBackend<std::io::Stdout>>;

pub fn run() -> Result<(), Box<dyn Error>> {
    let (settings, fallback) = config::load_or_default();

    match parse_args(std::env::args().skip(1), &settings.playlist)? {
        Command::Serve { memory } => {
            logging::init_for_server(&settings.logging);
            if let Some(msg) = fallback {
                warn!("{msg}");
            }
            serve(&settings, memory)
        }
        Command::Play { source } => {
            let _guard = logging::init_for_tui(&settings.logging)?;
            if let Some(msg) = fallback {
                warn!("{msg}");
            }
            play(&settings, &source)
        }
    }
}

fn serve(settings: &Settings, memory: bool) -> Result<(), Box<dyn Error>> {
    let state = ContactState::from_settings(&settings.contact, memory)?;
    if memory {
        warn!("storing contact submissions in memory only");
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    rt.block_on(contact::serve(&settings.contact, state))?;
    Ok(())
}

fn play(settings: &Settings, source: &Path) -> Result<(), Box<dyn Error>> {
    let tracks = playlist::resolve(source, &settings.playlist)?;
    info!(count = tracks.len(), source = %source.display(), "playlist loaded");

    let mut terminal = enter_terminal()?;

    let run_result: Result<(), Box<dyn Error>> = (|| {
        if tracks.is_empty() {
            let source = source.display().to_string();
            return event_loop::run_empty(&mut terminal, &settings.ui.header_text, &source);
        }

        let (engine, events) = RodioEngine::spawn(&settings.audio)?;
        let player = Player::new(tracks, engine, &settings.player)?;
        let mut app = App::new(player, settings);

        let result = event_loop::run(&mut terminal, &mut app, &events);
        app.player
            .engine_mut()
            .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
        result
    })();

    leave_terminal(&mut terminal)?;
    run_result
}

fn enter_terminal() -> Result<Tui, Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn leave_terminal(terminal: &mut Tui) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
