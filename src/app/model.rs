//! Application model: `App` couples the player with the playlist cursor.

use crate::config::Settings;
use crate::player::{MediaEngine, MediaEvent, Player};

/// The main application model.
pub struct App<E: MediaEngine> {
    pub player: Player<E>,
    /// Playlist row under the cursor. Independent of the current track.
    pub cursor: usize,
    /// Whether the cursor jumps to the current track on `next`/`previous`.
    pub follow_current: bool,
    pub header_text: String,
    volume_step: f64,
    scrub_seconds: f64,
}

impl<E: MediaEngine> App<E> {
    /// Create a new `App` around `player`, with the cursor on the current track.
    pub fn new(player: Player<E>, settings: &Settings) -> Self {
        let cursor = player.state().current_index;
        Self {
            player,
            cursor,
            follow_current: settings.ui.follow_current,
            header_text: settings.ui.header_text.clone(),
            volume_step: settings.player.volume_step,
            scrub_seconds: settings.player.scrub_seconds as f64,
        }
    }

    /// Seconds moved per scrub keypress.
    pub fn scrub_seconds(&self) -> f64 {
        self.scrub_seconds
    }

    /// Forward an engine event to the player.
    pub fn handle_event(&mut self, generation: u64, event: MediaEvent) {
        self.player.handle_event(generation, event);
    }

    pub fn toggle_playback(&mut self) {
        self.player.toggle_playback();
    }

    pub fn next_track(&mut self) {
        self.player.next();
        self.follow();
    }

    pub fn previous_track(&mut self) {
        self.player.previous();
        self.follow();
    }

    /// Play the track under the cursor.
    pub fn select_under_cursor(&mut self) {
        self.player.select_track(self.cursor);
    }

    /// Move the cursor down, wrapping to the top.
    pub fn cursor_next(&mut self) {
        let len = self.player.track_count();
        self.cursor = (self.cursor + 1) % len;
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn cursor_prev(&mut self) {
        let len = self.player.track_count();
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.player.track_count() - 1;
    }

    pub fn scrub_forward(&mut self) {
        self.player.seek_by(self.scrub_seconds);
    }

    pub fn scrub_back(&mut self) {
        self.player.seek_by(-self.scrub_seconds);
    }

    pub fn volume_up(&mut self) {
        let v = self.player.state().volume + self.volume_step;
        self.player.set_volume(v);
    }

    pub fn volume_down(&mut self) {
        let v = self.player.state().volume - self.volume_step;
        self.player.set_volume(v);
    }

    pub fn toggle_mute(&mut self) {
        self.player.toggle_mute();
    }

    fn follow(&mut self) {
        if self.follow_current {
            self.cursor = self.player.state().current_index;
        }
    }
}
