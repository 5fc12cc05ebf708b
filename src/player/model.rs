//! The `Player` state machine.
//!
//! Implicit navigation (`next`/`previous`) keeps the transport state it had
//! before the change; explicit selection (`select_track`) always starts
//! playback.

use thiserror::Error;
use tracing::debug;

use crate::config::PlayerSettings;
use crate::playlist::Track;

use super::engine::{MediaEngine, MediaEvent};
use super::state::{PlayerState, clamp_volume};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("playlist is empty")]
    EmptyPlaylist,
}

pub struct Player<E: MediaEngine> {
    tracks: Vec<Track>,
    state: PlayerState,
    engine: E,
    generation: u64,
    /// Set by `Ended`, cleared by every load.
    ended: bool,
}

impl<E: MediaEngine> Player<E> {
    /// Mount the player on `tracks`, loading the first one into `engine`.
    ///
    /// Playback does not start until `play` is called.
    pub fn new(tracks: Vec<Track>, engine: E, settings: &PlayerSettings) -> Result<Self, PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }

        let mut player = Self {
            tracks,
            state: PlayerState::from_settings(settings),
            engine,
            generation: 0,
            ended: false,
        };
        player.engine.set_volume(player.state.volume);
        player.reload();
        Ok(player)
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn current_track(&self) -> &Track {
        &self.tracks[self.state.current_index]
    }

    /// Generation of the most recent media load.
    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Start or resume playback.
    ///
    /// A finished track is restarted through a fresh load, so an `Ended`
    /// still queued from the old generation cannot stop the restart.
    pub fn play(&mut self) {
        self.state.is_playing = true;
        if self.ended || self.at_end() {
            debug!(index = self.state.current_index, "restarting finished track");
            self.reload();
        } else {
            self.engine.play();
        }
    }

    /// Halt playback, keeping the position.
    pub fn pause(&mut self) {
        self.engine.pause();
        self.state.is_playing = false;
    }

    pub fn toggle_playback(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance to the next track, wrapping to the first.
    pub fn next(&mut self) {
        let next = (self.state.current_index + 1) % self.tracks.len();
        self.change_track(next);
    }

    /// Step back to the previous track, wrapping to the last.
    pub fn previous(&mut self) {
        let prev = if self.state.current_index == 0 {
            self.tracks.len() - 1
        } else {
            self.state.current_index - 1
        };
        self.change_track(prev);
    }

    /// Jump straight to track `index` and start playing it.
    ///
    /// Selecting the active track, or an index past the end, does nothing.
    pub fn select_track(&mut self, index: usize) {
        if index == self.state.current_index || index >= self.tracks.len() {
            return;
        }
        self.state.is_playing = true;
        self.change_track(index);
    }

    /// Move the playhead to `position` seconds.
    pub fn seek(&mut self, position: f64) {
        let position = self.clamp_position(position);
        self.state.position = position;
        self.engine.seek(position);
    }

    /// Scrub relative to the current position.
    pub fn seek_by(&mut self, delta: f64) {
        self.seek(self.state.position + delta);
    }

    /// Set the output gain. Never touches the mute flag.
    pub fn set_volume(&mut self, volume: f64) {
        self.state.volume = clamp_volume(volume);
        self.engine.set_volume(self.state.volume);
    }

    pub fn toggle_mute(&mut self) {
        if self.state.muted {
            self.state.volume = self.state.saved_volume;
            self.state.muted = false;
        } else {
            self.state.saved_volume = self.state.volume;
            self.state.volume = 0.0;
            self.state.muted = true;
        }
        self.engine.set_volume(self.state.volume);
    }

    /// Apply an engine callback.
    ///
    /// Events from a superseded load are dropped.
    pub fn handle_event(&mut self, generation: u64, event: MediaEvent) {
        if generation != self.generation {
            debug!(generation, current = self.generation, ?event, "dropping stale media event");
            return;
        }

        match event {
            MediaEvent::MetadataLoaded { duration } => {
                self.state.duration = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    0.0
                };
                self.engine.set_volume(self.state.volume);
            }
            MediaEvent::TimeUpdate { position } => {
                self.state.position = self.clamp_position(position);
            }
            MediaEvent::Ended => {
                // No auto-advance: the player stops on the finished track.
                self.state.is_playing = false;
                self.ended = true;
            }
        }
    }

    fn change_track(&mut self, index: usize) {
        self.state.current_index = index;
        debug!(index, title = %self.tracks[index].title, "track changed");
        self.reload();
    }

    fn reload(&mut self) {
        self.generation += 1;
        self.ended = false;
        self.state.position = 0.0;
        self.state.duration = 0.0;

        let locator = self.tracks[self.state.current_index].url.clone();
        self.engine.load(&locator, self.generation);
        if self.state.is_playing {
            self.engine.play();
        }
    }

    fn at_end(&self) -> bool {
        self.state.duration > 0.0 && self.state.position >= self.state.duration
    }

    fn clamp_position(&self, position: f64) -> f64 {
        if !position.is_finite() || position < 0.0 {
            return 0.0;
        }
        if self.state.duration > 0.0 {
            position.min(self.state.duration)
        } else {
            position
        }
    }
}
