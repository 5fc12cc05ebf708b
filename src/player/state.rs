use crate::config::PlayerSettings;

/// Mutable session state of the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Index of the active track; always `< track_count`.
    pub current_index: usize,
    /// Whether the engine is in the playing transport state.
    pub is_playing: bool,
    /// Seconds elapsed in the current track.
    pub position: f64,
    /// Total seconds of the current track, `0.0` until metadata loads.
    pub duration: f64,
    /// Active output gain.
    pub volume: f64,
    /// Gain restored when unmuting.
    pub saved_volume: f64,
    pub muted: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            position: 0.0,
            duration: 0.0,
            volume: 0.5,
            saved_volume: 1.0,
            muted: false,
        }
    }
}

impl PlayerState {
    /// Initial state with volumes taken from `settings`.
    pub fn from_settings(settings: &PlayerSettings) -> Self {
        Self {
            volume: clamp_volume(settings.initial_volume),
            saved_volume: clamp_volume(settings.restore_volume),
            ..Self::default()
        }
    }
}

pub(crate) fn clamp_volume(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
