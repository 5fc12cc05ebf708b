//! Audio-related small types: thread commands and errors.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Replace the current media; the new sink starts paused.
    Load { locator: String, generation: u64 },
    /// Start or resume playback.
    Play,
    /// Pause, keeping the position.
    Pause,
    /// Jump to an absolute position in the current media.
    Seek(Duration),
    /// Set the output gain (`0.0..=1.0`).
    SetVolume(f32),
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode media: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}
