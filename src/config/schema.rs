use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/soundroom/config.toml` or `~/.config/soundroom/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SOUNDROOM__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub playlist: PlaylistSettings,
    pub contact: ContactSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Output gain when the player mounts (`0.0..=1.0`).
    pub initial_volume: f64,
    /// Gain restored by the first unmute if nothing was muted before.
    pub restore_volume: f64,
    /// Volume change per `+` / `-` keypress.
    pub volume_step: f64,
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_volume: 0.5,
            restore_volume: 1.0,
            volume_step: 0.05,
            scrub_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the audio thread reports the playback clock (milliseconds).
    pub tick_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// Timeout for fetching remote media (seconds).
    pub fetch_timeout_secs: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            quit_fade_out_ms: 300,
            fetch_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered in the top border of the player box.
    pub header_text: String,
    /// Whether the playlist cursor jumps to the current track on next/previous.
    pub follow_current: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " soundroom ".to_string(),
            follow_current: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Playlist used when none is passed on the command line: a manifest
    /// file (`.json` / `.toml`) or a directory to scan.
    pub source: Option<PathBuf>,
    /// File extensions to treat as audio when scanning (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            source: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    /// Address the contact endpoint listens on.
    pub bind_addr: String,
    /// Route that accepts form submissions.
    pub route: String,
    /// reCAPTCHA server-side secret. Usually supplied via
    /// `SOUNDROOM__CONTACT__RECAPTCHA_SECRET`.
    pub recaptcha_secret: Option<String>,
    pub recaptcha_verify_url: String,
    pub store: StoreSettings,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            route: "/api/contact".to_string(),
            recaptcha_secret: None,
            recaptcha_verify_url: "https://www.google.com/recaptcha/api/siteverify".to_string(),
            store: StoreSettings::default(),
        }
    }
}

/// Content store the submissions are written to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Write token. Usually supplied via `SOUNDROOM__CONTACT__STORE__TOKEN`.
    pub token: Option<String>,
    /// `_type` of the created documents.
    pub document_type: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            token: None,
            document_type: "contactFromSubmission".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
    /// Log file for the terminal player. The player does not log when unset.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}
