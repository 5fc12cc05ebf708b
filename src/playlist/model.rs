use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// One playable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Media locator: an `http(s)://` or `file://` URL, or a plain path.
    pub url: String,
}

impl Track {
    /// Row text for the playlist: `title — artist`, or the title alone.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} — {}", self.title, artist)
        }
    }
}

/// A track document as exported from the content store.
///
/// Field names of the store's schema are accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TrackDocument {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(alias = "songName")]
    pub title: Option<String>,
    #[serde(alias = "artistName")]
    pub artist: Option<String>,
    #[serde(alias = "audioUrl")]
    pub url: Option<String>,
}

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("failed to read playlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON playlist: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML playlist: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported playlist format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("track {index} is missing `{field}`")]
    InvalidTrack { index: usize, field: &'static str },
}
