//! Exported content-store documents.
//!
//! JSON exports are either a bare array of track documents or a query
//! response of the form `{ "result": [...] }`. TOML exports hold a
//! `[[tracks]]` array.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::model::{PlaylistError, Track, TrackDocument};

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonManifest {
    Bare(Vec<TrackDocument>),
    Query { result: Vec<TrackDocument> },
}

#[derive(Deserialize)]
struct TomlManifest {
    #[serde(default)]
    tracks: Vec<TrackDocument>,
}

/// Read the playlist document at `path`.
pub fn load_manifest(path: &Path) -> Result<Vec<Track>, PlaylistError> {
    let text = fs::read_to_string(path).map_err(|source| PlaylistError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    let docs = match ext.as_deref() {
        Some("json") => parse_json(&text)?,
        Some("toml") => parse_toml(&text)?,
        _ => return Err(PlaylistError::UnsupportedFormat(path.to_path_buf())),
    };

    let tracks = into_tracks(docs)?;
    debug!(path = %path.display(), count = tracks.len(), "loaded playlist manifest");
    Ok(tracks)
}

pub(crate) fn parse_json(text: &str) -> Result<Vec<TrackDocument>, PlaylistError> {
    let manifest: JsonManifest = serde_json::from_str(text)?;
    Ok(match manifest {
        JsonManifest::Bare(docs) => docs,
        JsonManifest::Query { result } => result,
    })
}

pub(crate) fn parse_toml(text: &str) -> Result<Vec<TrackDocument>, PlaylistError> {
    let manifest: TomlManifest = toml::from_str(text)?;
    Ok(manifest.tracks)
}

/// Validate documents into tracks, keeping their order.
pub(crate) fn into_tracks(docs: Vec<TrackDocument>) -> Result<Vec<Track>, PlaylistError> {
    docs.into_iter()
        .enumerate()
        .map(|(index, doc)| {
            let title = required(doc.title, index, "title")?;
            let artist = doc.artist.unwrap_or_default();
            let url = required(doc.url, index, "url")?;
            let id = doc
                .id
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| index.to_string());
            Ok(Track {
                id,
                title,
                artist,
                url,
            })
        })
        .collect()
}

fn required(
    value: Option<String>,
    index: usize,
    field: &'static str,
) -> Result<String, PlaylistError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PlaylistError::InvalidTrack { index, field }),
    }
}
