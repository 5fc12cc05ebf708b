//! Playlist sources: the ordered track list handed to the player at mount.
//!
//! Tracks come either from an exported content-store document (`manifest`)
//! or from a local directory scan (`scan`).

mod manifest;
mod model;
mod scan;

use std::path::Path;

pub use manifest::load_manifest;
pub use model::*;
pub use scan::scan;

use crate::config::PlaylistSettings;

/// Load tracks from `path`: directories are scanned, files are read as manifests.
pub fn resolve(path: &Path, settings: &PlaylistSettings) -> Result<Vec<Track>, PlaylistError> {
    if path.is_dir() {
        Ok(scan(path, settings))
    } else {
        load_manifest(path)
    }
}
