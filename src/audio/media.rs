//! Resolving media locators and building `rodio` sinks from them.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use lofty::prelude::*;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::AudioError;

/// Where a locator points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Locator {
    Local(PathBuf),
    Remote(String),
}

impl Locator {
    pub(crate) fn parse(locator: &str) -> Self {
        let trimmed = locator.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(trimmed.to_string())
        } else if let Some(path) = trimmed.strip_prefix("file://") {
            Self::Local(PathBuf::from(path))
        } else {
            Self::Local(PathBuf::from(trimmed))
        }
    }
}

/// Media ready to be decoded, possibly more than once (seeking rebuilds the sink).
#[derive(Clone)]
pub(crate) enum Media {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

impl Media {
    /// Open `locator`, downloading remote media into memory.
    pub(crate) fn open(
        locator: &str,
        client: &reqwest::blocking::Client,
    ) -> Result<Self, AudioError> {
        match Locator::parse(locator) {
            Locator::Local(path) => {
                File::open(&path).map_err(|source| AudioError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(Self::File(path))
            }
            Locator::Remote(url) => {
                let fetch_err = |source| AudioError::Fetch {
                    url: url.clone(),
                    source,
                };
                let bytes = client
                    .get(&url)
                    .send()
                    .and_then(|r| r.error_for_status())
                    .and_then(|r| r.bytes())
                    .map_err(fetch_err)?;
                Ok(Self::Memory(Arc::from(bytes.as_ref())))
            }
        }
    }

    /// Duration reported by the file's tags, for formats whose decoder can't tell.
    pub(crate) fn tagged_duration(&self) -> Option<Duration> {
        match self {
            Self::File(path) => tagged_duration(path),
            Self::Memory(_) => None,
        }
    }
}

fn tagged_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

/// Create a paused `Sink` for `media` that starts playback at `start_at`.
///
/// Also returns the decoder's total duration when it knows it.
pub(crate) fn create_sink_at(
    stream: &OutputStream,
    media: &Media,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    let total = match media {
        Media::File(path) => {
            let file = File::open(path).map_err(|source| AudioError::Io {
                path: path.clone(),
                source,
            })?;
            append_decoded(&sink, BufReader::new(file), start_at)?
        }
        Media::Memory(bytes) => append_decoded(&sink, Cursor::new(Arc::clone(bytes)), start_at)?,
    };
    Ok((sink, total))
}

fn append_decoded<R>(sink: &Sink, reader: R, start_at: Duration) -> Result<Option<Duration>, AudioError>
where
    R: Read + Seek + Send + Sync + 'static,
{
    let decoder = Decoder::new(reader)?;
    let total = decoder.total_duration();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    Ok(total)
}
