//! The seam between the player state machine and whatever produces sound.

/// Events reported back by a media engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// The media's metadata finished loading; `duration` is in seconds.
    MetadataLoaded { duration: f64 },
    /// The playback clock advanced to `position` seconds.
    TimeUpdate { position: f64 },
    /// The media played through to its end.
    Ended,
}

/// An event tagged with the load generation that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineEvent {
    pub generation: u64,
    pub event: MediaEvent,
}

/// Fire-and-forget transport requests.
///
/// Implementations acknowledge asynchronously by emitting `EngineEvent`s
/// carrying the `generation` passed to the most recent `load`.
pub trait MediaEngine {
    /// Replace the current media with `locator`. Playback stays paused.
    fn load(&mut self, locator: &str, generation: u64);
    fn play(&mut self);
    fn pause(&mut self);
    /// Jump to `position` seconds in the current media.
    fn seek(&mut self, position: f64);
    /// Set the output gain, `0.0..=1.0`.
    fn set_volume(&mut self, volume: f64);
}

impl<E: MediaEngine + ?Sized> MediaEngine for Box<E> {
    fn load(&mut self, locator: &str, generation: u64) {
        (**self).load(locator, generation)
    }

    fn play(&mut self) {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn seek(&mut self, position: f64) {
        (**self).seek(position)
    }

    fn set_volume(&mut self, volume: f64) {
        (**self).set_volume(volume)
    }
}
