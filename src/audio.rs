//! Audio engine backed by `rodio`.
//!
//! `RodioEngine` is the `MediaEngine` the terminal player drives. All decoding
//! and output happens on a dedicated audio thread; the engine handle only
//! sends commands, and the thread reports back through generation-tagged
//! `EngineEvent`s.

mod clock;
mod engine;
mod media;
mod thread;
mod types;

pub use engine::RodioEngine;
pub use types::*;

#[cfg(test)]
mod tests;
