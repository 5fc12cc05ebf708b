//! Playlist player: the view-independent playback state machine.
//!
//! `Player` owns the ordered track list, the mutable `PlayerState` and a
//! `MediaEngine`. Every user operation and every engine callback is a
//! discrete transition on that state.

mod engine;
mod format;
mod model;
mod state;

pub use engine::*;
pub use format::*;
pub use model::*;
pub use state::*;
