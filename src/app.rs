//! Application module: the view model driven by the terminal front end.
//!
//! `App` wraps the `Player` with the playlist cursor and the key-level
//! actions (volume steps, scrubbing, cursor movement).

mod model;

pub use model::*;
