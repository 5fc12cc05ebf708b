//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema shared by the player and the
//! contact endpoint, and helpers to load it from disk and the environment.

mod load;
mod schema;

pub use load::*;
pub use schema::*;

#[cfg(test)]
mod tests;
