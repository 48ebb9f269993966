//! External UCI engine opponent.
//!
//! Runs a UCI-compatible engine (Stockfish by default) as a subprocess
//! and turns it into a pollable opponent: the game loop records the
//! human's move, asks the opponent to think on a background thread, and
//! polls each frame until the engine's reply (or a failure) arrives.
//! Strength limiting, search depth, and the response deadline come from
//! a small TOML configuration file.

mod config;
mod engine;
#[cfg(test)]
mod testing;
mod worker;

pub use config::{ConfigError, OpponentConfig};
pub use engine::{OpponentError, UciEngine};
pub use worker::{EngineOpponent, ThinkPoll};
