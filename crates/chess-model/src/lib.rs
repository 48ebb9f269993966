//! Core types for the chess engine.
//!
//! This crate provides the fundamental value types shared across the
//! workspace:
//! - [`Player`] for the two sides
//! - [`PieceKind`], [`PieceId`], and [`Piece`] for piece entities
//! - [`Square`] for board coordinates (file and rank, both 1-8)
//! - [`Move`] for candidate and applied moves
//! - Engine wire notation parsing and formatting
//! - A board-plane picking adapter for pointer input

mod mov;
mod notation;
mod picking;
mod piece;
mod player;
mod square;

pub use mov::Move;
pub use notation::NotationError;
pub use picking::ray_to_square;
pub use piece::{Piece, PieceId, PieceKind};
pub use player::Player;
pub use square::Square;
