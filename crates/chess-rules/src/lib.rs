//! Chess rules engine: board state, legal move generation, and end-of-game
//! adjudication.
//!
//! The [`Board`] owns the full game state and exposes the complete rule
//! set: per-piece move generation with castling, en passant, and
//! promotion; speculative apply/undo legality checking; and automatic
//! adjudication of checkmate, stalemate, threefold repetition, and
//! insufficient material after every applied move.
//!
//! ```
//! use chess_model::Square;
//! use chess_rules::Board;
//!
//! let mut board = Board::new();
//! let mv = board.find_move(Square::at(5, 2), Square::at(5, 4)).unwrap();
//! board.make_move(mv);
//! assert!(board.is_turn(chess_model::Player::Black));
//! ```

mod board;
mod endstate;
mod movegen;

pub use board::Board;
pub use endstate::{DrawReason, Outcome};
