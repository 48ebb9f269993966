//! Move representation.

use crate::{Piece, PieceKind, Square};
use std::fmt;

/// A candidate or applied move.
///
/// A move starts out as a bare source/destination pair. The board records
/// a discovered capture on it in place the first time the move's logical
/// effect is applied; the en-passant generator records the captured pawn
/// up front instead (the two capture sources are mutually exclusive).
/// `promotion` is filled in by the caller before the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// The captured piece, once known. For en passant this piece does not
    /// stand on `to`.
    pub capture: Option<Piece>,
    /// Promotion choice for a pawn reaching the far rank.
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a plain move with no capture or promotion recorded.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            capture: None,
            promotion: None,
        }
    }

    /// Creates a move with a known capture (normal pawn captures and en
    /// passant record the victim at generation time).
    #[inline]
    pub const fn capturing(from: Square, to: Square, capture: Piece) -> Self {
        Move {
            from,
            to,
            capture: Some(capture),
            promotion: None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
