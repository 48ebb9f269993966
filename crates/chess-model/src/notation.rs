//! Engine wire notation.
//!
//! Moves cross the engine boundary as
//! `<file-letter><rank><file-letter><rank>[promotion-letter]`, e.g.
//! "e2e4" or "c7c8n". The promotion letter is uppercase when the pawn
//! promotes on rank 8 and lowercase on rank 1; parsing accepts either
//! case.

use crate::{Move, PieceKind, Square};
use thiserror::Error;

/// Errors produced when parsing wire notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// The string is not 4 or 5 characters long.
    #[error("wire move must be 4 or 5 characters: {0:?}")]
    BadLength(String),
    /// A square coordinate is malformed or out of range.
    #[error("invalid square in wire move: {0:?}")]
    BadSquare(String),
    /// The promotion letter is not one of n, b, r, q.
    #[error("invalid promotion letter: {0:?}")]
    BadPromotion(char),
}

impl Move {
    /// Formats this move in wire notation.
    pub fn to_wire(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(c) = self.promotion.and_then(PieceKind::promotion_char) {
            if self.to.rank() == 8 {
                s.push(c.to_ascii_uppercase());
            } else {
                s.push(c);
            }
        }
        s
    }

    /// Parses a move from wire notation.
    ///
    /// The result carries no capture information; the board discovers
    /// captures when the move is applied.
    pub fn from_wire(s: &str) -> Result<Self, NotationError> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(NotationError::BadLength(s.to_string()));
        }
        let from = Square::from_wire(&s[0..2])
            .ok_or_else(|| NotationError::BadSquare(s[0..2].to_string()))?;
        let to = Square::from_wire(&s[2..4])
            .ok_or_else(|| NotationError::BadSquare(s[2..4].to_string()))?;
        let promotion = match s[4..].chars().next() {
            Some(c) => {
                Some(PieceKind::from_promotion_char(c).ok_or(NotationError::BadPromotion(c))?)
            }
            None => None,
        };
        let mut mv = Move::new(from, to);
        mv.promotion = promotion;
        Ok(mv)
    }
}
