//! Player representation.

/// The two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    /// Returns the opposing player.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the direction this player's pawns advance in
    /// (+1 for White, -1 for Black).
    #[inline]
    pub const fn pawn_direction(self) -> i16 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// Returns the rank on which this player's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Player::White => 8,
            Player::Black => 1,
        }
    }

}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}
