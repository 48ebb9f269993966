//! Piece entities.

use crate::{Player, Square};

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// The four kinds a pawn may promote to, in selection order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
    ];

    /// Returns the index of this kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the board letter for this kind with the given owner
    /// (uppercase for White).
    pub const fn letter(self, player: Player) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match player {
            Player::White => c.to_ascii_uppercase(),
            Player::Black => c,
        }
    }

    /// Returns the wire promotion letter (lowercase), or `None` for kinds
    /// that are not promotion choices.
    #[inline]
    pub const fn promotion_char(self) -> Option<char> {
        match self {
            PieceKind::Knight => Some('n'),
            PieceKind::Bishop => Some('b'),
            PieceKind::Rook => Some('r'),
            PieceKind::Queen => Some('q'),
            _ => None,
        }
    }

    /// Parses a wire promotion letter (case-insensitive).
    #[inline]
    pub const fn from_promotion_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// Identity of a piece entity.
///
/// Ids are unique per board for the lifetime of the game; a promoted pawn
/// is destroyed and the replacement piece receives a fresh id. The
/// en-passant rule compares the adjacent pawn against the last piece to
/// move by id, not by square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(pub u32);

/// A piece entity on the board.
///
/// `prev` remembers the square the piece stood on before its last move;
/// a freshly created piece has `prev == square`. This drives both the
/// has-moved checks (castling, pawn double push) and en-passant
/// eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub player: Player,
    pub kind: PieceKind,
    pub square: Square,
    pub prev: Square,
}

impl Piece {
    /// Returns true if this piece has ever moved.
    ///
    /// A piece that moved away and back still reports true, because `prev`
    /// records the square it most recently departed from.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.square != self.prev
    }
}
