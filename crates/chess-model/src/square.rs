//! Board square representation.
//!
//! Files and ranks are both counted from 1 to 8, with file 1 = the a-file
//! and rank 1 = White's home rank.

use std::fmt;

/// A square on the board, identified by file and rank (both 1-8).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square, returning `None` if either coordinate is out of
    /// range.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file >= 1 && file <= 8 && rank >= 1 && rank <= 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Creates a square from known-good coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside 1-8.
    #[inline]
    pub const fn at(file: u8, rank: u8) -> Self {
        match Self::new(file, rank) {
            Some(sq) => sq,
            None => panic!("square coordinates out of range"),
        }
    }

    /// Creates a square from signed coordinates, as produced by offset
    /// arithmetic during move generation.
    #[inline]
    pub const fn from_signed(file: i16, rank: i16) -> Option<Self> {
        if file >= 1 && file <= 8 && rank >= 1 && rank <= 8 {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Returns the square offset by the given deltas, or `None` if it
    /// would leave the board.
    #[inline]
    pub const fn offset(self, df: i16, dr: i16) -> Option<Self> {
        Self::from_signed(self.file as i16 + df, self.rank as i16 + dr)
    }

    /// Returns the file (1-8).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the rank (1-8).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the file letter ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.file - 1) as char
    }

    /// Parses a square from wire notation (e.g. "e4").
    pub fn from_wire(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match bytes[0] {
            b'a'..=b'h' => bytes[0] - b'a' + 1,
            _ => return None,
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => bytes[1] - b'0',
            _ => return None,
        };
        Some(Square { file, rank })
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}{})", self.file_char(), self.rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank)
    }
}
