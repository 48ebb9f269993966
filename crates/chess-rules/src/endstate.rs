//! End-of-game adjudication.
//!
//! After every applied move the board recomputes its end state in a fixed
//! priority order: draw by repetition, then checkmate/stalemate for the
//! player about to move, then draw by insufficient material. The first
//! rule that fires sets the winner terminally; later rules are skipped.

use chess_model::{PieceKind, Player};

use crate::Board;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The given player delivered checkmate.
    Win(Player),
    /// Drawn game with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// The same position occurred for the third time.
    Repetition,
    /// The player to move has no legal move and is not in check.
    Stalemate,
    /// Neither side retains enough material to deliver mate.
    InsufficientMaterial,
}

impl Board {
    /// Recomputes the end state after an applied move. Does nothing once
    /// the winner is set.
    pub(crate) fn recompute_end_state(&mut self) {
        if self.winner().is_some() {
            return;
        }
        self.adjudicate_repetition();
        if self.winner().is_some() {
            return;
        }
        self.adjudicate_mate_or_stalemate();
        if self.winner().is_some() {
            return;
        }
        self.adjudicate_insufficient_material();
    }

    /// Records the current position signature and draws the game on its
    /// third occurrence.
    fn adjudicate_repetition(&mut self) {
        if self.record_position() >= 3 {
            self.set_winner(Outcome::Draw(DrawReason::Repetition));
        }
    }

    /// If the player about to move has no legal move, the game ends: a
    /// loss for them when in check, otherwise stalemate.
    fn adjudicate_mate_or_stalemate(&mut self) {
        let victim = self.turn().opponent();
        let stalemate = !self.in_check(victim);

        let squares: Vec<_> = self.player_pieces(victim).map(|p| p.square).collect();
        for square in squares {
            if self.has_legal_move(square) {
                return;
            }
        }

        let outcome = if stalemate {
            Outcome::Draw(DrawReason::Stalemate)
        } else {
            Outcome::Win(self.turn())
        };
        self.set_winner(outcome);
    }

    /// Draws the game when no pawn, rook, or queen remains and at most two
    /// minor pieces are left. With exactly two minors the game only draws
    /// when they belong to opposite sides; this deliberately approximates
    /// the FIDE rule and is the behavior the rest of the system expects.
    fn adjudicate_insufficient_material(&mut self) {
        let mut minor_owners: Vec<Player> = Vec::new();
        for piece in self.pieces() {
            match piece.kind {
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return,
                PieceKind::Bishop | PieceKind::Knight => minor_owners.push(piece.player),
                PieceKind::King => {}
            }
        }

        let drawn = match minor_owners.as_slice() {
            [] | [_] => true,
            [a, b] => a != b,
            _ => false,
        };
        if drawn {
            self.set_winner(Outcome::Draw(DrawReason::InsufficientMaterial));
        }
    }
}
