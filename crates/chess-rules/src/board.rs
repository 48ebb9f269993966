//! Board state and move application.
//!
//! The board is an 8x8 grid of optional piece entities plus the bookkeeping
//! needed for legality and adjudication: turn owner, winner, the previous
//! move (en-passant memory), a multiset of seen position signatures
//! (repetition), and cached king squares (fast check queries).
//!
//! Legality is decided by one mechanism: apply a move's logical effect,
//! ask whether the mover's king is attacked, and reverse the effect
//! exactly. The logical move and unmove operate only on the grid and the
//! pieces' current squares; irreversible side effects (entity destruction,
//! promotion, end-state recomputation) happen in a separate finalize step
//! that speculation never reaches.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chess_model::{Move, Piece, PieceId, PieceKind, Player, Square};

use crate::endstate::Outcome;

const KNIGHT_HOPS: [(i16, i16); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
];

pub(crate) const DIAGONALS: [(i16, i16); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub(crate) const LINES: [(i16, i16); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

/// The central game state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Grid indexed `[rank - 1][file - 1]`.
    grid: [[Option<Piece>; 8]; 8],
    turn: Player,
    winner: Option<Outcome>,
    previous_move: Option<Move>,
    /// Occurrence counts of position signatures, recorded once per applied
    /// move. The starting position is not pre-counted.
    seen: HashMap<u64, u32>,
    /// King squares indexed by player, kept in sync by the logical move.
    kings: [Option<Square>; 2],
    next_id: u32,
}

impl Board {
    /// Creates a board with no pieces. Used for tests and custom setups;
    /// both kings must be placed before any move or check query.
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
            turn: Player::White,
            winner: None,
            previous_move: None,
            seen: HashMap::new(),
            kings: [None; 2],
            next_id: 0,
        }
    }

    /// Creates a board with the standard initial layout, White to move.
    pub fn new() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (i, &kind) in BACK_RANK.iter().enumerate() {
            let file = i as u8 + 1;
            board.place(kind, Player::White, Square::at(file, 1));
            board.place(kind, Player::Black, Square::at(file, 8));
        }
        for file in 1..=8 {
            board.place(PieceKind::Pawn, Player::White, Square::at(file, 2));
            board.place(PieceKind::Pawn, Player::Black, Square::at(file, 7));
        }
        board
    }

    /// Places a freshly created piece on an empty square.
    ///
    /// # Panics
    ///
    /// Panics if the square is occupied or a second king is placed for one
    /// side.
    pub fn place(&mut self, kind: PieceKind, player: Player, square: Square) {
        assert!(
            self.piece_at(square).is_none(),
            "square {square} already occupied"
        );
        if kind == PieceKind::King {
            assert!(
                self.kings[player.index()].is_none(),
                "second king placed for {player}"
            );
            self.kings[player.index()] = Some(square);
        }
        let piece = self.spawn(kind, player, square);
        *self.cell_mut(square) = Some(piece);
    }

    /// Creates a new piece entity with a fresh id and `prev == square`.
    fn spawn(&mut self, kind: PieceKind, player: Player, square: Square) -> Piece {
        self.next_id += 1;
        Piece {
            id: PieceId(self.next_id),
            player,
            kind,
            square,
            prev: square,
        }
    }

    #[inline]
    fn cell_mut(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.grid[square.rank() as usize - 1][square.file() as usize - 1]
    }

    /// Returns the piece on a square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.grid[square.rank() as usize - 1][square.file() as usize - 1].as_ref()
    }

    /// Signed-coordinate lookup used by ray walking; out-of-range
    /// coordinates hold no piece.
    #[inline]
    pub(crate) fn at(&self, file: i16, rank: i16) -> Option<&Piece> {
        Square::from_signed(file, rank).and_then(|sq| self.piece_at(sq))
    }

    /// Returns true if the signed coordinates name an empty square.
    /// Out-of-range coordinates count as empty; callers guard range before
    /// constructing a move.
    #[inline]
    pub(crate) fn is_empty_at(&self, file: i16, rank: i16) -> bool {
        self.at(file, rank).is_none()
    }

    /// Iterates over every piece on the board.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.grid.iter().flatten().filter_map(|cell| cell.as_ref())
    }

    /// Iterates over one player's pieces.
    pub fn player_pieces(&self, player: Player) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.player == player)
    }

    /// Returns the player whose turn it is.
    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns true if it is the given player's turn.
    #[inline]
    pub fn is_turn(&self, player: Player) -> bool {
        self.turn == player
    }

    /// Returns the game outcome once the game has ended.
    #[inline]
    pub fn winner(&self) -> Option<Outcome> {
        self.winner
    }

    pub(crate) fn set_winner(&mut self, outcome: Outcome) {
        self.winner = Some(outcome);
    }

    /// Returns the most recently applied move.
    #[inline]
    pub fn previous_move(&self) -> Option<Move> {
        self.previous_move
    }

    /// Returns the piece that made the previous move.
    pub fn last_piece_to_move(&self) -> Option<&Piece> {
        self.previous_move.and_then(|m| self.piece_at(m.to))
    }

    /// Returns the given player's king square.
    ///
    /// # Panics
    ///
    /// Panics if the king is missing; kings are never captured, so a
    /// missing king is a programming error.
    pub fn king_square(&self, player: Player) -> Square {
        self.kings[player.index()]
            .unwrap_or_else(|| panic!("no king on the board for {player}"))
    }

    /// Returns true if the player's king is attacked by the opponent.
    pub fn in_check(&self, player: Player) -> bool {
        self.is_controlled(self.king_square(player), player.opponent())
    }

    /// Returns true if the given square is attacked by any piece of
    /// `attacker`, independent of whose turn it is.
    ///
    /// Pure query over the current grid, callable while the board is in a
    /// transient speculative state.
    pub fn is_controlled(&self, square: Square, attacker: Player) -> bool {
        let (file, rank) = (square.file() as i16, square.rank() as i16);

        for (df, dr) in KNIGHT_HOPS {
            if let Some(piece) = self.at(file + df, rank + dr) {
                if piece.kind == PieceKind::Knight && piece.player == attacker {
                    return true;
                }
            }
        }

        let forward = attacker.pawn_direction();
        for (df, dr) in DIAGONALS {
            let Some((blocker, f, r)) = self.first_blocker(file, rank, df, dr) else {
                continue;
            };
            if blocker.player != attacker {
                continue;
            }
            let adjacent = (f - file).abs() == 1 && (r - rank).abs() == 1;
            match blocker.kind {
                PieceKind::Bishop | PieceKind::Queen => return true,
                PieceKind::King if adjacent => return true,
                // a pawn attacks diagonally toward its own forward
                // direction, so from the attacked square it sits one rank
                // against that direction
                PieceKind::Pawn if adjacent && r == rank - forward => return true,
                _ => {}
            }
        }

        for (df, dr) in LINES {
            let Some((blocker, f, r)) = self.first_blocker(file, rank, df, dr) else {
                continue;
            };
            if blocker.player != attacker {
                continue;
            }
            let adjacent = (f - file).abs() <= 1 && (r - rank).abs() <= 1;
            match blocker.kind {
                PieceKind::Rook | PieceKind::Queen => return true,
                PieceKind::King if adjacent => return true,
                _ => {}
            }
        }

        false
    }

    /// Walks outward from (file, rank) along (df, dr) and returns the
    /// first occupied square's piece and coordinates.
    fn first_blocker(
        &self,
        file: i16,
        rank: i16,
        df: i16,
        dr: i16,
    ) -> Option<(&Piece, i16, i16)> {
        let (mut f, mut r) = (file + df, rank + dr);
        while Square::from_signed(f, r).is_some() {
            if let Some(piece) = self.at(f, r) {
                return Some((piece, f, r));
            }
            f += df;
            r += dr;
        }
        None
    }

    /// Returns true if applying the move would leave a legal position.
    ///
    /// Rejects a move with no piece on its source or with a same-side
    /// piece on its destination, then speculatively applies the logical
    /// effect, queries check for the mover, and reverses the effect
    /// exactly. The capture discovered during speculation stays recorded
    /// on the move.
    pub fn is_valid(&mut self, mv: &mut Move) -> bool {
        let player = match self.piece_at(mv.from) {
            Some(piece) => piece.player,
            None => return false,
        };
        if let Some(target) = self.piece_at(mv.to) {
            if target.player == player {
                return false;
            }
        }

        self.logical_move(mv);
        let in_check = self.in_check(player);
        self.logical_unmove(mv);
        !in_check
    }

    /// Applies a move permanently: logical effect, finalization,
    /// end-state recomputation, turn flip.
    ///
    /// The caller is expected to submit a move drawn from the legal set
    /// (or validated through [`is_valid`](Self::is_valid)); applying a
    /// move with an absent source piece is a programming error.
    pub fn make_move(&mut self, mut mv: Move) {
        self.logical_move(&mut mv);
        self.finalize_move(&mv);
        self.recompute_end_state();
        self.turn = self.turn.opponent();
        self.previous_move = Some(mv);
    }

    /// Applies the reversible part of a move: capture removal, the paired
    /// rook move for castling, and the grid swap. Records a discovered
    /// capture on the move in place.
    fn logical_move(&mut self, mv: &mut Move) {
        if mv.capture.is_none() {
            // normal capture detection; en passant records its victim at
            // generation time and the two are never combined
            mv.capture = self.piece_at(mv.to).copied();
        }
        if let Some(captured) = mv.capture {
            *self.cell_mut(captured.square) = None;
        }

        if self.is_castle(mv) {
            let mut rook_mv = Self::castle_rook_move(mv);
            self.logical_move(&mut rook_mv);
        }

        let mut piece = self
            .cell_mut(mv.from)
            .take()
            .expect("no piece on move source");
        piece.square = mv.to;
        if piece.kind == PieceKind::King {
            self.kings[piece.player.index()] = Some(mv.to);
        }
        *self.cell_mut(mv.to) = Some(piece);
    }

    /// Exact structural inverse of [`logical_move`](Self::logical_move).
    /// Only ever runs inside speculation; never finalizes, never flips the
    /// turn.
    fn logical_unmove(&mut self, mv: &Move) {
        let mut inverse = Move::new(mv.to, mv.from);
        self.logical_move(&mut inverse);

        // the mover is back on its source square, so castle detection on
        // the original move works again
        if self.is_castle(mv) {
            let rook_mv = Self::castle_rook_move(mv);
            self.logical_unmove(&rook_mv);
        }

        if let Some(captured) = mv.capture {
            *self.cell_mut(captured.square) = Some(captured);
        }
    }

    /// Irreversible completion of an applied move: previous-square
    /// bookkeeping, the castled rook's finalization, and promotion. The
    /// captured entity, already off the grid, is dropped with the move.
    fn finalize_move(&mut self, mv: &Move) {
        if self.is_finalized_castle(mv) {
            let rook_mv = Self::castle_rook_move(mv);
            self.finalize_move(&rook_mv);
        }

        let piece = self
            .cell_mut(mv.to)
            .as_mut()
            .expect("finalized piece missing from destination");
        piece.prev = mv.from;

        if let Some(kind) = mv.promotion {
            self.promote(mv.to, kind);
        }
    }

    /// Destroys the pawn on `square` and creates a fresh entity of the
    /// promoted kind in its place.
    fn promote(&mut self, square: Square, kind: PieceKind) {
        let pawn = self
            .cell_mut(square)
            .take()
            .expect("promotion square is empty");
        debug_assert_eq!(pawn.kind, PieceKind::Pawn);
        debug_assert!(kind.promotion_char().is_some());
        let promoted = self.spawn(kind, pawn.player, square);
        *self.cell_mut(square) = Some(promoted);
    }

    /// A king stepping two files from its home file is a castle.
    fn is_castle(&self, mv: &Move) -> bool {
        matches!(self.piece_at(mv.from), Some(p) if p.kind == PieceKind::King)
            && mv.from.file() == 5
            && (mv.from.file() as i16 - mv.to.file() as i16).abs() == 2
    }

    /// Castle detection after the king has already been moved to its
    /// destination.
    fn is_finalized_castle(&self, mv: &Move) -> bool {
        matches!(self.piece_at(mv.to), Some(p) if p.kind == PieceKind::King)
            && mv.from.file() == 5
            && (mv.from.file() as i16 - mv.to.file() as i16).abs() == 2
    }

    /// The rook move paired with a castling king move.
    fn castle_rook_move(mv: &Move) -> Move {
        let (rook_from, rook_to) = if mv.to.file() == 3 { (1, 4) } else { (8, 6) };
        Move::new(
            Square::at(rook_from, mv.from.rank()),
            Square::at(rook_to, mv.to.rank()),
        )
    }

    /// Returns true if the move carries a pawn to its promotion rank.
    pub fn is_promotion(&self, mv: &Move) -> bool {
        match self.piece_at(mv.from) {
            Some(piece) => {
                piece.kind == PieceKind::Pawn
                    && mv.to.rank() == piece.player.promotion_rank()
            }
            None => false,
        }
    }

    /// Hashes the canonical position encoding: occupant kind and owner per
    /// square, nothing else.
    pub(crate) fn signature(&self) -> u64 {
        let mut encoded = [0u8; 64];
        for (i, cell) in self.grid.iter().flatten().enumerate() {
            encoded[i] = match cell {
                None => 0,
                Some(p) => 1 + (p.kind.index() as u8) * 2 + p.player.index() as u8,
            };
        }
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        encoded.hash(&mut hasher);
        hasher.finish()
    }

    pub(crate) fn record_position(&mut self) -> u32 {
        let sig = self.signature();
        let count = self.seen.entry(sig).or_insert(0);
        *count += 1;
        *count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Renders the grid from Black's back rank down, White pieces
    /// uppercase, empty squares as dots.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rank) in self.grid.iter().rev().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in rank {
                match cell {
                    Some(p) => write!(f, "{} ", p.kind.letter(p.player))?,
                    None => write!(f, ". ")?,
                }
            }
        }
        Ok(())
    }
}
