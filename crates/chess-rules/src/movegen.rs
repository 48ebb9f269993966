//! Legal move generation, polymorphic over piece kind.
//!
//! Each kind contributes a deterministic candidate list (direction-list
//! order, then distance); every candidate is then filtered through the
//! board's speculative apply-query-undo legality check. Candidates never
//! name an out-of-range square. A fresh call recomputes the sequence from
//! scratch, so generation is restartable and holds no state across turns.

use chess_model::{Move, Piece, PieceKind, Square};

use crate::board::{Board, DIAGONALS, LINES};

const ALL_DIRECTIONS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (0, -1),
    (0, 1),
    (1, 0),
    (-1, 0),
];

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

impl Board {
    /// Returns every legal move for the piece on `from`. Empty when the
    /// square is empty or the piece has no legal move.
    pub fn possible_moves(&mut self, from: Square) -> Vec<Move> {
        let mut candidates = self.candidate_moves(from);
        candidates.retain_mut(|mv| self.is_valid(mv));
        candidates
    }

    /// Early-exit form of [`possible_moves`](Self::possible_moves), used
    /// by mate and stalemate detection.
    pub fn has_legal_move(&mut self, from: Square) -> bool {
        let mut candidates = self.candidate_moves(from);
        candidates.iter_mut().any(|mv| self.is_valid(mv))
    }

    /// Resolves a raw source/destination pair against the legal set.
    /// Returns `None` when no legal move matches; the caller re-prompts.
    pub fn find_move(&mut self, from: Square, to: Square) -> Option<Move> {
        self.possible_moves(from).into_iter().find(|mv| mv.to == to)
    }

    /// Movement-pattern candidates for the piece on `from`, before the
    /// legality filter.
    fn candidate_moves(&self, from: Square) -> Vec<Move> {
        let Some(&piece) = self.piece_at(from) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        match piece.kind {
            PieceKind::Pawn => self.pawn_candidates(&piece, &mut out),
            PieceKind::Knight => self.knight_candidates(&piece, &mut out),
            PieceKind::Bishop => self.ray_candidates(&piece, &DIAGONALS, &mut out),
            PieceKind::Rook => self.ray_candidates(&piece, &LINES, &mut out),
            PieceKind::Queen => self.ray_candidates(&piece, &ALL_DIRECTIONS, &mut out),
            PieceKind::King => self.king_candidates(&piece, &mut out),
        }
        out
    }

    fn pawn_candidates(&self, piece: &Piece, out: &mut Vec<Move>) {
        let from = piece.square;
        let (file, rank) = (from.file() as i16, from.rank() as i16);
        let forward = piece.player.pawn_direction();

        if self.is_empty_at(file, rank + forward) {
            if let Some(to) = Square::from_signed(file, rank + forward) {
                out.push(Move::new(from, to));
            }
            if !piece.has_moved() && self.is_empty_at(file, rank + 2 * forward) {
                if let Some(to) = Square::from_signed(file, rank + 2 * forward) {
                    out.push(Move::new(from, to));
                }
            }
        }

        for df in [-1, 1] {
            if let Some(&target) = self.at(file + df, rank + forward) {
                if target.player != piece.player {
                    out.push(Move::capturing(from, target.square, target));
                }
            }

            // en passant: the laterally adjacent enemy pawn must be the
            // very last piece to have moved, and that move must have been
            // a two-rank advance
            if let Some(&adjacent) = self.at(file + df, rank) {
                let just_double_stepped = adjacent.kind == PieceKind::Pawn
                    && adjacent.player != piece.player
                    && self
                        .last_piece_to_move()
                        .is_some_and(|last| last.id == adjacent.id)
                    && (adjacent.square.rank() as i16 - adjacent.prev.rank() as i16).abs() == 2;
                if just_double_stepped {
                    if let Some(to) = Square::from_signed(file + df, rank + forward) {
                        out.push(Move::capturing(from, to, adjacent));
                    }
                }
            }
        }
    }

    fn knight_candidates(&self, piece: &Piece, out: &mut Vec<Move>) {
        for (df, dr) in KNIGHT_HOPS {
            if let Some(to) = piece.square.offset(df, dr) {
                out.push(Move::new(piece.square, to));
            }
        }
    }

    /// Walks each direction until the ray leaves the board or reaches an
    /// occupied square; the occupied square itself is still offered (the
    /// legality filter rejects same-side captures).
    fn ray_candidates(&self, piece: &Piece, directions: &[(i16, i16)], out: &mut Vec<Move>) {
        for &(df, dr) in directions {
            let mut to = piece.square.offset(df, dr);
            while let Some(square) = to {
                let occupied = self.piece_at(square).is_some();
                out.push(Move::new(piece.square, square));
                if occupied {
                    break;
                }
                to = square.offset(df, dr);
            }
        }
    }

    fn king_candidates(&self, piece: &Piece, out: &mut Vec<Move>) {
        for (df, dr) in ALL_DIRECTIONS {
            if let Some(to) = piece.square.offset(df, dr) {
                out.push(Move::new(piece.square, to));
            }
        }

        if piece.has_moved() {
            return;
        }
        self.castle_candidates(piece, out);
    }

    /// Offers the two-square king moves toward each corner rook. Landing
    /// in check is not examined here; the generic legality filter catches
    /// it on the king move.
    fn castle_candidates(&self, king: &Piece, out: &mut Vec<Move>) {
        let rank = king.square.rank() as i16;
        let king_file = king.square.file() as i16;

        for corner in [1i16, 8] {
            let Some(rook) = self.at(corner, rank) else {
                continue;
            };
            if rook.kind != PieceKind::Rook
                || rook.player != king.player
                || rook.has_moved()
            {
                continue;
            }

            let (lo, hi) = (corner.min(king_file), corner.max(king_file));
            if !((lo + 1)..hi).all(|f| self.is_empty_at(f, rank)) {
                continue;
            }

            let step: i16 = if corner == 1 { -1 } else { 1 };
            let Some(pass) = Square::from_signed(king_file + step, rank) else {
                continue;
            };
            if self.in_check(king.player) {
                continue;
            }
            if self.is_controlled(pass, king.player.opponent()) {
                continue;
            }

            if let Some(to) = Square::from_signed(king_file + 2 * step, rank) {
                out.push(Move::new(king.square, to));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_model::Player;

    fn targets(board: &mut Board, from: Square) -> Vec<Square> {
        board
            .possible_moves(from)
            .into_iter()
            .map(|m| m.to)
            .collect()
    }

    fn all_legal_moves(board: &mut Board, player: Player) -> Vec<Move> {
        let squares: Vec<_> = board.player_pieces(player).map(|p| p.square).collect();
        squares
            .into_iter()
            .flat_map(|sq| board.possible_moves(sq))
            .collect()
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let mut board = Board::new();
        assert_eq!(all_legal_moves(&mut board, Player::White).len(), 20);
        assert_eq!(all_legal_moves(&mut board, Player::Black).len(), 20);
    }

    #[test]
    fn generation_is_deterministic_and_restartable() {
        let mut board = Board::new();
        let first = board.possible_moves(Square::at(2, 1));
        let second = board.possible_moves(Square::at(2, 1));
        assert_eq!(first, second);
    }

    #[test]
    fn pawn_single_and_double_push() {
        let mut board = Board::new();
        let moves = targets(&mut board, Square::at(5, 2));
        assert_eq!(moves, vec![Square::at(5, 3), Square::at(5, 4)]);

        // after moving, the double push is gone
        board.make_move(Move::new(Square::at(5, 2), Square::at(5, 3)));
        let moves = targets(&mut board, Square::at(5, 3));
        assert_eq!(moves, vec![Square::at(5, 4)]);
    }

    #[test]
    fn pawn_blocked_by_any_piece_cannot_push() {
        let mut board = Board::new();
        board.make_move(Move::new(Square::at(5, 2), Square::at(5, 4)));
        board.make_move(Move::new(Square::at(5, 7), Square::at(5, 5)));
        assert!(targets(&mut board, Square::at(5, 4)).is_empty());
    }

    #[test]
    fn pawn_diagonal_capture_only_onto_enemies() {
        let mut board = Board::new();
        board.make_move(Move::new(Square::at(5, 2), Square::at(5, 4)));
        board.make_move(Move::new(Square::at(4, 7), Square::at(4, 5)));

        let moves = board.possible_moves(Square::at(5, 4));
        let capture = moves
            .iter()
            .find(|m| m.to == Square::at(4, 5))
            .expect("exd5 offered");
        assert_eq!(capture.capture.unwrap().square, Square::at(4, 5));
    }

    #[test]
    fn en_passant_window_is_one_ply() {
        let mut board = Board::new();
        board.make_move(Move::new(Square::at(5, 2), Square::at(5, 4)));
        board.make_move(Move::new(Square::at(1, 7), Square::at(1, 6)));
        board.make_move(Move::new(Square::at(5, 4), Square::at(5, 5)));
        // black answers with a two-square push right next to the e5 pawn
        board.make_move(Move::new(Square::at(4, 7), Square::at(4, 5)));

        let moves = board.possible_moves(Square::at(5, 5));
        let ep = moves
            .iter()
            .find(|m| m.to == Square::at(4, 6))
            .expect("en passant offered");
        let victim = ep.capture.expect("en passant records its victim");
        assert_eq!(victim.square, Square::at(4, 5));
        assert_eq!(victim.kind, PieceKind::Pawn);

        // let the chance pass; the capture is withdrawn
        board.make_move(Move::new(Square::at(2, 1), Square::at(3, 3)));
        board.make_move(Move::new(Square::at(1, 6), Square::at(1, 5)));
        let moves = board.possible_moves(Square::at(5, 5));
        assert!(moves.iter().all(|m| m.to != Square::at(4, 6)));
    }

    #[test]
    fn en_passant_capture_removes_the_pawn() {
        let mut board = Board::new();
        board.make_move(Move::new(Square::at(5, 2), Square::at(5, 4)));
        board.make_move(Move::new(Square::at(1, 7), Square::at(1, 6)));
        board.make_move(Move::new(Square::at(5, 4), Square::at(5, 5)));
        board.make_move(Move::new(Square::at(4, 7), Square::at(4, 5)));

        let ep = board
            .find_move(Square::at(5, 5), Square::at(4, 6))
            .expect("en passant is legal");
        board.make_move(ep);

        assert!(board.piece_at(Square::at(4, 5)).is_none());
        let taker = board.piece_at(Square::at(4, 6)).unwrap();
        assert_eq!(taker.player, Player::White);
        assert_eq!(board.pieces().count(), 31);
    }

    #[test]
    fn knight_hops_respect_the_rim() {
        let mut board = Board::new();
        let moves = targets(&mut board, Square::at(2, 1));
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Square::at(1, 3)));
        assert!(moves.contains(&Square::at(3, 3)));
    }

    #[test]
    fn rays_stop_at_the_first_occupied_square() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(5, 1));
        board.place(PieceKind::King, Player::Black, Square::at(5, 8));
        board.place(PieceKind::Rook, Player::White, Square::at(1, 4));
        board.place(PieceKind::Pawn, Player::Black, Square::at(4, 4));

        let moves = targets(&mut board, Square::at(1, 4));
        // right along the rank: b4, c4, then the capture on d4, then stop
        assert!(moves.contains(&Square::at(2, 4)));
        assert!(moves.contains(&Square::at(3, 4)));
        assert!(moves.contains(&Square::at(4, 4)));
        assert!(!moves.contains(&Square::at(5, 4)));
    }

    #[test]
    fn queen_combines_both_direction_sets() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(1, 1));
        board.place(PieceKind::King, Player::Black, Square::at(8, 8));
        board.place(PieceKind::Queen, Player::White, Square::at(4, 4));

        let moves = targets(&mut board, Square::at(4, 4));
        // 27 squares from d4 on an otherwise open board, minus none
        // (the kings sit off the queen's lines)
        assert_eq!(moves.len(), 27);
    }

    #[test]
    fn castling_both_wings() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(5, 1));
        board.place(PieceKind::Rook, Player::White, Square::at(1, 1));
        board.place(PieceKind::Rook, Player::White, Square::at(8, 1));
        board.place(PieceKind::King, Player::Black, Square::at(5, 8));

        let moves = targets(&mut board, Square::at(5, 1));
        assert!(moves.contains(&Square::at(3, 1)), "queenside castle");
        assert!(moves.contains(&Square::at(7, 1)), "kingside castle");
    }

    #[test]
    fn castling_moves_the_rook_too() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(5, 1));
        board.place(PieceKind::Rook, Player::White, Square::at(8, 1));
        board.place(PieceKind::King, Player::Black, Square::at(5, 8));

        let castle = board
            .find_move(Square::at(5, 1), Square::at(7, 1))
            .expect("kingside castle is legal");
        board.make_move(castle);

        assert_eq!(board.king_square(Player::White), Square::at(7, 1));
        let rook = board.piece_at(Square::at(6, 1)).expect("rook crossed");
        assert_eq!(rook.kind, PieceKind::Rook);
        assert_eq!(rook.prev, Square::at(8, 1));
        assert!(rook.has_moved());
        assert!(board.piece_at(Square::at(8, 1)).is_none());
    }

    #[test]
    fn castling_blocked_by_intervening_piece() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(5, 1));
        board.place(PieceKind::Rook, Player::White, Square::at(1, 1));
        board.place(PieceKind::Knight, Player::White, Square::at(2, 1));
        board.place(PieceKind::King, Player::Black, Square::at(5, 8));

        // b1 sits between rook and king even though the king's own path
        // is clear
        let moves = targets(&mut board, Square::at(5, 1));
        assert!(!moves.contains(&Square::at(3, 1)));
    }

    #[test]
    fn castling_withheld_in_check_or_through_check() {
        // in check
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(5, 1));
        board.place(PieceKind::Rook, Player::White, Square::at(8, 1));
        board.place(PieceKind::King, Player::Black, Square::at(1, 8));
        board.place(PieceKind::Rook, Player::Black, Square::at(5, 8));
        let moves = targets(&mut board, Square::at(5, 1));
        assert!(!moves.contains(&Square::at(7, 1)));

        // pass-through square attacked
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(5, 1));
        board.place(PieceKind::Rook, Player::White, Square::at(8, 1));
        board.place(PieceKind::King, Player::Black, Square::at(1, 8));
        board.place(PieceKind::Rook, Player::Black, Square::at(6, 8));
        let moves = targets(&mut board, Square::at(5, 1));
        assert!(!moves.contains(&Square::at(7, 1)));

        // landing square attacked: caught by the generic legality filter
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(5, 1));
        board.place(PieceKind::Rook, Player::White, Square::at(8, 1));
        board.place(PieceKind::King, Player::Black, Square::at(1, 8));
        board.place(PieceKind::Rook, Player::Black, Square::at(7, 8));
        let moves = targets(&mut board, Square::at(5, 1));
        assert!(!moves.contains(&Square::at(7, 1)));
    }

    #[test]
    fn castling_withheld_after_rook_moved_away_and_back() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(5, 1));
        board.place(PieceKind::Rook, Player::White, Square::at(8, 1));
        board.place(PieceKind::King, Player::Black, Square::at(5, 8));

        board.make_move(Move::new(Square::at(8, 1), Square::at(8, 4)));
        board.make_move(Move::new(Square::at(5, 8), Square::at(4, 8)));
        board.make_move(Move::new(Square::at(8, 4), Square::at(8, 1)));
        board.make_move(Move::new(Square::at(4, 8), Square::at(5, 8)));

        let moves = targets(&mut board, Square::at(5, 1));
        assert!(!moves.contains(&Square::at(7, 1)));
    }

    #[test]
    fn castling_withheld_after_king_moved_away_and_back() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(5, 1));
        board.place(PieceKind::Rook, Player::White, Square::at(8, 1));
        board.place(PieceKind::King, Player::Black, Square::at(5, 8));

        board.make_move(Move::new(Square::at(5, 1), Square::at(6, 1)));
        board.make_move(Move::new(Square::at(5, 8), Square::at(4, 8)));
        board.make_move(Move::new(Square::at(6, 1), Square::at(5, 1)));
        board.make_move(Move::new(Square::at(4, 8), Square::at(5, 8)));

        assert!(board
            .find_move(Square::at(5, 1), Square::at(7, 1))
            .is_none());
    }

    #[test]
    fn moves_that_leave_the_king_in_check_are_filtered() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::White, Square::at(5, 1));
        board.place(PieceKind::Rook, Player::White, Square::at(5, 4));
        board.place(PieceKind::Rook, Player::Black, Square::at(5, 8));
        board.place(PieceKind::King, Player::Black, Square::at(1, 8));

        // the e4 rook is pinned to the file; it may slide along it but
        // never leave it
        let moves = targets(&mut board, Square::at(5, 4));
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|sq| sq.file() == 5));
    }

    #[test]
    fn find_move_rejects_silently() {
        let mut board = Board::new();
        assert!(board.find_move(Square::at(5, 2), Square::at(5, 5)).is_none());
        assert!(board.find_move(Square::at(5, 4), Square::at(5, 5)).is_none());
        assert!(board.find_move(Square::at(5, 2), Square::at(5, 4)).is_some());
    }
}
