// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::attacks::{self, scan_attacks, AttackScan};
use crate::board::Board;
use crate::castling;
use crate::moves::Move;
use crate::types::{CastlingRights, Color, Direction, Piece, PieceKind, Square};
use crate::types::{DIAGONAL_DIRECTIONS, DIRECTIONS, ORTHOGONAL_DIRECTIONS};

pub type MoveVec = Vec<Move>;

/// Per-piece move generation for the side to move.
///
/// Moves respect the pins found by the attack scan and king moves never step into check, but
/// nothing here knows whether the side to move is currently in check; answering a check is left
/// to the caller. The board is borrowed mutably only so that king steps and en passant captures
/// can be tried out with a `BoardProbe`; it is unchanged when generation returns.
pub struct MoveGenerator<'a> {
    board: &'a mut Board,
    side: Color,
    king: Square,
    en_passant: Option<Square>,
    castling_rights: CastlingRights,
    scan: &'a AttackScan,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(
        board: &'a mut Board,
        side: Color,
        king: Square,
        en_passant: Option<Square>,
        castling_rights: CastlingRights,
        scan: &'a AttackScan,
    ) -> MoveGenerator<'a> {
        MoveGenerator {
            board,
            side,
            king,
            en_passant,
            castling_rights,
            scan,
        }
    }

    pub fn generate_moves(&mut self, moves: &mut MoveVec) {
        for sq in Square::all() {
            match self.board.piece_at(sq) {
                Some(piece) if piece.color == self.side => {
                    self.generate_piece_moves(sq, piece, moves)
                }
                _ => {}
            }
        }
    }

    pub fn generate_piece_moves(&mut self, sq: Square, piece: Piece, moves: &mut MoveVec) {
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(sq, moves),
            PieceKind::Knight => self.knight_moves(sq, moves),
            PieceKind::Bishop => self.sliding_moves(sq, &DIAGONAL_DIRECTIONS, moves),
            PieceKind::Rook => self.sliding_moves(sq, &ORTHOGONAL_DIRECTIONS, moves),
            PieceKind::Queen => self.sliding_moves(sq, &DIRECTIONS, moves),
            PieceKind::King => self.king_moves(sq, moves),
        }
    }

    fn pawn_moves(&mut self, from: Square, moves: &mut MoveVec) {
        let forward = self.side.pawn_direction();
        if let Some(one) = from.offset(forward, 0) {
            if self.board.is_empty(one) && self.pin_allows(from, one) {
                moves.push(Move::new(self.board, from, one));
                if from.row() == self.side.pawn_start_row() {
                    let two = one
                        .offset(forward, 0)
                        .expect("double pawn push runs off the board");
                    if self.board.is_empty(two) {
                        moves.push(Move::new(self.board, from, two));
                    }
                }
            }
        }

        for &cols in &[-1, 1] {
            let to = match from.offset(forward, cols) {
                Some(to) => to,
                None => continue,
            };

            match self.board.piece_at(to) {
                Some(target) if target.color != self.side => {
                    if self.pin_allows(from, to) {
                        moves.push(Move::new(self.board, from, to));
                    }
                }
                None if Some(to) == self.en_passant => self.en_passant_move(from, to, moves),
                _ => {}
            }
        }
    }

    fn en_passant_move(&mut self, from: Square, to: Square, moves: &mut MoveVec) {
        let captured = Square::new(from.row(), to.col());
        let victim = Piece::new(PieceKind::Pawn, self.side.toggle());
        if self.board.piece_at(captured) != Some(victim) || !self.pin_allows(from, to) {
            return;
        }

        // Taking en passant lifts two pawns off the same rank at once, which can open a line to
        // the king that no pin covers. Try it on the board and look.
        let mov = Move::en_passant(self.board, from, to);
        let exposed = {
            let mut probe = self.board.probe();
            probe.lift(from);
            probe.lift(captured);
            probe.place(to, mov.piece_moved());
            scan_attacks(&probe, self.king, self.side).in_check()
        };

        if !exposed {
            moves.push(mov);
        }
    }

    fn knight_moves(&mut self, from: Square, moves: &mut MoveVec) {
        // A knight never lands on the line it is pinned to.
        if self.scan.pin_direction(from).is_some() {
            return;
        }

        for &to in attacks::knight_targets(from) {
            if self.is_free_for_us(to) {
                moves.push(Move::new(self.board, from, to));
            }
        }
    }

    fn sliding_moves(&mut self, from: Square, directions: &[Direction], moves: &mut MoveVec) {
        for &dir in directions {
            if let Some(pin) = self.scan.pin_direction(from) {
                if dir != pin && dir != pin.reverse() {
                    continue;
                }
            }

            let mut cursor = from;
            while let Some(to) = cursor.towards(dir) {
                cursor = to;
                match self.board.piece_at(to) {
                    None => moves.push(Move::new(self.board, from, to)),
                    Some(piece) => {
                        if piece.color != self.side {
                            moves.push(Move::new(self.board, from, to));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn king_moves(&mut self, from: Square, moves: &mut MoveVec) {
        let king = self
            .board
            .piece_at(from)
            .expect("king move generation from an empty square");
        for &to in attacks::king_targets(from) {
            if !self.is_free_for_us(to) {
                continue;
            }

            let mov = Move::new(self.board, from, to);
            let safe = {
                let mut probe = self.board.probe();
                probe.lift(from);
                probe.place(to, king);
                !scan_attacks(&probe, to, self.side).in_check()
            };

            if safe {
                moves.push(mov);
            }
        }

        castling::generate_castling_moves(
            self.board,
            from,
            self.side,
            self.castling_rights,
            self.scan.in_check(),
            moves,
        );
    }

    /// Whether the piece on `from` may move to `to` without leaving the line it is pinned to.
    fn pin_allows(&self, from: Square, to: Square) -> bool {
        match self.scan.pin_direction(from) {
            None => true,
            Some(pin) => match Direction::between(from, to) {
                Some(dir) => dir == pin || dir == pin.reverse(),
                None => false,
            },
        }
    }

    fn is_free_for_us(&self, sq: Square) -> bool {
        match self.board.piece_at(sq) {
            Some(piece) => piece.color != self.side,
            None => true,
        }
    }
}
