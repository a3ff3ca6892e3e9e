// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::board::Board;
use crate::types::{Piece, PieceKind, Square};

/// A move, together with everything needed to apply it and to take it back.
///
/// The moved and captured pieces are read off the board when the move is constructed, so a
/// `Move` stays meaningful after the board changes underneath it. Construction does not check
/// legality; that is the job of the move generator.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Move {
    start: Square,
    end: Square,
    piece_moved: Piece,
    piece_captured: Option<Piece>,
    is_en_passant: bool,
    is_castling: bool,
    is_pawn_promotion: bool,
}

impl Move {
    pub fn new(board: &Board, start: Square, end: Square) -> Move {
        let piece_moved = board
            .piece_at(start)
            .expect("invalid move: no piece at start square");
        let is_pawn_promotion = piece_moved.kind == PieceKind::Pawn
            && end.row() == piece_moved.color.promotion_row();
        Move {
            start,
            end,
            piece_moved,
            piece_captured: board.piece_at(end),
            is_en_passant: false,
            is_castling: false,
            is_pawn_promotion,
        }
    }

    /// A king move of two files that also carries the rook along.
    pub fn castle(board: &Board, start: Square, end: Square) -> Move {
        Move {
            is_castling: true,
            ..Move::new(board, start, end)
        }
    }

    /// A pawn capture onto the en passant square. The captured pawn sits beside the capturing
    /// pawn, not on the end square.
    pub fn en_passant(board: &Board, start: Square, end: Square) -> Move {
        let captured_square = Square::new(start.row(), end.col());
        Move {
            is_en_passant: true,
            piece_captured: board.piece_at(captured_square),
            ..Move::new(board, start, end)
        }
    }

    pub fn start(&self) -> Square {
        self.start
    }

    pub fn end(&self) -> Square {
        self.end
    }

    pub fn piece_moved(&self) -> Piece {
        self.piece_moved
    }

    pub fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }

    pub fn is_en_passant(&self) -> bool {
        self.is_en_passant
    }

    pub fn is_castling(&self) -> bool {
        self.is_castling
    }

    pub fn is_pawn_promotion(&self) -> bool {
        self.is_pawn_promotion
    }

    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.piece_moved.kind == PieceKind::Pawn
            && (self.end.row() as i32 - self.start.row() as i32).abs() == 2
    }

    /// The square the captured piece stood on. Equal to the end square for everything except en
    /// passant.
    pub fn captured_square(&self) -> Square {
        if self.is_en_passant {
            Square::new(self.start.row(), self.end.col())
        } else {
            self.end
        }
    }

    /// Start and end squares in coordinate notation, e.g. "e2e4".
    pub fn to_square_notation(&self) -> String {
        format!("{}{}", self.start, self.end)
    }
}

// Moves are identified by where they go and what moves; the remaining fields are derived from
// the board and would only differ for moves proposed against a different position.
impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.start == other.start && self.end == other.end && self.piece_moved == other.piece_moved
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}{}", self.piece_moved, self.start, sep, self.end)?;
        if self.is_pawn_promotion {
            write!(f, "=Q")?;
        }
        if self.is_en_passant {
            write!(f, " e.p.")?;
        }
        if self.is_castling {
            write!(f, " (castle)")?;
        }
        Ok(())
    }
}
