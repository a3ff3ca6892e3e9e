// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arrayvec::ArrayVec;
use std::fmt;
use std::ops::{Deref, Index};

use crate::types::{Color, Piece, PieceKind, Square};

static BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of square contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub const fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for col in 0..8 {
            for &color in &[Color::White, Color::Black] {
                let back = Square::new(color.back_rank(), col);
                let pawns = Square::new(color.pawn_start_row(), col);
                board.set(back, Some(Piece::new(BACK_RANK[col], color)));
                board.set(pawns, Some(Piece::new(PieceKind::Pawn, color)));
            }
        }

        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row()][square.col()]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn set(&mut self, square: Square, contents: Option<Piece>) {
        self.squares[square.row()][square.col()] = contents;
    }

    /// Empties a square, returning what stood on it.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row()][square.col()].take()
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|&(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Begins a temporary edit of this board. Every square touched through the returned probe is
    /// put back when the probe goes out of scope.
    pub fn probe(&mut self) -> BoardProbe<'_> {
        BoardProbe {
            board: self,
            saved: ArrayVec::new(),
        }
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Option<Piece> {
        &self.squares[square.row()][square.col()]
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.squares[row][col] {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", 8 - row)?;
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in "abcdefgh".chars() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

/// A scoped set of edits to a board, used to ask "what if" questions (is the king safe on this
/// square, does this en passant capture open a rank) without cloning the board. The original
/// contents of every touched square are restored on drop, whatever path leaves the scope.
pub struct BoardProbe<'a> {
    board: &'a mut Board,
    saved: ArrayVec<[(Square, Option<Piece>); 4]>,
}

impl<'a> BoardProbe<'a> {
    pub fn lift(&mut self, square: Square) {
        self.put(square, None);
    }

    pub fn place(&mut self, square: Square, piece: Piece) {
        self.put(square, Some(piece));
    }

    fn put(&mut self, square: Square, contents: Option<Piece>) {
        self.saved.push((square, self.board.piece_at(square)));
        self.board.set(square, contents);
    }
}

impl<'a> Deref for BoardProbe<'a> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl<'a> Drop for BoardProbe<'a> {
    fn drop(&mut self) {
        while let Some((square, contents)) = self.saved.pop() {
            self.board.set(square, contents);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::types::{Color, Piece, PieceKind, Square};

    #[test]
    fn starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(
            Some(Piece::new(PieceKind::King, Color::White)),
            board.piece_at(Square::new(7, 4))
        );
        assert_eq!(
            Some(Piece::new(PieceKind::Queen, Color::Black)),
            board.piece_at(Square::new(0, 3))
        );
        assert_eq!(16, board.pieces(Color::White).count());
        assert_eq!(16, board.pieces(Color::Black).count());
        for row in 2..6 {
            for col in 0..8 {
                assert!(board.is_empty(Square::new(row, col)));
            }
        }
    }

    #[test]
    fn find_king() {
        let board = Board::starting_position();
        assert_eq!(Some(Square::new(7, 4)), board.find_king(Color::White));
        assert_eq!(Some(Square::new(0, 4)), board.find_king(Color::Black));
        assert_eq!(None, Board::empty().find_king(Color::White));
    }

    #[test]
    fn probe_restores_on_drop() {
        let mut board = Board::starting_position();
        let before = board;
        {
            let mut probe = board.probe();
            let king = probe.piece_at(Square::new(7, 4)).unwrap();
            probe.lift(Square::new(7, 4));
            probe.place(Square::new(4, 4), king);
            probe.place(Square::new(4, 4), Piece::new(PieceKind::Queen, Color::Black));
            assert!(probe.is_empty(Square::new(7, 4)));
            assert_eq!(PieceKind::Queen, probe[Square::new(4, 4)].unwrap().kind);
        }

        assert_eq!(before, board);
    }

    #[test]
    fn probe_restores_on_early_return() {
        fn touch_and_bail(board: &mut Board) -> Option<()> {
            let mut probe = board.probe();
            probe.lift(Square::new(6, 0));
            probe.piece_at(Square::new(4, 0))?;
            Some(())
        }

        let mut board = Board::starting_position();
        assert_eq!(None, touch_and_bail(&mut board));
        assert_eq!(Board::starting_position(), board);
    }
}
