// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::attacks::scan_attacks;
use crate::board::Board;
use crate::move_generator::MoveVec;
use crate::moves::Move;
use crate::types::{CastlingRights, Color, Piece, PieceKind, Square};

pub fn king_home(color: Color) -> Square {
    Square::new(color.back_rank(), 4)
}

pub fn kingside_rook_home(color: Color) -> Square {
    Square::new(color.back_rank(), 7)
}

pub fn queenside_rook_home(color: Color) -> Square {
    Square::new(color.back_rank(), 0)
}

/// Appends the castling moves available to the `color` king on `king`.
///
/// Castling requires the right, an empty path between king and rook, and a king that is not in
/// check and does not pass over or land on an attacked square. On the queenside the b-file
/// square only has to be empty.
pub fn generate_castling_moves(
    board: &Board,
    king: Square,
    color: Color,
    rights: CastlingRights,
    in_check: bool,
    moves: &mut MoveVec,
) {
    if in_check || king != king_home(color) {
        return;
    }

    let rook = Some(Piece::new(PieceKind::Rook, color));
    if rights.contains(CastlingRights::kingside(color))
        && board.piece_at(kingside_rook_home(color)) == rook
        && path_is_clear(board, king, color, &[1, 2], &[1, 2])
    {
        let end = Square::new(king.row(), king.col() + 2);
        moves.push(Move::castle(board, king, end));
    }

    if rights.contains(CastlingRights::queenside(color))
        && board.piece_at(queenside_rook_home(color)) == rook
        && path_is_clear(board, king, color, &[-1, -2, -3], &[-1, -2])
    {
        let end = Square::new(king.row(), king.col() - 2);
        moves.push(Move::castle(board, king, end));
    }
}

/// Checks that the squares `empty` files away from the king are vacant and that the squares
/// `safe` files away are not attacked.
fn path_is_clear(board: &Board, king: Square, color: Color, empty: &[i32], safe: &[i32]) -> bool {
    let on_rank = |cols: i32| {
        king.offset(0, cols)
            .expect("castling path runs off the board")
    };

    empty.iter().all(|&cols| board.is_empty(on_rank(cols)))
        && safe
            .iter()
            .all(|&cols| !scan_attacks(board, on_rank(cols), color).in_check())
}

/// The rook's start and end squares for a castling move.
pub fn rook_squares(mov: &Move) -> (Square, Square) {
    let row = mov.end().row();
    if mov.end().col() > mov.start().col() {
        (Square::new(row, 7), Square::new(row, mov.end().col() - 1))
    } else {
        (Square::new(row, 0), Square::new(row, mov.end().col() + 1))
    }
}

/// Castling rights that are lost by playing `mov`.
///
/// Moving the king gives up both sides, moving a rook off its home square gives up that side,
/// and a rook captured on its home square takes its owner's right with it.
pub fn forfeited_rights(mov: &Move) -> CastlingRights {
    let mut lost = CastlingRights::NONE;
    let moved = mov.piece_moved();
    match moved.kind {
        PieceKind::King => lost |= CastlingRights::both(moved.color),
        PieceKind::Rook => lost |= rook_home_right(mov.start(), moved.color),
        _ => {}
    }

    if let Some(captured) = mov.piece_captured() {
        if captured.kind == PieceKind::Rook {
            lost |= rook_home_right(mov.captured_square(), captured.color);
        }
    }

    lost
}

fn rook_home_right(square: Square, color: Color) -> CastlingRights {
    if square == kingside_rook_home(color) {
        CastlingRights::kingside(color)
    } else if square == queenside_rook_home(color) {
        CastlingRights::queenside(color)
    } else {
        CastlingRights::NONE
    }
}
