// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![allow(dead_code)]

use chess_rules::{Board, CastlingRights, Color, GameState, Move, Square};

pub fn sq(text: &str) -> Square {
    Square::from_notation(text).unwrap()
}

pub fn find(state: &mut GameState, text: &str) -> Option<Move> {
    state
        .get_valid_moves()
        .into_iter()
        .find(|mov| mov.to_square_notation() == text)
}

/// Plays the legal move written as "e2e4", panicking if there is none.
pub fn play(state: &mut GameState, text: &str) -> Move {
    let mov = match find(state, text) {
        Some(mov) => mov,
        None => panic!("{} is not legal in {}", text, state.as_fen()),
    };

    state.make_move(mov);
    mov
}

pub fn legal_moves(state: &mut GameState) -> Vec<String> {
    let mut moves: Vec<_> = state
        .get_valid_moves()
        .iter()
        .map(Move::to_square_notation)
        .collect();
    moves.sort();
    moves
}

#[derive(Debug, PartialEq)]
pub struct Snapshot {
    board: Board,
    side: Color,
    kings: (Square, Square),
    en_passant: Option<Square>,
    rights: CastlingRights,
    log_len: usize,
}

pub fn snapshot(state: &GameState) -> Snapshot {
    Snapshot {
        board: *state.board(),
        side: state.side_to_move(),
        kings: (
            state.king_square(Color::White),
            state.king_square(Color::Black),
        ),
        en_passant: state.en_passant_square(),
        rights: state.castling_rights(),
        log_len: state.move_log().len(),
    }
}
