// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
mod common;

use chess_rules::{Color, GameState, Piece, PieceKind};
use common::{play, snapshot, sq};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn every_kind_of_move_undoes_exactly() {
    let cases: &[(&str, &str)] = &[
        (START, "g1f3"),
        (START, "e2e4"),
        ("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", "e4d5"),
        ("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5d6"),
        ("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1", "d4e3"),
        ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1"),
        ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1c1"),
        ("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8c8"),
        ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "a1a8"),
        ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1d1"),
        ("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1", "b7b8"),
        ("r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1", "b7a8"),
        ("4k3/8/8/8/8/8/6p1/4K3 b - - 0 1", "g2g1"),
    ];

    for &(fen, text) in cases {
        let mut state = GameState::from_fen(fen).unwrap();
        let before = snapshot(&state);
        play(&mut state, text);
        assert_ne!(before, snapshot(&state), "{} in {}", text, fen);
        state.undo();
        assert_eq!(before, snapshot(&state), "{} in {}", text, fen);
        assert_eq!(fen, state.as_fen());
    }
}

#[test]
fn every_kiwipete_move_undoes_exactly() {
    let mut state = GameState::from_fen(KIWIPETE).unwrap();
    let before = snapshot(&state);
    for mov in state.get_valid_moves() {
        state.make_move(mov);
        state.undo();
        assert_eq!(before, snapshot(&state), "{}", mov);
    }
}

#[test]
fn side_to_move_alternates() {
    let mut state = GameState::new_game();
    play(&mut state, "e2e4");
    assert_eq!(Color::Black, state.side_to_move());
    play(&mut state, "e7e5");
    assert_eq!(Color::White, state.side_to_move());
    assert_eq!(2, state.move_log().len());
    state.undo();
    assert_eq!(Color::Black, state.side_to_move());
}

#[test]
fn promotion_makes_a_queen() {
    let mut state = GameState::from_fen("r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mov = play(&mut state, "b7a8");
    assert!(mov.is_pawn_promotion());
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::Black)),
        mov.piece_captured()
    );
    assert_eq!(
        Some(Piece::new(PieceKind::Queen, Color::White)),
        state.board().piece_at(sq("a8"))
    );
    assert!(state.board().is_empty(sq("b7")));

    state.undo();
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::White)),
        state.board().piece_at(sq("b7"))
    );
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::Black)),
        state.board().piece_at(sq("a8"))
    );
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut state = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let mov = play(&mut state, "e5d6");
    assert!(mov.is_en_passant());
    assert_eq!("4k3/8/3P4/8/8/8/8/4K3 b - - 0 1", state.as_fen());

    state.undo();
    assert_eq!(Some(sq("d6")), state.en_passant_square());
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::Black)),
        state.board().piece_at(sq("d5"))
    );
}

#[test]
fn en_passant_square_lasts_one_ply() {
    let mut state = GameState::new_game();
    play(&mut state, "e2e4");
    assert_eq!(Some(sq("e3")), state.en_passant_square());
    play(&mut state, "g8f6");
    assert_eq!(None, state.en_passant_square());

    state.undo();
    assert_eq!(Some(sq("e3")), state.en_passant_square());
    state.undo();
    assert_eq!(None, state.en_passant_square());
}

#[test]
fn en_passant_expires_if_not_taken() {
    // black declines on the next move, so the capture is gone for good
    let mut state = GameState::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap();
    play(&mut state, "e2e4");
    play(&mut state, "e8e7");
    play(&mut state, "e1e2");
    assert!(common::find(&mut state, "d4e3").is_none());
}

#[test]
fn valid_moves_do_not_disturb_state() {
    let mut state = GameState::from_fen(KIWIPETE).unwrap();
    let before = snapshot(&state);
    let first = state.get_valid_moves();
    let second = state.get_valid_moves();
    assert_eq!(48, first.len());
    assert_eq!(first, second);
    assert_eq!(before, snapshot(&state));
    assert_eq!(KIWIPETE, state.as_fen());
}

#[test]
fn undo_clears_checkmate() {
    let mut state = GameState::new_game();
    for text in &["f2f3", "e7e5", "g2g4", "d8h4"] {
        play(&mut state, text);
    }
    state.get_valid_moves();
    assert!(state.is_checkmate());

    assert!(state.in_check());

    state.undo();
    assert!(!state.is_checkmate());
    assert!(!state.in_check());
    assert!(!state.is_game_over());
    assert!(!state.get_valid_moves().is_empty());
    assert!(!state.in_check());
}

#[test]
fn undo_with_empty_log_is_noop() {
    let mut state = GameState::from_fen(KIWIPETE).unwrap();
    let before = snapshot(&state);
    state.undo();
    assert_eq!(before, snapshot(&state));
}

#[test]
fn unwinding_a_game_returns_to_start() {
    let mut state = GameState::new_game();
    let before = snapshot(&state);
    let game = [
        "e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "d5c6", "d8d2", "b1d2", "c8g4", "g1f3",
        "b8c6", "e1g1", "e8c8",
    ];
    for text in game.iter() {
        play(&mut state, text);
    }
    assert_eq!(game.len(), state.move_log().len());

    for _ in game.iter() {
        state.undo();
    }
    assert_eq!(before, snapshot(&state));
    assert_eq!(START, state.as_fen());
}
