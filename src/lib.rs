// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess rules engine. `GameState` holds the board, produces the legal moves of the side to
//! move, and plays and takes back moves, tracking castling rights, en passant, check, checkmate
//! and stalemate along the way.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod attacks;
mod board;
mod castling;
mod game_state;
mod move_generator;
mod moves;
mod perft;
pub mod session;
mod types;

pub use board::{Board, BoardProbe};
pub use game_state::{FenParseError, GameState};
pub use move_generator::{MoveGenerator, MoveVec};
pub use moves::Move;
pub use perft::{perft, perft_with_undo};
pub use types::{CastlingRights, Color, Direction, Piece, PieceKind, Square};

/// The standard starting position, White to move.
pub fn new_game() -> GameState {
    GameState::new_game()
}
