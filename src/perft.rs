// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::game_state::GameState;

/// Counts the leaf nodes of the legal move tree `depth` plies deep. Each branch works on its own
/// clone of the game, so branches are explored in parallel.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut root = state.clone();
    let moves = root.get_valid_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| {
            let mut child = root.clone();
            child.make_move(mov);
            perft(&child, depth - 1)
        })
        .sum()
}

/// Same count as `perft`, walking a single game with `make_move` and `undo`. The game is left as
/// it was found.
pub fn perft_with_undo(state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = state.get_valid_moves();
    let mut nodes = 0;
    for mov in moves {
        state.make_move(mov);
        nodes += perft_with_undo(state, depth - 1);
        state.undo();
    }

    nodes
}
