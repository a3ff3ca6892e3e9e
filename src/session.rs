// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented text front end for a single game. Moves are typed as a pair of squares
//! ("e2e4") and accepted only if they match one of the legal moves of the position. `moves e2`
//! lists where the piece on e2 can go.
use std::io::{self, BufRead, Write};

use crate::game_state::GameState;
use crate::move_generator::MoveVec;
use crate::moves::Move;
use crate::types::Square;

pub struct Session {
    state: GameState,
    valid_moves: MoveVec,
}

impl Session {
    pub fn new() -> Session {
        Session::with_state(GameState::new_game())
    }

    pub fn with_state(mut state: GameState) -> Session {
        let valid_moves = state.get_valid_moves();
        Session { state, valid_moves }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn run<R, W>(mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            let components: Vec<_> = line.split_whitespace().collect();
            match components.split_first().unwrap_or((&"", &[])) {
                (&"", []) => {}
                (&"quit", []) => break,
                (&"new", []) => self.reset(GameState::new_game()),
                (&"board", []) => write!(&mut writer, "{}", self.state)?,
                (&"fen", []) => writeln!(&mut writer, "{}", self.state.as_fen())?,
                (&"moves", []) => self.handle_moves(&mut writer, None)?,
                (&"moves", [square]) => match Square::from_notation(square) {
                    Some(from) => self.handle_moves(&mut writer, Some(from))?,
                    None => writeln!(&mut writer, "invalid square: {}", square)?,
                },
                (&"undo", []) => self.handle_undo(&mut writer)?,
                (&"position", args) => self.handle_position(&mut writer, args)?,
                (&mov, []) => self.handle_move(&mut writer, mov)?,
                _ => writeln!(&mut writer, "unrecognized command")?,
            }
        }

        Ok(())
    }

    fn reset(&mut self, state: GameState) {
        self.state = state;
        self.valid_moves = self.state.get_valid_moves();
    }

    fn handle_moves<W: Write>(&mut self, w: &mut W, from: Option<Square>) -> io::Result<()> {
        let notation: Vec<_> = self
            .valid_moves
            .iter()
            .filter(|mov| from.map_or(true, |sq| mov.start() == sq))
            .map(Move::to_square_notation)
            .collect();
        writeln!(w, "{}", notation.join(" "))
    }

    fn handle_undo<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        match self.state.move_log().last() {
            Some(&mov) => writeln!(w, "undo {}", mov)?,
            None => return writeln!(w, "nothing to undo"),
        }

        self.state.undo();
        self.valid_moves = self.state.get_valid_moves();
        Ok(())
    }

    fn handle_position<W: Write>(&mut self, w: &mut W, slice: &[&str]) -> io::Result<()> {
        match slice.split_first() {
            Some((&"startpos", [])) => self.reset(GameState::new_game()),
            Some((&"fen", fen)) => match GameState::from_fen(fen.join(" ")) {
                Ok(state) => self.reset(state),
                Err(err) => writeln!(w, "invalid fen: {:?}", err)?,
            },
            _ => writeln!(w, "invalid position command")?,
        }

        Ok(())
    }

    fn handle_move<W: Write>(&mut self, w: &mut W, text: &str) -> io::Result<()> {
        if self.state.is_game_over() {
            return writeln!(w, "game is over");
        }

        let squares = if text.len() == 4 && text.is_char_boundary(2) {
            Square::from_notation(&text[..2]).and_then(|start| {
                Square::from_notation(&text[2..]).map(|end| (start, end))
            })
        } else {
            None
        };

        let (start, end) = match squares {
            Some(squares) => squares,
            None => return writeln!(w, "unrecognized command"),
        };

        if self.state.board().is_empty(start) {
            return writeln!(w, "illegal move: {}", text);
        }

        let proposed = Move::new(self.state.board(), start, end);
        let mov = match self.valid_moves.iter().find(|&&mov| mov == proposed) {
            Some(&mov) => mov,
            None => return writeln!(w, "illegal move: {}", text),
        };

        self.state.make_move(mov);
        self.valid_moves = self.state.get_valid_moves();
        writeln!(w, "{}", mov)?;
        if self.state.is_checkmate() {
            let winner = self.state.side_to_move().toggle();
            writeln!(w, "checkmate, {} wins", winner.name())?;
        } else if self.state.is_stalemate() {
            writeln!(w, "stalemate")?;
        } else if self.state.in_check() {
            writeln!(w, "check")?;
        }

        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Session;

    fn run(input: &str) -> String {
        let mut output = Vec::new();
        Session::new().run(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn plays_and_reports() {
        let output = run("e2e4\nfen\n");
        assert_eq!(
            "Pe2-e4\nrnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1\n",
            output
        );
    }

    #[test]
    fn rejects_illegal_moves() {
        let output = run("e2e5\ne7e5\nzz\n");
        assert_eq!(
            "illegal move: e2e5\nillegal move: e7e5\nunrecognized command\n",
            output
        );
    }

    #[test]
    fn fools_mate_then_refuses() {
        let output = run("f2f3\ne7e5\ng2g4\nd8h4\na2a3\nundo\na2a3\n");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            vec![
                "Pf2-f3",
                "pe7-e5",
                "Pg2-g4",
                "qd8-h4",
                "checkmate, black wins",
                "game is over",
                "undo qd8-h4",
                "illegal move: a2a3",
            ],
            lines
        );
    }

    #[test]
    fn undo_with_empty_log() {
        assert_eq!("nothing to undo\n", run("undo\n"));
    }

    #[test]
    fn position_and_moves() {
        let output = run("position fen 7k/8/8/8/8/8/8/K7 w - - 0 1\nmoves\nquit\nmoves\n");
        assert_eq!("a1a2 a1b1 a1b2\n", sort_words(&output));
    }

    #[test]
    fn moves_for_one_piece() {
        // e4 is empty, so it has nothing to list
        let output = run("moves g1\nmoves e4\nmoves z9\n");
        assert_eq!("g1f3 g1h3\n\ninvalid square: z9\n", output);
    }

    fn sort_words(line: &str) -> String {
        let mut words: Vec<_> = line.split_whitespace().collect();
        words.sort();
        format!("{}\n", words.join(" "))
    }
}
