// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::fmt::{self, Write};

use crate::attacks::{self, AttackScan};
use crate::board::Board;
use crate::castling;
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::types::{CastlingRights, Color, Piece, PieceKind, Square, TableIndex};

/// Possible errors that can arise when parsing a FEN string into a `GameState`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    MissingKing(Color),
    TooManyKings(Color),
    OpponentInCheck,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
}

/// The authoritative state of one game: the board, whose turn it is, and enough history to take
/// every move back.
///
/// The move log, the castling rights log and the en passant log grow and shrink together. The
/// rights logs hold one more entry than the move log (the state before any move), and their last
/// entries always equal `castling_rights` and `en_passant`.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    king_squares: [Square; 2],
    move_log: Vec<Move>,
    castling_rights: CastlingRights,
    castling_log: Vec<CastlingRights>,
    en_passant: Option<Square>,
    en_passant_log: Vec<Option<Square>>,
    in_check: bool,
    checkmate: bool,
    stalemate: bool,
}

//
// State getters
//

impl GameState {
    /// The standard starting position with White to move and all castling rights.
    pub fn new_game() -> GameState {
        let board = Board::starting_position();
        GameState::from_parts(board, Color::White, CastlingRights::all(), None)
            .expect("starting position has both kings")
    }

    fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
    ) -> Result<GameState, FenParseError> {
        let king_squares = [
            GameState::lone_king(&board, Color::White)?,
            GameState::lone_king(&board, Color::Black)?,
        ];

        // The side that just moved may not have left its king attacked.
        let waiting = side_to_move.toggle();
        if attacks::scan_attacks(&board, king_squares[waiting.as_index()], waiting).in_check() {
            return Err(FenParseError::OpponentInCheck);
        }

        Ok(GameState {
            board,
            side_to_move,
            king_squares,
            move_log: Vec::new(),
            castling_rights,
            castling_log: vec![castling_rights],
            en_passant,
            en_passant_log: vec![en_passant],
            in_check: false,
            checkmate: false,
            stalemate: false,
        })
    }

    fn lone_king(board: &Board, color: Color) -> Result<Square, FenParseError> {
        let mut kings = board
            .pieces(color)
            .filter(|&(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq);
        match (kings.next(), kings.next()) {
            (Some(king), None) => Ok(king),
            (None, _) => Err(FenParseError::MissingKing(color)),
            (Some(_), Some(_)) => Err(FenParseError::TooManyKings(color)),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.as_index()]
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castling_rights
            .contains(CastlingRights::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castling_rights
            .contains(CastlingRights::queenside(color))
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Whether the side to move is in check. Like the checkmate and stalemate flags, this is set
    /// by `get_valid_moves` and cleared by `make_move` and `undo`.
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    pub fn is_game_over(&self) -> bool {
        self.checkmate || self.stalemate
    }
}

//
// Legal move generation
//

impl GameState {
    /// Check and pin analysis for a `color` king standing on `origin`.
    pub fn scan_attacks(&self, origin: Square, color: Color) -> AttackScan {
        attacks::scan_attacks(&self.board, origin, color)
    }

    /// All legal moves for the side to move. Also refreshes the check flag and sets checkmate or
    /// stalemate when there are no moves at all.
    pub fn get_valid_moves(&mut self) -> MoveVec {
        let side = self.side_to_move;
        let king = self.king_square(side);
        let scan = attacks::scan_attacks(&self.board, king, side);
        let mut moves = MoveVec::new();
        {
            let mut gen = MoveGenerator::new(
                &mut self.board,
                side,
                king,
                self.en_passant,
                self.castling_rights,
                &scan,
            );

            match scan.checks() {
                [] => gen.generate_moves(&mut moves),
                [check] => {
                    gen.generate_moves(&mut moves);
                    let squares = check.interdiction_squares(king);
                    moves.retain(|mov| {
                        mov.piece_moved().kind == PieceKind::King
                            || squares.contains(&mov.end())
                            || (mov.is_en_passant() && mov.captured_square() == check.attacker())
                    });
                }
                // Nothing but the king can answer two checks at once.
                _ => gen.generate_piece_moves(king, Piece::new(PieceKind::King, side), &mut moves),
            }
        }

        for mov in &moves {
            trace!("legal move: {}", mov);
        }

        self.in_check = scan.in_check();
        self.checkmate = moves.is_empty() && self.in_check;
        self.stalemate = moves.is_empty() && !self.in_check;
        if self.checkmate {
            info!("checkmate, {:?} to move has lost", side);
        } else if self.stalemate {
            info!("stalemate, {:?} to move has no moves", side);
        }

        moves
    }
}

//
// Move application and reversal
//

impl GameState {
    /// Plays a move produced by `get_valid_moves`. Legality is not re-checked, and moves are
    /// accepted even after checkmate or stalemate; callers decide whether to allow that.
    pub fn make_move(&mut self, mov: Move) {
        debug!("make_move: {}", mov);
        let moved = mov.piece_moved();
        debug_assert_eq!(self.side_to_move, moved.color, "moving out of turn");

        self.board.set(mov.start(), None);
        if mov.is_en_passant() {
            self.board.set(mov.captured_square(), None);
        }

        let placed = if mov.is_pawn_promotion() {
            Piece::new(PieceKind::Queen, moved.color)
        } else {
            moved
        };
        self.board.set(mov.end(), Some(placed));

        if moved.kind == PieceKind::King {
            self.king_squares[moved.color.as_index()] = mov.end();
        }

        if mov.is_castling() {
            let (rook_from, rook_to) = castling::rook_squares(&mov);
            let rook = self.board.take(rook_from);
            debug_assert!(rook.is_some(), "castling without a rook");
            self.board.set(rook_to, rook);
        }

        self.en_passant = if mov.is_double_pawn_push() {
            let skipped = (mov.start().row() + mov.end().row()) / 2;
            Some(Square::new(skipped, mov.start().col()))
        } else {
            None
        };

        self.move_log.push(mov);
        self.side_to_move = self.side_to_move.toggle();
        self.castling_rights
            .remove(castling::forfeited_rights(&mov));
        self.castling_log.push(self.castling_rights);
        self.en_passant_log.push(self.en_passant);
        self.in_check = false;
        self.checkmate = false;
        self.stalemate = false;
    }

    /// Takes back the last move. Does nothing if no move has been made.
    pub fn undo(&mut self) {
        let mov = match self.move_log.pop() {
            Some(mov) => mov,
            None => return,
        };

        debug!("undo: {}", mov);
        self.board.set(mov.end(), None);
        self.board.set(mov.captured_square(), mov.piece_captured());
        self.board.set(mov.start(), Some(mov.piece_moved()));

        let moved = mov.piece_moved();
        if moved.kind == PieceKind::King {
            self.king_squares[moved.color.as_index()] = mov.start();
        }

        if mov.is_castling() {
            let (rook_from, rook_to) = castling::rook_squares(&mov);
            let rook = self.board.take(rook_to);
            self.board.set(rook_from, rook);
        }

        self.side_to_move = self.side_to_move.toggle();
        self.castling_log.pop();
        self.castling_rights = *self
            .castling_log
            .last()
            .expect("castling log lost its initial entry");
        self.en_passant_log.pop();
        self.en_passant = *self
            .en_passant_log
            .last()
            .expect("en passant log lost its initial entry");
        self.in_check = false;
        self.checkmate = false;
        self.stalemate = false;
    }
}

//
// FEN parsing and generation.
//

impl GameState {
    /// Constructs a game from a FEN description of a position. The move counters are validated
    /// but not kept.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<GameState, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat<'a>(iter: &mut Stream<'a>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn peek<'a>(iter: &mut Stream<'a>) -> Result<char, FenParseError> {
            iter.peek().cloned().ok_or(FenParseError::UnexpectedEnd)
        }

        fn eat_board<'a>(iter: &mut Stream<'a>) -> Result<Board, FenParseError> {
            let mut board = Board::empty();
            for row in 0..8 {
                let mut col = 0;
                while col < 8 {
                    let c = peek(iter)?;
                    if let Some(skip) = c.to_digit(10) {
                        if skip < 1 || skip > 8 {
                            return Err(FenParseError::InvalidDigit);
                        }

                        col += skip as usize;
                        if col > 8 {
                            return Err(FenParseError::FileDoesNotSumToEight);
                        }

                        iter.next();
                        continue;
                    }

                    let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                    board.set(Square::new(row, col), Some(piece));
                    iter.next();
                    col += 1;
                }

                if row != 7 {
                    eat(iter, '/')?;
                }
            }

            Ok(board)
        }

        fn eat_side_to_move<'a>(iter: &mut Stream<'a>) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            iter.next();
            Ok(side)
        }

        fn eat_castling<'a>(iter: &mut Stream<'a>) -> Result<CastlingRights, FenParseError> {
            if peek(iter)? == '-' {
                iter.next();
                return Ok(CastlingRights::NONE);
            }

            let mut rights = CastlingRights::NONE;
            for _ in 0..4 {
                match peek(iter)? {
                    'K' => rights |= CastlingRights::WHITE_KINGSIDE,
                    'k' => rights |= CastlingRights::BLACK_KINGSIDE,
                    'Q' => rights |= CastlingRights::WHITE_QUEENSIDE,
                    'q' => rights |= CastlingRights::BLACK_QUEENSIDE,
                    ' ' => break,
                    _ => return Err(FenParseError::InvalidCastle),
                }

                iter.next();
            }

            Ok(rights)
        }

        fn eat_en_passant<'a>(iter: &mut Stream<'a>) -> Result<Option<Square>, FenParseError> {
            if peek(iter)? == '-' {
                iter.next();
                return Ok(None);
            }

            let mut text = String::new();
            for _ in 0..2 {
                text.push(peek(iter)?);
                iter.next();
            }

            Square::from_notation(&text)
                .map(Some)
                .ok_or(FenParseError::InvalidEnPassant)
        }

        fn eat_counter<'a>(
            iter: &mut Stream<'a>,
            empty: FenParseError,
            invalid: FenParseError,
        ) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            while let Some(&c) = iter.peek() {
                if !c.is_digit(10) {
                    break;
                }

                buf.push(c);
                iter.next();
            }

            if buf.is_empty() {
                return Err(empty);
            }

            buf.parse::<u32>().map_err(|_| invalid)
        }

        let iter = &mut fen.as_ref().chars().peekable();
        let board = eat_board(iter)?;
        eat(iter, ' ')?;
        let side = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        let rights = eat_castling(iter)?;
        eat(iter, ' ')?;
        let en_passant = eat_en_passant(iter)?;
        eat(iter, ' ')?;
        eat_counter(
            iter,
            FenParseError::EmptyHalfmove,
            FenParseError::InvalidHalfmove,
        )?;
        eat(iter, ' ')?;
        eat_counter(
            iter,
            FenParseError::EmptyFullmove,
            FenParseError::InvalidFullmove,
        )?;
        GameState::from_parts(board, side, rights, en_passant)
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for row in 0..8 {
            let mut empty_squares = 0;
            for col in 0..8 {
                if let Some(piece) = self.board.piece_at(Square::new(row, col)) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if row != 7 {
                buf.push('/');
            }
        }

        write!(&mut buf, " {} ", self.side_to_move).unwrap();
        if self.castling_rights.is_empty() {
            buf.push('-');
        }
        if self.can_castle_kingside(Color::White) {
            buf.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            buf.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            buf.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            buf.push('q');
        }
        buf.push(' ');
        if let Some(ep_square) = self.en_passant {
            write!(&mut buf, "{}", ep_square).unwrap();
        } else {
            buf.push('-');
        }
        buf.push_str(" 0 1");
        buf
    }
}

//
// Trait implementations
//

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move", self.side_to_move.name())
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new_game()
    }
}
