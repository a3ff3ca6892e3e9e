// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// A square on the board, addressed by row and column. Row 0 is Black's back rank and row 7 is
/// White's back rank; column 0 is the "a" file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: usize, col: usize) -> Square {
        assert!(row < 8 && col < 8, "square ({}, {}) is off the board", row, col);
        Square {
            row: row as u8,
            col: col as u8,
        }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Position of this square in a row-major table of 64 entries.
    pub fn index(self) -> usize {
        self.row() * 8 + self.col()
    }

    /// Steps `(rows, cols)` away from this square, or `None` if that leaves the board.
    pub fn offset(self, rows: i32, cols: i32) -> Option<Square> {
        let row = self.row as i32 + rows;
        let col = self.col as i32 + cols;
        if row < 0 || row > 7 || col < 0 || col > 7 {
            return None;
        }

        Some(Square::new(row as usize, col as usize))
    }

    pub fn towards(self, dir: Direction) -> Option<Square> {
        let (rows, cols) = dir.as_vector();
        self.offset(rows, cols)
    }

    /// Iterates all 64 squares, row by row, starting at a8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(|idx| Square::new(idx / 8, idx % 8))
    }

    /// Parses a square written as file letter and rank digit, e.g. "e4".
    pub fn from_notation(text: &str) -> Option<Square> {
        let mut chars = text.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        let col = match file {
            'a'..='h' => file as usize - 'a' as usize,
            _ => return None,
        };
        let row = match rank {
            '1'..='8' => 7 - (rank as usize - '1' as usize),
            _ => return None,
        };
        Some(Square::new(row, col))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.col) as char)?;
        f.write_char((b'8' - self.row) as char)
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    /// Row delta of a single pawn push for this color.
    pub fn pawn_direction(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn promotion_row(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn back_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::White => 'w',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for PieceKind {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let res = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };
        Ok(res)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }
}

/// Pieces are written in FEN style: uppercase for White, lowercase for Black.
impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = PieceKind::try_from(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        match self.color {
            Color::White => f.write_char(chr.to_ascii_uppercase()),
            Color::Black => f.write_char(chr),
        }
    }
}

/// The eight rays leaving a square. North points at Black's back rank (row 0).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// `(row delta, column delta)` of one step in this direction.
    pub fn as_vector(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn from_vector(rows: i32, cols: i32) -> Option<Direction> {
        DIRECTIONS
            .iter()
            .cloned()
            .find(|dir| dir.as_vector() == (rows, cols))
    }

    /// The direction of the straight line running from `from` to `to`, if the two squares share
    /// a rank, file or diagonal.
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        let rows = to.row() as i32 - from.row() as i32;
        let cols = to.col() as i32 - from.col() as i32;
        if rows == 0 && cols == 0 {
            return None;
        }

        if rows != 0 && cols != 0 && rows.abs() != cols.abs() {
            return None;
        }

        Direction::from_vector(rows.signum(), cols.signum())
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    pub fn is_diagonal(self) -> bool {
        let (rows, cols) = self.as_vector();
        rows != 0 && cols != 0
    }
}

pub static DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

pub static ORTHOGONAL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

pub static DIAGONAL_DIRECTIONS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

bitflags! {
    pub struct CastlingRights: u8 {
        const NONE = 0;
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE = 0b0000_0010;
        const WHITE = Self::WHITE_KINGSIDE.bits | Self::WHITE_QUEENSIDE.bits;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
        const BLACK = Self::BLACK_KINGSIDE.bits | Self::BLACK_QUEENSIDE.bits;
    }
}

impl CastlingRights {
    pub fn kingside(color: Color) -> CastlingRights {
        match color {
            Color::White => CastlingRights::WHITE_KINGSIDE,
            Color::Black => CastlingRights::BLACK_KINGSIDE,
        }
    }

    pub fn queenside(color: Color) -> CastlingRights {
        match color {
            Color::White => CastlingRights::WHITE_QUEENSIDE,
            Color::Black => CastlingRights::BLACK_QUEENSIDE,
        }
    }

    pub fn both(color: Color) -> CastlingRights {
        match color {
            Color::White => CastlingRights::WHITE,
            Color::Black => CastlingRights::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::{Color, Direction, Piece, PieceKind, Square};

    #[test]
    fn square_notation() {
        assert_eq!("a1", Square::new(7, 0).to_string());
        assert_eq!("h8", Square::new(0, 7).to_string());
        assert_eq!("e4", Square::new(4, 4).to_string());
    }

    #[test]
    fn square_from_notation() {
        assert_eq!(Some(Square::new(7, 0)), Square::from_notation("a1"));
        assert_eq!(Some(Square::new(1, 3)), Square::from_notation("d7"));
        assert_eq!(None, Square::from_notation("i1"));
        assert_eq!(None, Square::from_notation("a9"));
        assert_eq!(None, Square::from_notation("a10"));
        assert_eq!(None, Square::from_notation(""));
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Square::new(0, 0);
        assert_eq!(None, corner.offset(-1, 0));
        assert_eq!(None, corner.towards(Direction::West));
        assert_eq!(Some(Square::new(1, 1)), corner.towards(Direction::SouthEast));
    }

    #[test]
    fn direction_between_squares() {
        let e1 = Square::new(7, 4);
        assert_eq!(
            Some(Direction::North),
            Direction::between(e1, Square::new(0, 4))
        );
        assert_eq!(
            Some(Direction::NorthWest),
            Direction::between(e1, Square::new(4, 1))
        );
        assert_eq!(None, Direction::between(e1, Square::new(5, 5)));
        assert_eq!(None, Direction::between(e1, e1));
    }

    #[test]
    fn reverse_is_opposite_vector() {
        for &dir in super::DIRECTIONS.iter() {
            let (rows, cols) = dir.as_vector();
            assert_eq!((-rows, -cols), dir.reverse().as_vector());
        }
    }

    #[test]
    fn piece_chars() {
        let queen = Piece::try_from('Q').unwrap();
        assert_eq!(Piece::new(PieceKind::Queen, Color::White), queen);
        assert_eq!("Q", queen.to_string());

        let knight = Piece::try_from('n').unwrap();
        assert_eq!(Piece::new(PieceKind::Knight, Color::Black), knight);
        assert_eq!("n", knight.to_string());

        assert!(Piece::try_from('x').is_err());
    }
}
