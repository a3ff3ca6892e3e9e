// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Check and pin detection. Everything here answers the question "if a king of this color stood
//! on this square, who would be attacking it, and which of its own pieces would be pinned?".
//! The square does not have to hold the king, which lets castling ask the same question about
//! the squares the king passes through.
use arrayvec::ArrayVec;
use hashbrown::HashMap;

use crate::board::Board;
use crate::types::{Color, Direction, Piece, PieceKind, Square, DIRECTIONS};

type Neighbors = ArrayVec<[Square; 8]>;

static KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
];

/// For every square, the squares a single jump of a fixed offset set can reach.
struct NeighborTable {
    table: Vec<Neighbors>,
}

impl NeighborTable {
    fn new<I>(offsets: I) -> NeighborTable
    where
        I: Iterator<Item = (i32, i32)> + Clone,
    {
        let table = Square::all()
            .map(|sq| {
                offsets
                    .clone()
                    .filter_map(|(rows, cols)| sq.offset(rows, cols))
                    .collect()
            })
            .collect();
        NeighborTable { table }
    }

    fn targets(&self, sq: Square) -> &[Square] {
        &self.table[sq.index()]
    }
}

lazy_static! {
    static ref KNIGHT_TABLE: NeighborTable = NeighborTable::new(KNIGHT_OFFSETS.iter().cloned());
    static ref KING_TABLE: NeighborTable =
        NeighborTable::new(DIRECTIONS.iter().map(|dir| dir.as_vector()));
}

pub fn knight_targets(sq: Square) -> &'static [Square] {
    KNIGHT_TABLE.targets(sq)
}

pub fn king_targets(sq: Square) -> &'static [Square] {
    KING_TABLE.targets(sq)
}

/// A piece giving check to the scanned square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Check {
    /// A piece on a rank, file or diagonal of the king, `distance` steps away along `direction`.
    Line {
        attacker: Square,
        direction: Direction,
        distance: usize,
    },
    /// A knight a jump away.
    Knight { attacker: Square },
}

impl Check {
    pub fn attacker(&self) -> Square {
        match *self {
            Check::Line { attacker, .. } => attacker,
            Check::Knight { attacker } => attacker,
        }
    }

    /// Squares a non-king move may land on to answer this check: the checker's own square and,
    /// for a line check, every square between it and the king.
    pub fn interdiction_squares(&self, king: Square) -> ArrayVec<[Square; 7]> {
        let mut squares = ArrayVec::new();
        match *self {
            Check::Line {
                direction,
                distance,
                ..
            } => {
                let mut cursor = king;
                for _ in 0..distance {
                    cursor = cursor
                        .towards(direction)
                        .expect("check line runs off the board");
                    squares.push(cursor);
                }
            }
            Check::Knight { attacker } => squares.push(attacker),
        }

        squares
    }
}

/// Result of scanning a square for attacks. Recomputed for every query and never stored.
#[derive(Clone, Debug, Default)]
pub struct AttackScan {
    pins: HashMap<Square, Direction>,
    checks: ArrayVec<[Check; 16]>,
}

impl AttackScan {
    pub fn in_check(&self) -> bool {
        !self.checks.is_empty()
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// If the piece on `sq` is pinned, the direction from the king towards it. The piece may only
    /// move along this line, in either direction.
    pub fn pin_direction(&self, sq: Square) -> Option<Direction> {
        self.pins.get(&sq).cloned()
    }

    pub fn pins(&self) -> impl Iterator<Item = (Square, Direction)> + '_ {
        self.pins.iter().map(|(&sq, &dir)| (sq, dir))
    }
}

/// Scans outward from `origin` as though a `color` king stood there.
///
/// Along each of the eight rays, the first friendly piece (kings excluded) is remembered as a
/// pin candidate. The first enemy piece ends the ray: if it attacks along that ray it gives
/// check when nothing stood in between, or pins the candidate when exactly one friendly piece
/// did. Knights are probed separately and can only give check.
pub fn scan_attacks(board: &Board, origin: Square, color: Color) -> AttackScan {
    let mut scan = AttackScan::default();
    for &direction in DIRECTIONS.iter() {
        let mut candidate = None;
        let mut cursor = origin;
        let mut distance = 0;
        while let Some(sq) = cursor.towards(direction) {
            cursor = sq;
            distance += 1;
            let piece = match board.piece_at(sq) {
                Some(piece) => piece,
                None => continue,
            };

            if piece.color == color {
                if piece.kind == PieceKind::King {
                    continue;
                }

                if candidate.is_some() {
                    break;
                }

                candidate = Some(sq);
                continue;
            }

            if attacks_along(piece, direction, distance) {
                match candidate {
                    None => scan.checks.push(Check::Line {
                        attacker: sq,
                        direction,
                        distance,
                    }),
                    Some(pinned) => {
                        scan.pins.insert(pinned, direction);
                    }
                }
            }

            break;
        }
    }

    for &(rows, cols) in KNIGHT_OFFSETS.iter() {
        if let Some(sq) = origin.offset(rows, cols) {
            if board.piece_at(sq) == Some(Piece::new(PieceKind::Knight, color.toggle())) {
                scan.checks.push(Check::Knight { attacker: sq });
            }
        }
    }

    scan
}

/// Whether `piece`, found `distance` steps from the origin in `direction`, attacks the origin.
fn attacks_along(piece: Piece, direction: Direction, distance: usize) -> bool {
    match piece.kind {
        PieceKind::Rook => !direction.is_diagonal(),
        PieceKind::Bishop => direction.is_diagonal(),
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        // Pawns capture diagonally forward, so the origin must lie one row ahead of the pawn.
        // Looking from the origin, that puts the pawn one row "behind" in its own terms.
        PieceKind::Pawn => {
            let (rows, _) = direction.as_vector();
            distance == 1 && direction.is_diagonal() && rows == -piece.color.pawn_direction()
        }
        PieceKind::Knight => false,
    }
}
