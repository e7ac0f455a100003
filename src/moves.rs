//! Chess rules - Moves and move geometry

use std::fmt;
use std::str::FromStr;

use crate::coordinate::Coordinate;
use crate::error::ChessError;

/// A move from one square to another. Promotion and castling are not stored;
/// they follow from the piece being moved and the squares involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coordinate,
    pub to: Coordinate,
}

impl Move {
    #[inline]
    pub const fn new(from: Coordinate, to: Coordinate) -> Self {
        Move { from, to }
    }

    /// Signed file displacement
    #[inline]
    pub fn file_delta(&self) -> i8 {
        self.to.file_index() as i8 - self.from.file_index() as i8
    }

    /// Signed rank displacement
    #[inline]
    pub fn rank_delta(&self) -> i8 {
        self.to.rank_index() as i8 - self.from.rank_index() as i8
    }

    pub fn is_diagonal(&self) -> bool {
        let (df, dr) = (self.file_delta(), self.rank_delta());
        df != 0 && df.abs() == dr.abs()
    }

    pub fn is_horizontal(&self) -> bool {
        self.rank_delta() == 0 && self.file_delta() != 0
    }

    pub fn is_vertical(&self) -> bool {
        self.file_delta() == 0 && self.rank_delta() != 0
    }

    /// Chebyshev distance of one
    pub fn is_adjacent(&self) -> bool {
        self.file_delta().abs().max(self.rank_delta().abs()) == 1
    }

    /// Squares strictly between `from` and `to` for straight and diagonal
    /// moves. Empty for any other shape.
    pub fn squares_along_path(&self) -> impl Iterator<Item = Coordinate> {
        let (df, dr) = (self.file_delta(), self.rank_delta());
        let aligned = self.is_diagonal() || self.is_horizontal() || self.is_vertical();
        let steps = if aligned { df.abs().max(dr.abs()) } else { 0 };
        let (step_f, step_r) = (df.signum(), dr.signum());
        let from = self.from;
        (1..steps).filter_map(move |i| from.offset(step_f * i, step_r * i))
    }

    /// Long algebraic notation (e.g., "e2e4")
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ChessError;

    /// Parse long algebraic notation such as "e2e4"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(ChessError::InvalidSquareName(s.to_string()));
        }
        Ok(Move::new(s[0..2].parse()?, s[2..4].parse()?))
    }
}
