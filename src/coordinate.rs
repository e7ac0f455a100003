//! Chess rules - Board coordinates
//!
//! A coordinate is packed into one byte as `file_index | (rank_index << 3)`,
//! so it doubles as the index into the 64-slot position store.

use std::fmt;
use std::str::FromStr;

use crate::error::ChessError;

/// File and rank names for algebraic notation
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";
pub const RANK_NAMES: &[u8; 8] = b"12345678";

/// A single square, file 'a'-'h' and rank 1-8.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate(u8);

impl Coordinate {
    /// Build a coordinate from a file letter and a 1-based rank.
    pub fn new(file: char, rank: u8) -> Result<Self, ChessError> {
        if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return Err(ChessError::InvalidCoordinate { file, rank });
        }
        Ok(Coordinate((file as u8 - b'a') | ((rank - 1) << 3)))
    }

    /// Build a coordinate from 0-based file and rank indices.
    #[inline]
    pub const fn from_indices(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Coordinate(file | (rank << 3)))
        } else {
            None
        }
    }

    /// Build a coordinate from its packed byte.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Coordinate(index))
        } else {
            None
        }
    }

    /// Packed byte as a slot index
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file_index(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub const fn rank_index(self) -> u8 {
        self.0 >> 3
    }

    /// File letter, 'a'..='h'
    #[inline]
    pub fn file(self) -> char {
        FILE_NAMES[self.file_index() as usize] as char
    }

    /// Rank number, 1..=8
    #[inline]
    pub fn rank(self) -> u8 {
        self.rank_index() + 1
    }

    /// The square `df` files and `dr` ranks away, if it is on the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Coordinate> {
        let file = self.file_index() as i8 + df;
        let rank = self.rank_index() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Coordinate::from_indices(file as u8, rank as u8)
        } else {
            None
        }
    }

    /// Position of this square in the file-major, rank-minor scan
    /// (a1, a2, .., a8, b1, ..).
    #[inline]
    pub const fn scan_order(self) -> usize {
        (self.file_index() as usize) * 8 + self.rank_index() as usize
    }

    /// Every square in scan order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..8u8).flat_map(|file| (0..8u8).map(move |rank| Coordinate(file | (rank << 3))))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            FILE_NAMES[self.file_index() as usize] as char,
            RANK_NAMES[self.rank_index() as usize] as char
        )
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Coordinate {
    type Err = ChessError;

    /// Parse algebraic notation such as "e4".
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 || !bytes[1].is_ascii_digit() {
            return Err(ChessError::InvalidSquareName(name.to_string()));
        }
        Coordinate::new(bytes[0] as char, bytes[1] - b'0')
    }
}
