//! Chess rules - Type definitions and constants
//!
//! This module provides the core value types for representing chess
//! pieces and the two sides.

use std::fmt;

/// One of the two sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    /// The other side
    #[inline]
    pub fn opponent(self) -> Colour {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }

    /// Direction pawns of this colour advance in, as a rank delta
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Colour::White => 1,
            Colour::Black => -1,
        }
    }

    /// Rank index (0-based) where this colour's pawns start
    #[inline]
    pub fn pawn_rank(self) -> u8 {
        match self {
            Colour::White => 1,
            Colour::Black => 6,
        }
    }

    /// Rank index (0-based) of this colour's back rank
    #[inline]
    pub fn back_rank(self) -> u8 {
        match self {
            Colour::White => 0,
            Colour::Black => 7,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::White => write!(f, "White"),
            Colour::Black => write!(f, "Black"),
        }
    }
}

/// Piece kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Kind {
    /// Material value used by the evaluation
    #[inline]
    pub fn value(self) -> i32 {
        match self {
            Kind::Pawn => 1,
            Kind::Knight => 3,
            Kind::Bishop => 3,
            Kind::Rook => 5,
            Kind::Queen => 9,
            Kind::King => 0,
        }
    }

    /// Knights and kings never need a clear path
    #[inline]
    pub fn is_path_exempt(self) -> bool {
        matches!(self, Kind::Knight | Kind::King)
    }
}

/// A piece standing on a square. An empty square is `None` at the board level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: Kind,
    pub colour: Colour,
}

impl Piece {
    #[inline]
    pub const fn new(kind: Kind, colour: Colour) -> Self {
        Piece { kind, colour }
    }

    /// FEN piece character to piece
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let colour = if c.is_ascii_uppercase() { Colour::White } else { Colour::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => Kind::Pawn,
            'n' => Kind::Knight,
            'b' => Kind::Bishop,
            'r' => Kind::Rook,
            'q' => Kind::Queen,
            'k' => Kind::King,
            _ => return None,
        };
        Some(Piece { kind, colour })
    }

    /// Piece to FEN piece character
    pub fn fen_char(self) -> char {
        let c = match self.kind {
            Kind::Pawn => 'p',
            Kind::Knight => 'n',
            Kind::Bishop => 'b',
            Kind::Rook => 'r',
            Kind::Queen => 'q',
            Kind::King => 'k',
        };
        match self.colour {
            Colour::White => c.to_ascii_uppercase(),
            Colour::Black => c,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}
