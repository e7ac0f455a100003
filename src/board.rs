//! Chess rules - Position store
//!
//! A fixed 64-slot mapping from [`Coordinate`] to an optional [`Piece`].
//! The store only holds pieces; turn, history and rules live in
//! [`Game`](crate::game::Game). It is a plain array so that cloning it for
//! hypothetical moves is a single copy.

use std::fmt;

use crate::coordinate::Coordinate;
use crate::error::ChessError;
use crate::types::*;

/// Piece placement of the starting position
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [Kind; 8] = [
    Kind::Rook,
    Kind::Knight,
    Kind::Bishop,
    Kind::Queen,
    Kind::King,
    Kind::Bishop,
    Kind::Knight,
    Kind::Rook,
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    /// Indexed by coordinate byte (0=a1, 1=b1, ..., 63=h8)
    squares: [Option<Piece>; 64],
}

impl Position {
    /// An empty board
    pub const fn empty() -> Self {
        Position { squares: [None; 64] }
    }

    /// The standard starting layout
    pub fn standard() -> Self {
        let mut position = Position::empty();
        position.set_standard_layout();
        position
    }

    /// Parse the piece-placement field of a FEN string. Anything after the
    /// first space is ignored.
    pub fn from_fen_placement(fen: &str) -> Result<Self, ChessError> {
        let placement = fen.split_whitespace().next().unwrap_or("");
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(ChessError::InvalidFen(format!(
                "expected 8 ranks, found {} in {:?}",
                rows.len(),
                placement
            )));
        }

        let mut position = Position::empty();
        // FEN lists rank 8 first
        for (row_idx, row) in rows.iter().enumerate() {
            let rank = 7 - row_idx as u8;
            let mut file = 0u8;
            for c in row.chars() {
                if let Some(d) = c.to_digit(10) {
                    if d == 0 || d > 8 {
                        return Err(ChessError::InvalidFen(format!("bad empty-run digit {c:?}")));
                    }
                    file += d as u8;
                } else {
                    let piece = Piece::from_fen_char(c)
                        .ok_or_else(|| ChessError::InvalidFen(format!("bad piece character {c:?}")))?;
                    let coordinate = Coordinate::from_indices(file, rank).ok_or_else(|| {
                        ChessError::InvalidFen(format!("too many files on rank {}", rank + 1))
                    })?;
                    position.set(coordinate, Some(piece));
                    file += 1;
                }
                if file > 8 {
                    return Err(ChessError::InvalidFen(format!("too many files on rank {}", rank + 1)));
                }
            }
            if file != 8 {
                return Err(ChessError::InvalidFen(format!("not enough files on rank {}", rank + 1)));
            }
        }
        Ok(position)
    }

    /// Piece at a square, `None` if empty
    #[inline]
    pub fn get(&self, at: Coordinate) -> Option<Piece> {
        self.squares[at.index()]
    }

    /// Overwrite a square; `None` clears it.
    #[inline]
    pub fn set(&mut self, at: Coordinate, piece: Option<Piece>) {
        self.squares[at.index()] = piece;
    }

    #[inline]
    pub fn place(&mut self, at: Coordinate, piece: Piece) {
        self.set(at, Some(piece));
    }

    #[inline]
    pub fn remove(&mut self, at: Coordinate) -> Option<Piece> {
        self.squares[at.index()].take()
    }

    #[inline]
    pub fn has_piece_at(&self, at: Coordinate) -> bool {
        self.squares[at.index()].is_some()
    }

    /// Empty every square
    pub fn clear(&mut self) {
        self.squares = [None; 64];
    }

    /// Clear the board and put the pieces on their starting squares
    pub fn set_standard_layout(&mut self) {
        self.clear();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            for colour in [Colour::White, Colour::Black] {
                if let Some(c) = Coordinate::from_indices(file, colour.back_rank()) {
                    self.place(c, Piece::new(kind, colour));
                }
                if let Some(c) = Coordinate::from_indices(file, colour.pawn_rank()) {
                    self.place(c, Piece::new(Kind::Pawn, colour));
                }
            }
        }
    }

    /// First square in scan order whose slot satisfies `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<Coordinate>
    where
        F: FnMut(Option<Piece>) -> bool,
    {
        Coordinate::all().find(|&c| predicate(self.get(c)))
    }

    /// Find the king's square for the specified colour
    pub fn find_king(&self, colour: Colour) -> Option<Coordinate> {
        let king = Piece::new(Kind::King, colour);
        self.find(|slot| slot == Some(king))
    }

    /// Occupied squares in scan order
    pub fn pieces(&self) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        Coordinate::all().filter_map(move |c| self.get(c).map(|p| (c, p)))
    }

    /// Piece-placement field of a FEN string
    pub fn to_fen_placement(&self) -> String {
        let mut fen = String::with_capacity(72);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let slot = Coordinate::from_indices(file, rank).and_then(|c| self.get(c));
                match slot {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = match Coordinate::from_indices(file, rank).and_then(|c| self.get(c)) {
                    Some(piece) => piece.fen_char(),
                    None => '.',
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::empty()
    }
}
