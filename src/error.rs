//! Chess rules - Error types

use thiserror::Error;

use crate::coordinate::Coordinate;
use crate::types::Colour;
use crate::validity::MoveResult;

/// Errors raised by construction, seeding and the strict handler.
///
/// Illegal moves found while exploring are not errors: `check_move` reports
/// them as a [`MoveResult`]. Only a caller-supplied move that fails validation
/// through a strict handler becomes [`ChessError::InvalidMove`].
#[derive(Debug, Error)]
pub enum ChessError {
    #[error("invalid coordinate: file {file:?}, rank {rank}")]
    InvalidCoordinate { file: char, rank: u8 },

    #[error("invalid square name: {0:?}")]
    InvalidSquareName(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("no piece at {0}")]
    NoPieceAt(Coordinate),

    #[error("invalid move {0}")]
    InvalidMove(MoveResult),

    #[error("no {0} king on the board")]
    NoKingFound(Colour),

    #[error("no move to undo")]
    NothingToUndo,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
