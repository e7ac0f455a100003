//! Chess rules - Move legality outcomes

use std::fmt;

use crate::moves::Move;

/// Outcome of a legality check. `Ok` is the only legal value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveValidity {
    Ok,

    // Kind-independent
    NoPieceAtSource,
    CannotMoveToSameCell,
    CannotMoveOpponentsPiece,
    CannotCaptureOwnPiece,
    CannotJumpOverOtherPieces,
    CannotMoveIntoCheck,

    // Pawn
    CannotMoveBackward,
    PawnCanOnlyCaptureDiagonally,
    PawnCannotCaptureForward,
    PawnInvalidMove,

    // Other kinds
    KnightInvalidMove,
    BishopInvalidMove,
    RookInvalidMove,
    QueenInvalidMove,
    KingInvalidMove,

    // Castling
    CastlingKingNotInStartingPosition,
    CastlingKingHasMoved,
    CastlingKingInCheck,
    CastlingRookNotInStartingPosition,
    CastlingRookHasMoved,
    CastlingSquaresOccupied,
    CastlingKingPassesThroughCheck,
}

impl MoveValidity {
    #[inline]
    pub fn is_ok(self) -> bool {
        self == MoveValidity::Ok
    }

    pub fn message(self) -> &'static str {
        use MoveValidity::*;
        match self {
            Ok => "Move is legal",
            NoPieceAtSource => "There is no piece on the starting square",
            CannotMoveToSameCell => "A piece cannot move to the square it is on",
            CannotMoveOpponentsPiece => "You cannot move your opponent's piece",
            CannotCaptureOwnPiece => "You cannot capture your own piece",
            CannotJumpOverOtherPieces => "This piece cannot jump over other pieces",
            CannotMoveIntoCheck => "This move would leave your king in check",
            CannotMoveBackward => "A pawn cannot move backward",
            PawnCanOnlyCaptureDiagonally => "A pawn can only move diagonally when capturing",
            PawnCannotCaptureForward => "A pawn cannot capture straight ahead",
            PawnInvalidMove => "A pawn moves one square forward, or two from its starting rank",
            KnightInvalidMove => "A knight moves in an L shape",
            BishopInvalidMove => "A bishop moves diagonally",
            RookInvalidMove => "A rook moves horizontally or vertically",
            QueenInvalidMove => "A queen moves diagonally, horizontally or vertically",
            KingInvalidMove => "A king moves one square in any direction",
            CastlingKingNotInStartingPosition => "Castling requires the king on its starting square",
            CastlingKingHasMoved => "Castling is not allowed after the king has moved",
            CastlingKingInCheck => "Castling is not allowed while in check",
            CastlingRookNotInStartingPosition => "Castling requires the rook on its starting square",
            CastlingRookHasMoved => "Castling is not allowed after the rook has moved",
            CastlingSquaresOccupied => "Castling requires the squares between king and rook to be empty",
            CastlingKingPassesThroughCheck => "The king cannot castle through an attacked square",
        }
    }
}

impl fmt::Display for MoveValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A move paired with its legality outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveResult {
    pub mv: Move,
    pub validity: MoveValidity,
}

impl MoveResult {
    #[inline]
    pub fn new(mv: Move, validity: MoveValidity) -> Self {
        MoveResult { mv, validity }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.validity.is_ok()
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.mv, self.validity)
    }
}
