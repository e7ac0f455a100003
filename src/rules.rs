//! Chess rules - Piece legality
//!
//! A move is legal when the kind-independent checks pass and then the rule
//! for the moving piece's kind accepts its shape. The kind-independent
//! checks run in a fixed order and the first failure is reported:
//!
//! 1. source and destination differ
//! 2. the mover owns the piece
//! 3. the destination is empty or holds an opposing piece
//! 4. sliding pieces have a clear path
//! 5. after playing the move on a copy of the position, the mover's king is
//!    not attacked
//!
//! Attack detection reuses steps 1, 3, 4 and the shape rules but skips the
//! self-check simulation and castling, so it never recurses.

use crate::board::Position;
use crate::coordinate::Coordinate;
use crate::game::Game;
use crate::moves::Move;
use crate::types::*;
use crate::validity::MoveValidity;

/// Check `mv` as if `mover` were to play it.
pub fn check(game: &Game, mover: Colour, mv: Move) -> MoveValidity {
    let position = game.position();
    let piece = match position.get(mv.from) {
        Some(piece) => piece,
        None => return MoveValidity::NoPieceAtSource,
    };

    let general = check_general(game, mover, mv, piece);
    if !general.is_ok() {
        return general;
    }

    if piece.kind == Kind::King && is_castling_shape(mv) {
        check_castling(game, mv, piece.colour)
    } else {
        check_shape(position, mv, piece)
    }
}

fn check_general(game: &Game, mover: Colour, mv: Move, piece: Piece) -> MoveValidity {
    let position = game.position();

    if mv.from == mv.to {
        return MoveValidity::CannotMoveToSameCell;
    }
    if piece.colour != mover {
        return MoveValidity::CannotMoveOpponentsPiece;
    }
    if let Some(target) = position.get(mv.to) {
        if target.colour == piece.colour {
            return MoveValidity::CannotCaptureOwnPiece;
        }
    }
    if !piece.kind.is_path_exempt() && !path_is_clear(position, mv) {
        return MoveValidity::CannotJumpOverOtherPieces;
    }

    let after = game.simulate(mv);
    if is_king_attacked(&after, piece.colour) {
        return MoveValidity::CannotMoveIntoCheck;
    }

    MoveValidity::Ok
}

/// Every square strictly between `from` and `to` is empty
pub fn path_is_clear(position: &Position, mv: Move) -> bool {
    mv.squares_along_path().all(|c| !position.has_piece_at(c))
}

/// A king move of two files along its rank
#[inline]
pub fn is_castling_shape(mv: Move) -> bool {
    mv.rank_delta() == 0 && mv.file_delta().abs() == 2
}

/// Kind-specific shape rule. Castling is not handled here; a two-file king
/// move is rejected as an ordinary king move.
pub fn check_shape(position: &Position, mv: Move, piece: Piece) -> MoveValidity {
    match piece.kind {
        Kind::Pawn => check_pawn(position, mv, piece.colour),
        Kind::Knight => {
            let (df, dr) = (mv.file_delta().abs(), mv.rank_delta().abs());
            if (df == 1 && dr == 2) || (df == 2 && dr == 1) {
                MoveValidity::Ok
            } else {
                MoveValidity::KnightInvalidMove
            }
        }
        Kind::Bishop => {
            if mv.is_diagonal() {
                MoveValidity::Ok
            } else {
                MoveValidity::BishopInvalidMove
            }
        }
        Kind::Rook => {
            if mv.is_horizontal() || mv.is_vertical() {
                MoveValidity::Ok
            } else {
                MoveValidity::RookInvalidMove
            }
        }
        Kind::Queen => {
            if mv.is_diagonal() || mv.is_horizontal() || mv.is_vertical() {
                MoveValidity::Ok
            } else {
                MoveValidity::QueenInvalidMove
            }
        }
        Kind::King => {
            if mv.is_adjacent() {
                MoveValidity::Ok
            } else {
                MoveValidity::KingInvalidMove
            }
        }
    }
}

fn check_pawn(position: &Position, mv: Move, colour: Colour) -> MoveValidity {
    // Rank displacement measured in the pawn's own forward direction
    let advance = mv.rank_delta() * colour.forward();
    let sideways = mv.file_delta().abs();

    if advance < 0 {
        return MoveValidity::CannotMoveBackward;
    }
    if advance == 0 || sideways > 1 || advance > 2 {
        return MoveValidity::PawnInvalidMove;
    }

    let capturing = position.has_piece_at(mv.to);
    if sideways == 1 {
        if advance != 1 {
            return MoveValidity::PawnInvalidMove;
        }
        if !capturing {
            return MoveValidity::PawnCanOnlyCaptureDiagonally;
        }
        return MoveValidity::Ok;
    }

    if capturing {
        return MoveValidity::PawnCannotCaptureForward;
    }
    if advance == 2 && mv.from.rank_index() != colour.pawn_rank() {
        return MoveValidity::PawnInvalidMove;
    }
    MoveValidity::Ok
}

/// Square a castling rook starts on: the corner on the king's side of travel
pub fn castling_rook_square(mv: Move) -> Option<Coordinate> {
    let file = if mv.file_delta() > 0 { 7 } else { 0 };
    Coordinate::from_indices(file, mv.from.rank_index())
}

/// Square the king crosses while castling, which is also where the rook lands
pub fn castling_transit_square(mv: Move) -> Option<Coordinate> {
    mv.from.offset(mv.file_delta().signum(), 0)
}

fn check_castling(game: &Game, mv: Move, colour: Colour) -> MoveValidity {
    let position = game.position();

    let king_home = Coordinate::from_indices(4, colour.back_rank());
    if Some(mv.from) != king_home {
        return MoveValidity::CastlingKingNotInStartingPosition;
    }
    if game.square_has_moved(mv.from) {
        return MoveValidity::CastlingKingHasMoved;
    }
    if is_king_attacked(position, colour) {
        return MoveValidity::CastlingKingInCheck;
    }

    let rook = Piece::new(Kind::Rook, colour);
    let rook_square = match castling_rook_square(mv) {
        Some(c) if position.get(c) == Some(rook) => c,
        _ => return MoveValidity::CastlingRookNotInStartingPosition,
    };
    if game.square_has_moved(rook_square) {
        return MoveValidity::CastlingRookHasMoved;
    }

    let between = Move::new(mv.from, rook_square);
    if !path_is_clear(position, between) {
        return MoveValidity::CastlingSquaresOccupied;
    }

    let transit = match castling_transit_square(mv) {
        Some(c) => c,
        None => return MoveValidity::KingInvalidMove,
    };
    let mut crossing = *position;
    let king = crossing.remove(mv.from);
    crossing.set(transit, king);
    if is_king_attacked(&crossing, colour) {
        return MoveValidity::CastlingKingPassesThroughCheck;
    }

    MoveValidity::Ok
}

/// Whether the piece on `from` could move to `target` if it were its turn,
/// ignoring whether doing so would expose its own king. `target` is expected
/// to hold an opposing piece; an empty target only tells whether the piece
/// could step there.
pub fn attacks(position: &Position, from: Coordinate, target: Coordinate) -> bool {
    let piece = match position.get(from) {
        Some(piece) => piece,
        None => return false,
    };
    if from == target {
        return false;
    }
    if let Some(victim) = position.get(target) {
        if victim.colour == piece.colour {
            return false;
        }
    }
    let mv = Move::new(from, target);
    if !piece.kind.is_path_exempt() && !path_is_clear(position, mv) {
        return false;
    }
    check_shape(position, mv, piece).is_ok()
}

/// Any piece of colour `by` attacks `target`
pub fn is_square_attacked(position: &Position, target: Coordinate, by: Colour) -> bool {
    position
        .pieces()
        .any(|(from, piece)| piece.colour == by && attacks(position, from, target))
}

/// The king of `colour` stands on an attacked square. A missing king is
/// never attacked.
pub fn is_king_attacked(position: &Position, colour: Colour) -> bool {
    match position.find_king(colour) {
        Some(king) => is_square_attacked(position, king, colour.opponent()),
        None => false,
    }
}
