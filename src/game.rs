//! Chess rules - Game controller
//!
//! Owns the position, the side to move and the move history. Status is
//! derived from the position on every query and never cached. Hypothetical
//! moves are always played on a copy; the live position only changes through
//! [`Game::make`] and [`Game::undo`].

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::board::Position;
use crate::coordinate::Coordinate;
use crate::error::ChessError;
use crate::handler::{GameHandler, StrictHandler};
use crate::move_generator::MoveGenerator;
use crate::moves::Move;
use crate::rules;
use crate::types::*;
use crate::validity::MoveResult;

/// Derived state of the game for one side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InPlay,
    Check,
    Checkmate,
    Stalemate,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::InPlay => "in play",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        f.write_str(s)
    }
}

/// State saved before the most recent `make`
#[derive(Clone, Debug)]
struct Snapshot {
    position: Position,
    current_player: Colour,
}

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    current_player: Colour,
    history: Vec<Move>,
    last: Option<Snapshot>,
    handler: Arc<dyn GameHandler>,
}

impl Game {
    /// A game over `position` with `current_player` to move, reporting
    /// through a [`StrictHandler`].
    pub fn new(position: Position, current_player: Colour) -> Self {
        Game::with_handler(position, current_player, Arc::new(StrictHandler))
    }

    pub fn with_handler(
        position: Position,
        current_player: Colour,
        handler: Arc<dyn GameHandler>,
    ) -> Self {
        Game {
            position,
            current_player,
            history: Vec::new(),
            last: None,
            handler,
        }
    }

    /// The standard starting position, White to move
    pub fn standard() -> Self {
        Game::new(Position::standard(), Colour::White)
    }

    /// Seed a game from the placement and side-to-move fields of a FEN
    /// string. A missing side-to-move field means White.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let position = Position::from_fen_placement(fen)?;
        let current_player = match fen.split_whitespace().nth(1) {
            None | Some("w") => Colour::White,
            Some("b") => Colour::Black,
            Some(other) => {
                return Err(ChessError::InvalidFen(format!("bad side to move {other:?}")));
            }
        };
        Ok(Game::new(position, current_player))
    }

    /// Replace the notification handler
    pub fn set_handler(&mut self, handler: Arc<dyn GameHandler>) {
        self.handler = handler;
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Mutable access for seeding. Changing pieces here is not recorded in
    /// the history.
    #[inline]
    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    #[inline]
    pub fn current_player(&self) -> Colour {
        self.current_player
    }

    pub fn set_current_player(&mut self, colour: Colour) {
        self.current_player = colour;
    }

    /// Executed moves, oldest first
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Some move of this game started on `square`. Arriving on a square does
    /// not count, so a king or rook walked onto its home square can still
    /// castle.
    pub fn square_has_moved(&self, square: Coordinate) -> bool {
        self.history.iter().any(|m| m.from == square)
    }

    // ------------------------------------------------------------------
    // Legality
    // ------------------------------------------------------------------

    /// Check a move for the side to move.
    pub fn check_move(&self, from: Coordinate, to: Coordinate) -> MoveResult {
        let mv = Move::new(from, to);
        MoveResult::new(mv, rules::check(self, self.current_player, mv))
    }

    /// Check a move as if `colour` were to play it.
    pub fn check_move_for(&self, colour: Colour, mv: Move) -> MoveResult {
        MoveResult::new(mv, rules::check(self, colour, mv))
    }

    /// Every legal move for `colour`, ordered by source then destination in
    /// file-major scan order.
    pub fn legal_moves(&self, colour: Colour) -> Vec<Move> {
        MoveGenerator::new().generate_legal_moves(self, colour)
    }

    /// Legal destinations for the piece on `from`, moved by its owner.
    pub fn legal_destinations(&self, from: Coordinate) -> Vec<Coordinate> {
        match self.position.get(from) {
            Some(piece) => MoveGenerator::new()
                .generate_legal_moves_from(self, piece.colour, from)
                .into_iter()
                .map(|m| m.to)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn has_legal_moves(&self, colour: Colour) -> bool {
        MoveGenerator::new().has_legal_move(self, colour)
    }

    // ------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------

    /// Whether `colour`'s king is attacked. A missing king is reported to the
    /// handler and counts as not in check.
    pub fn is_in_check(&self, colour: Colour) -> bool {
        if self.position.find_king(colour).is_none() {
            self.handler.on_no_king_found(colour);
            return false;
        }
        rules::is_king_attacked(&self.position, colour)
    }

    /// Whether any piece of colour `by` attacks `target`
    pub fn is_square_attacked(&self, target: Coordinate, by: Colour) -> bool {
        rules::is_square_attacked(&self.position, target, by)
    }

    pub fn status(&self, colour: Colour) -> GameStatus {
        let in_check = self.is_in_check(colour);
        let status = self.status_given(colour, in_check);
        debug!(%colour, %status, "derived status");
        status
    }

    /// Status without notifying the handler about a missing king. Used on
    /// the hot paths of search and evaluation.
    pub(crate) fn quiet_status(&self, colour: Colour) -> GameStatus {
        self.status_given(colour, rules::is_king_attacked(&self.position, colour))
    }

    fn status_given(&self, colour: Colour, in_check: bool) -> GameStatus {
        match (in_check, self.has_legal_moves(colour)) {
            (true, false) => GameStatus::Checkmate,
            (true, true) => GameStatus::Check,
            (false, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::InPlay,
        }
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Execute `mv` without validating it. Moving from an empty square is
    /// reported to the handler and leaves the game untouched.
    pub fn make(&mut self, mv: Move) -> Result<(), ChessError> {
        if !self.position.has_piece_at(mv.from) {
            return self.handler.on_no_piece_at(mv.from);
        }
        self.last = Some(Snapshot {
            position: self.position,
            current_player: self.current_player,
        });
        self.apply(mv);
        Ok(())
    }

    /// Validate `mv` for the side to move, then execute it if legal. An
    /// illegal move goes to the handler and is not played.
    pub fn try_make(&mut self, mv: Move) -> Result<MoveResult, ChessError> {
        let result = self.check_move(mv.from, mv.to);
        if !result.is_ok() {
            self.handler.on_invalid_move(&result)?;
            return Ok(result);
        }
        self.make(mv)?;
        Ok(result)
    }

    /// Restore the state from before the most recent `make`. Only one step
    /// is kept.
    pub fn undo(&mut self) -> Result<(), ChessError> {
        let snapshot = self.last.take().ok_or(ChessError::NothingToUndo)?;
        self.position = snapshot.position;
        self.current_player = snapshot.current_player;
        self.history.pop();
        Ok(())
    }

    /// Play a move known to start on an occupied square: update the
    /// position, append to history and pass the turn.
    pub(crate) fn apply(&mut self, mv: Move) {
        trace!(%mv, "apply");
        apply_to_position(&mut self.position, mv);
        self.history.push(mv);
        self.current_player = self.current_player.opponent();
    }

    /// The position that playing `mv` would produce
    pub fn simulate(&self, mv: Move) -> Position {
        let mut after = self.position;
        apply_to_position(&mut after, mv);
        after
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::standard()
    }
}

/// Move effects on the board alone: promotion to queen on the last rank and
/// the rook's hop when the king castles.
fn apply_to_position(position: &mut Position, mv: Move) {
    let piece = match position.remove(mv.from) {
        Some(piece) => piece,
        None => return,
    };

    let landing = match piece.kind {
        Kind::Pawn if mv.to.rank_index() == 0 || mv.to.rank_index() == 7 => {
            Piece::new(Kind::Queen, piece.colour)
        }
        _ => piece,
    };

    if piece.kind == Kind::King && rules::is_castling_shape(mv) {
        let rook = Piece::new(Kind::Rook, piece.colour);
        if let (Some(corner), Some(transit)) =
            (rules::castling_rook_square(mv), rules::castling_transit_square(mv))
        {
            if position.get(corner) == Some(rook) {
                position.set(corner, None);
                position.place(transit, rook);
            }
        }
    }

    position.place(mv.to, landing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{GameEvent, RecordingHandler};
    use crate::validity::MoveValidity;

    fn sq(name: &str) -> Coordinate {
        name.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn make_moves_piece_and_passes_turn() {
        let mut game = Game::standard();
        game.make(mv("e2e4")).unwrap();
        assert_eq!(game.position().get(sq("e2")), None);
        assert_eq!(game.position().get(sq("e4")), Some(Piece::new(Kind::Pawn, Colour::White)));
        assert_eq!(game.current_player(), Colour::Black);
        assert_eq!(game.history(), &[mv("e2e4")]);
    }

    #[test]
    fn capture_overwrites_target() {
        let mut game = Game::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w").unwrap();
        game.make(mv("e4d5")).unwrap();
        assert_eq!(game.position().get(sq("d5")), Some(Piece::new(Kind::Pawn, Colour::White)));
        assert_eq!(game.position().pieces().count(), 3);
    }

    #[test]
    fn pawns_promote_to_queens() {
        for file in 'a'..='h' {
            let from = Coordinate::new(file, 7).unwrap();
            let to = Coordinate::new(file, 8).unwrap();
            let mut position = Position::empty();
            position.place(from, Piece::new(Kind::Pawn, Colour::White));
            let mut game = Game::new(position, Colour::White);
            game.make(Move::new(from, to)).unwrap();
            assert_eq!(game.position().get(to), Some(Piece::new(Kind::Queen, Colour::White)));
            assert_eq!(game.position().get(from), None);
        }

        let mut game = Game::from_fen("4k3/8/8/8/8/8/p7/4K3 b").unwrap();
        game.make(mv("a2a1")).unwrap();
        assert_eq!(game.position().get(sq("a1")), Some(Piece::new(Kind::Queen, Colour::Black)));
    }

    #[test]
    fn castling_moves_the_rook() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w").unwrap();
        assert!(game.try_make(mv("e1g1")).unwrap().is_ok());
        assert_eq!(game.position().get(sq("g1")), Some(Piece::new(Kind::King, Colour::White)));
        assert_eq!(game.position().get(sq("f1")), Some(Piece::new(Kind::Rook, Colour::White)));
        assert_eq!(game.position().get(sq("h1")), None);

        assert!(game.try_make(mv("e8c8")).unwrap().is_ok());
        assert_eq!(game.position().get(sq("c8")), Some(Piece::new(Kind::King, Colour::Black)));
        assert_eq!(game.position().get(sq("d8")), Some(Piece::new(Kind::Rook, Colour::Black)));
        assert_eq!(game.position().get(sq("a8")), None);
    }

    #[test]
    fn strict_make_from_empty_square_fails() {
        let mut game = Game::standard();
        let err = game.make(mv("e4e5")).unwrap_err();
        assert!(matches!(err, ChessError::NoPieceAt(c) if c == sq("e4")));
        assert!(game.history().is_empty());
        assert_eq!(game.current_player(), Colour::White);
    }

    #[test]
    fn recording_handler_collects_instead_of_failing() {
        let handler = Arc::new(RecordingHandler::new());
        let mut game = Game::with_handler(Position::standard(), Colour::White, handler.clone());

        game.make(mv("e4e5")).unwrap();
        let result = game.try_make(mv("e2e5")).unwrap();
        assert_eq!(result.validity, MoveValidity::PawnInvalidMove);
        assert!(game.history().is_empty());

        assert_eq!(
            handler.events(),
            vec![
                GameEvent::NoPieceAt(sq("e4")),
                GameEvent::InvalidMove(MoveResult::new(mv("e2e5"), MoveValidity::PawnInvalidMove)),
            ]
        );
    }

    #[test]
    fn strict_try_make_rejects_illegal_move() {
        let mut game = Game::standard();
        let err = game.try_make(mv("e7e5")).unwrap_err();
        assert!(matches!(
            err,
            ChessError::InvalidMove(r) if r.validity == MoveValidity::CannotMoveOpponentsPiece
        ));
        assert_eq!(game.position(), &Position::standard());
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let handler = Arc::new(RecordingHandler::new());
        let position = Position::from_fen_placement("8/8/8/8/8/8/8/K6r").unwrap();
        let game = Game::with_handler(position, Colour::Black, handler.clone());
        assert!(!game.is_in_check(Colour::Black));
        assert!(game.is_in_check(Colour::White));
        assert_eq!(handler.events(), vec![GameEvent::NoKingFound(Colour::Black)]);
    }

    #[test]
    fn undo_restores_previous_state_once() {
        let mut game = Game::standard();
        game.make(mv("g1f3")).unwrap();
        game.undo().unwrap();
        assert_eq!(game.position(), &Position::standard());
        assert_eq!(game.current_player(), Colour::White);
        assert!(game.history().is_empty());
        assert!(matches!(game.undo(), Err(ChessError::NothingToUndo)));
    }

    #[test]
    fn status_derivation() {
        let mate = Game::from_fen("k7/1Q6/2K5/8/8/8/8/8 b").unwrap();
        assert_eq!(mate.status(Colour::Black), GameStatus::Checkmate);

        let stalemate = Game::from_fen("k7/8/1Q6/8/8/8/8/K7 b").unwrap();
        assert!(!stalemate.is_in_check(Colour::Black));
        assert_eq!(stalemate.status(Colour::Black), GameStatus::Stalemate);

        let check = Game::from_fen("k7/8/8/8/8/8/8/K6q w").unwrap();
        assert_eq!(check.status(Colour::White), GameStatus::Check);

        assert_eq!(Game::standard().status(Colour::White), GameStatus::InPlay);
        assert_eq!(Game::standard().status(Colour::Black), GameStatus::InPlay);
    }

    #[test]
    fn simulate_leaves_live_position_alone() {
        let game = Game::standard();
        let after = game.simulate(mv("e2e4"));
        assert_eq!(after.get(sq("e4")), Some(Piece::new(Kind::Pawn, Colour::White)));
        assert_eq!(game.position(), &Position::standard());
    }
}
