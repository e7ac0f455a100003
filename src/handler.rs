//! Chess rules - Notification boundary
//!
//! The game reports the three exceptional conditions it can meet through an
//! injected [`GameHandler`]. The same rules code then runs strict (every
//! condition becomes an error) or lenient (conditions are recorded and play
//! continues) depending on the handler the caller supplies.

use std::fmt;
use std::sync::Mutex;

use tracing::warn;

use crate::coordinate::Coordinate;
use crate::error::ChessError;
use crate::types::Colour;
use crate::validity::MoveResult;

pub trait GameHandler: fmt::Debug + Send + Sync {
    /// A caller asked to play a move that failed validation.
    fn on_invalid_move(&self, result: &MoveResult) -> Result<(), ChessError>;

    /// A side has no king on the board. Status derivation carries on and
    /// treats that side as not in check, so this cannot fail.
    fn on_no_king_found(&self, colour: Colour);

    /// A move was executed from an empty square.
    fn on_no_piece_at(&self, at: Coordinate) -> Result<(), ChessError>;
}

/// Turns invalid moves and moves from empty squares into errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictHandler;

impl GameHandler for StrictHandler {
    fn on_invalid_move(&self, result: &MoveResult) -> Result<(), ChessError> {
        Err(ChessError::InvalidMove(*result))
    }

    fn on_no_king_found(&self, colour: Colour) {
        warn!(%colour, "no king found, treating side as not in check");
    }

    fn on_no_piece_at(&self, at: Coordinate) -> Result<(), ChessError> {
        Err(ChessError::NoPieceAt(at))
    }
}

/// Something a [`RecordingHandler`] saw
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    InvalidMove(MoveResult),
    NoKingFound(Colour),
    NoPieceAt(Coordinate),
}

/// Records every event and never fails. Used by test harnesses and lenient
/// front ends.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<GameEvent>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        RecordingHandler::default()
    }

    fn record(&self, event: GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl GameHandler for RecordingHandler {
    fn on_invalid_move(&self, result: &MoveResult) -> Result<(), ChessError> {
        warn!(%result, "invalid move ignored");
        self.record(GameEvent::InvalidMove(*result));
        Ok(())
    }

    fn on_no_king_found(&self, colour: Colour) {
        self.record(GameEvent::NoKingFound(colour));
    }

    fn on_no_piece_at(&self, at: Coordinate) -> Result<(), ChessError> {
        warn!(%at, "no piece to move, move ignored");
        self.record(GameEvent::NoPieceAt(at));
        Ok(())
    }
}
