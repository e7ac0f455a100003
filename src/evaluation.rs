//! Chess rules - Position evaluation
//!
//! A position is scored for one side as its material balance plus a bonus
//! for the game status: a large swing for checkmate and a small reward for
//! giving check.

use crate::board::Position;
use crate::game::{Game, GameStatus};
use crate::rules;
use crate::types::*;

/// Bonus for checkmating the opponent (and penalty for being checkmated)
pub const MATE_SCORE: i32 = 1_000_000;

/// Bonus for having the opponent in check
pub const CHECK_BONUS: i32 = 10;

/// Material of `colour` minus material of its opponent
pub fn material_balance(position: &Position, colour: Colour) -> i32 {
    position
        .pieces()
        .map(|(_, piece)| {
            let value = piece.kind.value();
            if piece.colour == colour { value } else { -value }
        })
        .sum()
}

/// Status bonus from `colour`'s point of view
pub fn status_bonus(game: &Game, colour: Colour) -> i32 {
    let opponent = colour.opponent();
    let mut bonus = 0;

    // Mate needs check first, so the legal-move scan only runs when a king
    // is actually attacked.
    if rules::is_king_attacked(game.position(), opponent) {
        bonus += match game.quiet_status(opponent) {
            GameStatus::Checkmate => MATE_SCORE,
            _ => CHECK_BONUS,
        };
    }
    if rules::is_king_attacked(game.position(), colour)
        && game.quiet_status(colour) == GameStatus::Checkmate
    {
        bonus -= MATE_SCORE;
    }

    bonus
}

/// Static evaluation of the game from `colour`'s point of view
pub fn evaluate(game: &Game, colour: Colour) -> i32 {
    material_balance(game.position(), colour) + status_bonus(game, colour)
}
