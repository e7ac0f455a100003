//! Chess rules - Search engine
//!
//! Plain fixed-depth minimax in negamax form: every node scores the
//! position from the point of view of the side to move there, and a parent
//! takes the best negated child score. Each child is a clone of the
//! controller, so the caller's game is never touched.
//!
//! Ties go to the first move in enumeration order, which makes the result
//! deterministic.

use tracing::debug;

use crate::evaluation::evaluate;
use crate::game::Game;
use crate::moves::Move;
use crate::types::Colour;

/// Below any reachable score
pub const INFINITY: i32 = 100_000_000;

/// Result of a search operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None at depth 0 or with no legal moves)
    pub best_move: Option<Move>,
    /// Score from the searching side's point of view
    pub score: i32,
    /// Number of nodes visited
    pub nodes: u64,
}

#[derive(Debug, Default)]
pub struct SearchEngine {
    pub nodes_searched: u64,
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine { nodes_searched: 0 }
    }

    /// Best move for `colour` searching `max_depth` plies.
    pub fn best_move(&mut self, game: &Game, colour: Colour, max_depth: u32) -> SearchResult {
        self.nodes_searched = 1;

        let moves = if max_depth == 0 { Vec::new() } else { game.legal_moves(colour) };
        if moves.is_empty() {
            return SearchResult {
                best_move: None,
                score: evaluate(game, colour),
                nodes: self.nodes_searched,
            };
        }

        let mut best_move = None;
        let mut best_score = -INFINITY;
        for mv in moves {
            let score = self.score_root_move(game, colour, mv, max_depth);
            debug!(%mv, score, "root move");
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }

        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes_searched,
        }
    }

    /// Score of playing `mv` at the root, from `colour`'s point of view
    pub(crate) fn score_root_move(&mut self, game: &Game, colour: Colour, mv: Move, max_depth: u32) -> i32 {
        debug_assert!(max_depth > 0, "root moves are scored at depth 1 or more");
        let mut child = game.clone();
        child.apply(mv);
        -self.negamax(&child, colour.opponent(), max_depth - 1)
    }

    fn negamax(&mut self, game: &Game, colour: Colour, depth: u32) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return evaluate(game, colour);
        }
        let moves = game.legal_moves(colour);
        if moves.is_empty() {
            return evaluate(game, colour);
        }

        let mut best_score = -INFINITY;
        for mv in moves {
            let mut child = game.clone();
            child.apply(mv);
            let score = -self.negamax(&child, colour.opponent(), depth - 1);
            if score > best_score {
                best_score = score;
            }
        }
        best_score
    }
}
