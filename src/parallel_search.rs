//! Chess rules - Parallel search
//!
//! Splits the root moves across worker threads. Each worker owns a clone of
//! the game and scores its share of root moves with the sequential
//! [`SearchEngine`]; nothing mutable is shared between workers. Scores are
//! merged in root-move order with the same strict comparison the sequential
//! search uses, so the chosen move is identical for any thread count.

use std::thread;

use tracing::debug;

use crate::evaluation::evaluate;
use crate::game::Game;
use crate::moves::Move;
use crate::search::{SearchEngine, SearchResult, INFINITY};
use crate::types::Colour;

/// Parallel search engine splitting work at the root
#[derive(Debug, Clone)]
pub struct ParallelSearchEngine {
    pub num_threads: usize,
    pub nodes_searched: u64,
}

impl ParallelSearchEngine {
    /// `num_threads == 0` means one worker per logical CPU.
    pub fn new(num_threads: usize) -> Self {
        let mut engine = ParallelSearchEngine {
            num_threads: 1,
            nodes_searched: 0,
        };
        engine.set_threads(num_threads);
        engine
    }

    pub fn set_threads(&mut self, threads: usize) {
        self.num_threads = if threads == 0 { num_cpus::get() } else { threads }.max(1);
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

        let workers = self.num_threads.min(moves.len());
        let mut scores: Vec<Option<i32>> = vec![None; moves.len()];

        if workers <= 1 {
            let mut engine = SearchEngine::new();
            for (i, &mv) in moves.iter().enumerate() {
                scores[i] = Some(engine.score_root_move(game, colour, mv, max_depth));
            }
            self.nodes_searched += engine.nodes_searched;
        } else {
            // Round-robin so that each worker gets moves from every piece
            let handles: Vec<_> = (0..workers)
                .map(|worker_id| {
                    let game = game.clone();
                    let share: Vec<(usize, Move)> = moves
                        .iter()
                        .copied()
                        .enumerate()
                        .filter(|(i, _)| i % workers == worker_id)
                        .collect();

                    thread::spawn(move || {
                        let mut engine = SearchEngine::new();
                        let scored: Vec<(usize, i32)> = share
                            .into_iter()
                            .map(|(i, mv)| (i, engine.score_root_move(&game, colour, mv, max_depth)))
                            .collect();
                        (scored, engine.nodes_searched)
                    })
                })
                .collect();

            for handle in handles {
                let (scored, nodes) = match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                };
                self.nodes_searched += nodes;
                for (i, score) in scored {
                    scores[i] = Some(score);
                }
            }
        }

        let mut best_move = None;
        let mut best_score = -INFINITY;
        for (&mv, score) in moves.iter().zip(scores) {
            let score = score.unwrap_or(-INFINITY);
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }
        debug!(
            best = ?best_move,
            score = best_score,
            nodes = self.nodes_searched,
            threads = workers,
            "parallel search finished"
        );

        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes_searched,
        }
    }
}

impl Default for ParallelSearchEngine {
    fn default() -> Self {
        ParallelSearchEngine::new(0)
    }
}
