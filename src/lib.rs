//! Chess rules engine
//!
//! A chess rules library written in Rust with support for:
//! - Coordinates, positions and FEN placement parsing
//! - Move legality with a specific reason for every rejected move
//! - Castling, queen promotion and self-check detection
//! - Game status: in play, check, checkmate, stalemate
//! - Fixed-depth minimax search over material and status
//! - Multi-threaded root-split search
//! - Pluggable handlers for invalid moves, missing kings and empty squares

pub mod types;
pub mod error;
pub mod coordinate;
pub mod board;
pub mod moves;
pub mod validity;
pub mod handler;
pub mod rules;
pub mod move_generator;
pub mod game;
pub mod evaluation;
pub mod search;
pub mod parallel_search;
pub mod config;

pub use board::Position;
pub use config::EngineConfig;
pub use coordinate::Coordinate;
pub use error::ChessError;
pub use game::{Game, GameStatus};
pub use handler::{GameEvent, GameHandler, RecordingHandler, StrictHandler};
pub use moves::Move;
pub use parallel_search::ParallelSearchEngine;
pub use search::{SearchEngine, SearchResult};
pub use types::{Colour, Kind, Piece};
pub use validity::{MoveResult, MoveValidity};
