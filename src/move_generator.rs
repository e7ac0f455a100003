//! Chess rules - Move generator
//!
//! Enumerates legal moves by proposing a small set of candidate destinations
//! per piece and running each through the full legality check. Candidates
//! are a superset of what the rules can accept, so the result is the same as
//! testing every one of the 64 squares.

use crate::coordinate::Coordinate;
use crate::game::Game;
use crate::moves::Move;
use crate::rules;
use crate::types::*;

/// Direction offsets (file, rank) for sliding pieces
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (1, 1),
    (1, -1),
    (-1, -1),
];
const KING_DIRECTIONS: [(i8, i8); 8] = QUEEN_DIRECTIONS;
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
    (1, -2),
    (-1, -2),
];

/// Move generator for chess positions
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        MoveGenerator
    }

    /// All legal moves for `colour`, by source square then destination
    /// square, both in file-major scan order.
    pub fn generate_legal_moves(&self, game: &Game, colour: Colour) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for (from, piece) in game.position().pieces() {
            if piece.colour != colour {
                continue;
            }
            self.push_legal_from(game, colour, from, &mut moves);
        }
        moves
    }

    /// Legal moves for the piece on `from`, in destination scan order.
    pub fn generate_legal_moves_from(&self, game: &Game, colour: Colour, from: Coordinate) -> Vec<Move> {
        let mut moves = Vec::new();
        self.push_legal_from(game, colour, from, &mut moves);
        moves
    }

    /// Stops at the first legal move found
    pub fn has_legal_move(&self, game: &Game, colour: Colour) -> bool {
        game.position().pieces().any(|(from, piece)| {
            piece.colour == colour
                && self
                    .candidate_destinations(game, from)
                    .into_iter()
                    .any(|to| rules::check(game, colour, Move::new(from, to)).is_ok())
        })
    }

    fn push_legal_from(&self, game: &Game, colour: Colour, from: Coordinate, moves: &mut Vec<Move>) {
        for to in self.candidate_destinations(game, from) {
            let mv = Move::new(from, to);
            if rules::check(game, colour, mv).is_ok() {
                moves.push(mv);
            }
        }
    }

    /// Squares the piece on `from` might legally reach, sorted in scan order.
    pub fn candidate_destinations(&self, game: &Game, from: Coordinate) -> Vec<Coordinate> {
        let piece = match game.position().get(from) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        let mut targets = Vec::with_capacity(28);
        match piece.kind {
            Kind::Pawn => self.pawn_targets(from, piece.colour, &mut targets),
            Kind::Knight => self.step_targets(from, &KNIGHT_OFFSETS, &mut targets),
            Kind::Bishop => self.sliding_targets(game, from, &BISHOP_DIRECTIONS, &mut targets),
            Kind::Rook => self.sliding_targets(game, from, &ROOK_DIRECTIONS, &mut targets),
            Kind::Queen => self.sliding_targets(game, from, &QUEEN_DIRECTIONS, &mut targets),
            Kind::King => {
                self.step_targets(from, &KING_DIRECTIONS, &mut targets);
                // Castling
                self.step_targets(from, &[(2, 0), (-2, 0)], &mut targets);
            }
        }
        targets.sort_by_key(|c| c.scan_order());
        targets
    }

    fn pawn_targets(&self, from: Coordinate, colour: Colour, targets: &mut Vec<Coordinate>) {
        let forward = colour.forward();
        self.step_targets(from, &[(0, forward), (0, 2 * forward), (-1, forward), (1, forward)], targets);
    }

    fn step_targets(&self, from: Coordinate, offsets: &[(i8, i8)], targets: &mut Vec<Coordinate>) {
        targets.extend(offsets.iter().filter_map(|&(df, dr)| from.offset(df, dr)));
    }

    /// Walk each ray up to and including the first occupied square
    fn sliding_targets(&self, game: &Game, from: Coordinate, directions: &[(i8, i8)], targets: &mut Vec<Coordinate>) {
        for &(df, dr) in directions {
            let mut current = from;
            while let Some(next) = current.offset(df, dr) {
                targets.push(next);
                if game.position().has_piece_at(next) {
                    break;
                }
                current = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn sq(name: &str) -> Coordinate {
        name.parse().unwrap()
    }

    /// Reference enumeration over every destination square
    fn brute_force(game: &Game, colour: Colour) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in Coordinate::all() {
            for to in Coordinate::all() {
                let mv = Move::new(from, to);
                if game.position().get(from).map(|p| p.colour) == Some(colour)
                    && rules::check(game, colour, mv).is_ok()
                {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let game = Game::standard();
        assert_eq!(game.legal_moves(Colour::White).len(), 20);
        assert_eq!(game.legal_moves(Colour::Black).len(), 20);
    }

    #[test]
    fn candidates_agree_with_full_scan() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w",
            "4k3/8/8/8/3Q4/8/8/B3K2R w",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w",
        ] {
            let game = Game::from_fen(fen).unwrap();
            for colour in [Colour::White, Colour::Black] {
                assert_eq!(game.legal_moves(colour), brute_force(&game, colour), "{fen} {colour}");
            }
        }
    }

    #[test]
    fn moves_come_in_scan_order() {
        let game = Game::standard();
        let moves = game.legal_moves(Colour::White);
        let first: Vec<String> = moves.iter().take(3).map(|m| m.to_string()).collect();
        assert_eq!(first, ["a2a3", "a2a4", "b1a3"]);
    }

    #[test]
    fn lone_pieces_reach_expected_square_counts() {
        let cases = [
            (Kind::Knight, "d4", 8),
            (Kind::Bishop, "d4", 13),
            (Kind::Rook, "d4", 14),
            (Kind::Queen, "d4", 27),
            (Kind::King, "d4", 8),
            (Kind::Knight, "a1", 2),
        ];
        for (kind, at, expected) in cases {
            let mut position = Position::empty();
            position.place(sq(at), Piece::new(kind, Colour::White));
            let game = Game::new(position, Colour::White);
            assert_eq!(game.legal_destinations(sq(at)).len(), expected, "{kind:?} on {at}");
        }
    }

    #[test]
    fn has_legal_move_matches_enumeration() {
        let stalemate = Game::from_fen("k7/8/1Q6/8/8/8/8/K7 b").unwrap();
        assert!(!stalemate.has_legal_moves(Colour::Black));
        assert!(stalemate.legal_moves(Colour::Black).is_empty());
        assert!(stalemate.has_legal_moves(Colour::White));
    }
}
