//! End-to-end scenarios through the public API

use std::sync::Arc;

use chess_rules::{
    Colour, Coordinate, Game, GameEvent, GameStatus, Kind, Move, MoveValidity, ParallelSearchEngine,
    Piece, Position, RecordingHandler, SearchEngine,
};

fn sq(name: &str) -> Coordinate {
    name.parse().unwrap()
}

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

#[test]
fn fools_mate() {
    let mut g = Game::standard();
    for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        assert!(g.try_make(mv(m)).unwrap().is_ok(), "{m}");
    }
    assert_eq!(g.status(Colour::White), GameStatus::Checkmate);
    assert!(g.legal_moves(Colour::White).is_empty());
    assert_eq!(g.history().len(), 4);
}

#[test]
fn queen_next_to_cornered_king_is_only_check() {
    // The king can take the unprotected queen
    let g = game("k7/1Q6/8/8/8/8/8/K7 b");
    assert_eq!(g.status(Colour::Black), GameStatus::Check);
    assert_eq!(g.legal_moves(Colour::Black), vec![mv("a8b7")]);
}

#[test]
fn protected_queen_mates() {
    let g = game("k7/1Q6/2K5/8/8/8/8/8 b");
    assert_eq!(g.status(Colour::Black), GameStatus::Checkmate);
    assert_eq!(g.status(Colour::White), GameStatus::InPlay);
}

#[test]
fn stalemate_is_not_check() {
    let g = game("k7/8/1Q6/8/8/8/8/K7 b");
    assert!(!g.is_in_check(Colour::Black));
    assert_eq!(g.status(Colour::Black), GameStatus::Stalemate);
}

#[test]
fn pinned_piece_cannot_leave_the_line() {
    let g = game("3rk3/8/8/8/8/8/3R4/3K4 w");
    assert_eq!(g.check_move(sq("d2"), sq("e2")).validity, MoveValidity::CannotMoveIntoCheck);
    assert!(g.check_move(sq("d2"), sq("d5")).is_ok());
    assert!(g.check_move(sq("d2"), sq("d8")).is_ok());
}

#[test]
fn every_move_must_answer_check() {
    let g = game("4k3/8/8/8/8/8/3P4/3K1r2 w");
    assert_eq!(g.check_move(sq("d2"), sq("d3")).validity, MoveValidity::CannotMoveIntoCheck);
    for m in g.legal_moves(Colour::White) {
        let after = g.simulate(m);
        assert!(after.find_king(Colour::White).is_some());
        assert_eq!(m.from, sq("d1"), "{m}");
    }
}

#[test]
fn promotion_through_try_make() {
    let mut g = game("8/P7/8/8/8/8/8/k6K w");
    assert!(g.try_make(mv("a7a8")).unwrap().is_ok());
    assert_eq!(g.position().get(sq("a8")), Some(Piece::new(Kind::Queen, Colour::White)));
    assert_eq!(g.status(Colour::Black), GameStatus::Check);
}

#[test]
fn castling_rejected_after_king_moved_and_returned() {
    let mut g = game("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w");
    for m in ["e1f1", "a7a6", "f1e1", "a6a5"] {
        g.make(mv(m)).unwrap();
    }
    assert_eq!(g.check_move(sq("e1"), sq("g1")).validity, MoveValidity::CastlingKingHasMoved);
}

#[test]
fn lenient_game_records_every_notification() {
    let handler = Arc::new(RecordingHandler::new());
    let mut g = Game::with_handler(Position::from_fen_placement("8/8/8/8/8/8/8/K7").unwrap(), Colour::White, handler.clone());

    let result = g.try_make(mv("a1a3")).unwrap();
    assert_eq!(result.validity, MoveValidity::KingInvalidMove);
    g.make(mv("h8h7")).unwrap();
    assert!(!g.is_in_check(Colour::Black));

    let events = handler.events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], GameEvent::InvalidMove(r) if r.validity == MoveValidity::KingInvalidMove));
    assert_eq!(events[1], GameEvent::NoPieceAt(sq("h8")));
    assert_eq!(events[2], GameEvent::NoKingFound(Colour::Black));
}

#[test]
fn cloned_games_are_independent() {
    let original = Game::standard();
    let mut copy = original.clone();
    copy.make(mv("e2e4")).unwrap();
    copy.make(mv("e7e5")).unwrap();
    assert_eq!(original.position(), &Position::standard());
    assert!(original.history().is_empty());
    assert_eq!(original.current_player(), Colour::White);
    assert_eq!(copy.history().len(), 2);
}

#[test]
fn lone_piece_shapes_on_an_empty_board() {
    // Every from/to pair for a lone piece is legal exactly when the
    // geometry of its kind allows it
    let kinds = [Kind::Pawn, Kind::Knight, Kind::Bishop, Kind::Rook, Kind::Queen, Kind::King];
    for colour in [Colour::White, Colour::Black] {
        for kind in kinds {
            for from in Coordinate::all() {
                let mut position = Position::empty();
                position.place(from, Piece::new(kind, colour));
                let g = Game::new(position, colour);
                for to in Coordinate::all() {
                    let m = Move::new(from, to);
                    let (df, dr) = (m.file_delta().abs(), m.rank_delta().abs());
                    let advance = m.rank_delta() * colour.forward();
                    let expected = from != to
                        && match kind {
                            // Nothing to capture, so only straight pushes
                            Kind::Pawn => {
                                df == 0
                                    && (advance == 1
                                        || (advance == 2 && from.rank_index() == colour.pawn_rank()))
                            }
                            Kind::Knight => (df, dr) == (1, 2) || (df, dr) == (2, 1),
                            Kind::Bishop => df == dr,
                            Kind::Rook => df == 0 || dr == 0,
                            Kind::Queen => df == dr || df == 0 || dr == 0,
                            Kind::King => df <= 1 && dr <= 1,
                        };
                    assert_eq!(g.check_move(from, to).is_ok(), expected, "{colour} {kind:?} {m}");
                }
            }
        }
    }
}

#[test]
fn search_is_deterministic_and_legal() {
    let g = game("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w");
    let first = SearchEngine::new().best_move(&g, Colour::White, 2);
    let second = SearchEngine::new().best_move(&g, Colour::White, 2);
    assert_eq!(first, second);
    let best = first.best_move.unwrap();
    assert!(g.check_move(best.from, best.to).is_ok());
    // Scholar's mate
    assert_eq!(best, mv("f3f7"));

    let parallel = ParallelSearchEngine::new(4).best_move(&g, Colour::White, 2);
    assert_eq!(parallel, first);
}

mod random_playouts {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    #[test]
    fn random_games_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..8 {
            let mut g = Game::standard();
            for _ in 0..60 {
                let colour = g.current_player();
                let moves = g.legal_moves(colour);
                let status = g.status(colour);
                if moves.is_empty() {
                    assert!(matches!(status, GameStatus::Checkmate | GameStatus::Stalemate));
                    break;
                }
                assert!(matches!(status, GameStatus::InPlay | GameStatus::Check));

                let m = *moves.choose(&mut rng).unwrap();
                let before = g.position().pieces().count();
                let plies = g.history().len();
                assert!(g.try_make(m).unwrap().is_ok());
                assert_eq!(g.history().len(), plies + 1);
                assert_eq!(g.current_player(), colour.opponent());

                // Nobody leaves their own king attacked and no piece appears
                assert!(!chess_rules::rules::is_king_attacked(g.position(), colour));
                assert!(g.position().pieces().count() <= before);
                assert!(g.position().find_king(Colour::White).is_some());
                assert!(g.position().find_king(Colour::Black).is_some());
            }
        }
    }

    #[test]
    fn undo_after_random_move_restores_position() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut g = Game::standard();
        for _ in 0..20 {
            let moves = g.legal_moves(g.current_player());
            let Some(&m) = moves.choose(&mut rng) else { break };
            let snapshot = g.clone();
            g.make(m).unwrap();
            g.undo().unwrap();
            assert_eq!(g.position(), snapshot.position());
            assert_eq!(g.current_player(), snapshot.current_player());
            assert_eq!(g.history(), snapshot.history());
            g.make(m).unwrap();
        }
    }
}
