//! Seeded random playouts through the full state machine.

use rand::prelude::*;

use crate::game::session::GameSession;
use crate::game::types::{PieceKind, Side, Square};
use crate::game::{GameEvent, GameStatus};

/// All (from, to) pairs the side to move may play.
fn legal_pairs(game: &GameSession) -> Vec<(Square, Square)> {
    let side = game.board().side_to_move();
    let froms: Vec<Square> = game
        .board()
        .living(side)
        .map(|(_, p)| p.square)
        .collect();
    let mut pairs = Vec::new();
    for from in froms {
        let mut probe = game.clone();
        for to in probe.select(from).iter() {
            pairs.push((from, to));
        }
    }
    pairs
}

fn random_playout(seed: u64, max_moves: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameSession::new();

    for _ in 0..max_moves {
        if game.status() != GameStatus::InProgress {
            break;
        }
        let pairs = legal_pairs(&game);
        assert!(
            !pairs.is_empty(),
            "in-progress game must have a legal move (seed {seed})"
        );
        let (from, to) = pairs[rng.gen_range(0..pairs.len())];
        let mover = game.board().side_to_move();

        game.select(from);
        let event = game
            .apply_move(to)
            .unwrap_or_else(|| panic!("offered move {from}->{to} rejected (seed {seed})"));

        if event == GameEvent::PromotionPending(mover) {
            let kinds = PieceKind::PROMOTABLE;
            let kind = kinds[rng.gen_range(0..kinds.len())];
            game.choose_promotion(kind).expect("promotion accepted");
        }

        assert!(
            !game.in_check(mover),
            "{mover} ended its own move in check (seed {seed}, {from}->{to})"
        );
    }
}

#[test]
fn test_random_playouts_never_self_check() {
    for seed in 0..12 {
        random_playout(seed, 120);
    }
}

#[test]
fn test_playout_snapshot_round_trip_midgame() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut game = GameSession::new();

    for _ in 0..30 {
        if game.status() != GameStatus::InProgress {
            break;
        }
        let pairs = legal_pairs(&game);
        let (from, to) = pairs[rng.gen_range(0..pairs.len())];
        game.select(from);
        let event = game.apply_move(to).unwrap();
        if matches!(event, GameEvent::PromotionPending(_)) {
            game.choose_promotion(PieceKind::Queen).unwrap();
        }
    }

    let restored = GameSession::restore(&game.snapshot()).expect("restore");
    assert_eq!(restored.status(), game.status());
    assert_eq!(
        restored.board().side_to_move(),
        game.board().side_to_move()
    );

    // Identical legal-move sets for every piece of the side to move.
    let side = game.board().side_to_move();
    let squares: Vec<Square> = game
        .board()
        .living(side)
        .map(|(_, p)| p.square)
        .collect();
    for from in squares {
        let mut a = game.clone();
        let mut b = restored.clone();
        assert_eq!(a.select(from), b.select(from), "select sets differ on {from}");
    }
}

#[test]
fn test_kings_always_alive() {
    for seed in 20..26 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = GameSession::new();
        for _ in 0..150 {
            if game.status() != GameStatus::InProgress {
                break;
            }
            let pairs = legal_pairs(&game);
            if pairs.is_empty() {
                break;
            }
            let (from, to) = pairs[rng.gen_range(0..pairs.len())];
            game.select(from);
            if let Some(GameEvent::PromotionPending(_)) = game.apply_move(to) {
                game.choose_promotion(PieceKind::Queen).unwrap();
            }
            for side in Side::BOTH {
                let king = game.board().piece_at(game.board().king_square(side));
                let king = king.expect("king square occupied");
                assert_eq!(game.board().piece(king).kind, PieceKind::King);
                assert!(!game.board().piece(king).captured);
            }
        }
    }
}
