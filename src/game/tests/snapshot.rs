//! Persistence: snapshot capture, restore validation, round-trips.

use crate::game::error::{BuildError, RestoreError};
use crate::game::session::GameSession;
use crate::game::snapshot::{SaveState, SavedPiece};
use crate::game::tests::{kings, session, sq};
use crate::game::types::{PieceKind, Side, Square};

fn play(game: &mut GameSession, from: (i8, i8), to: (i8, i8)) {
    game.select(sq(from.0, from.1));
    assert!(game.apply_move(sq(to.0, to.1)).is_some(), "move rejected");
}

/// Every piece's legal destination set, keyed by square index.
fn all_select_sets(game: &GameSession) -> Vec<(Square, Vec<Square>)> {
    let side = game.board().side_to_move();
    let squares: Vec<Square> = game
        .board()
        .living(side)
        .map(|(_, p)| p.square)
        .collect();
    squares
        .into_iter()
        .map(|from| {
            let mut probe = game.clone();
            (from, probe.select(from).iter().collect())
        })
        .collect()
}

#[test]
fn test_round_trip_preserves_legal_moves() {
    let mut game = GameSession::new();
    play(&mut game, (5, 2), (5, 4));
    play(&mut game, (5, 7), (5, 5));
    play(&mut game, (7, 1), (6, 3));

    let restored = GameSession::restore(&game.snapshot()).expect("restore succeeds");

    assert_eq!(
        game.board().side_to_move(),
        restored.board().side_to_move()
    );
    assert_eq!(all_select_sets(&game), all_select_sets(&restored));
}

#[test]
fn test_round_trip_preserves_en_passant() {
    let mut game = GameSession::new();
    play(&mut game, (5, 2), (5, 4)); // arms en passant for Black

    let state = game.snapshot();
    assert_eq!(state.en_passant_target, Some((5, 3)));
    assert_eq!(state.en_passant_victim, Some((5, 4)));

    let restored = GameSession::restore(&state).unwrap();
    assert_eq!(restored.board().en_passant_target(), Some(sq(5, 3)));
}

#[test]
fn test_round_trip_preserves_clock_and_history() {
    let mut game = GameSession::new();
    play(&mut game, (7, 1), (6, 3));
    play(&mut game, (7, 8), (6, 6));

    let state = game.snapshot();
    assert_eq!(state.halfmove_clock, 2);
    assert_eq!(state.history.len(), 2);

    let restored = GameSession::restore(&state).unwrap();
    assert_eq!(restored.board().halfmove_clock(), 2);
    assert_eq!(restored.snapshot(), state);
}

#[test]
fn test_round_trip_preserves_castling_rights() {
    // Unmoved king and rooks keep castling available across a save.
    let game = session(
        crate::game::builder::BoardBuilder::new()
            .piece_unmoved(PieceKind::King, Side::White, sq(5, 1))
            .piece_unmoved(PieceKind::Rook, Side::White, sq(8, 1))
            .piece(PieceKind::King, Side::Black, sq(5, 8)),
    );
    let mut restored = GameSession::restore(&game.snapshot()).unwrap();
    assert!(restored.select(sq(5, 1)).contains(sq(7, 1)));

    // A session whose rook has moved must not regain the right.
    let game = session(
        crate::game::builder::BoardBuilder::new()
            .piece_unmoved(PieceKind::King, Side::White, sq(5, 1))
            .piece(PieceKind::Rook, Side::White, sq(8, 1))
            .piece(PieceKind::King, Side::Black, sq(5, 8)),
    );
    let mut restored = GameSession::restore(&game.snapshot()).unwrap();
    assert!(!restored.select(sq(5, 1)).contains(sq(7, 1)));
}

fn minimal_state() -> SaveState {
    SaveState {
        side_to_move: Side::White,
        en_passant_target: None,
        en_passant_victim: None,
        halfmove_clock: 0,
        history: Vec::new(),
        pieces: vec![
            SavedPiece {
                file: 5,
                rank: 1,
                kind: PieceKind::King,
                side: Side::White,
                has_moved: false,
            },
            SavedPiece {
                file: 5,
                rank: 8,
                kind: PieceKind::King,
                side: Side::Black,
                has_moved: false,
            },
            SavedPiece {
                file: 1,
                rank: 1,
                kind: PieceKind::Rook,
                side: Side::White,
                has_moved: false,
            },
        ],
    }
}

#[test]
fn test_restore_minimal_state() {
    let game = GameSession::restore(&minimal_state()).unwrap();
    assert_eq!(game.board().living_count(Side::White), 2);
}

#[test]
fn test_restore_rejects_out_of_bounds_square() {
    let mut state = minimal_state();
    state.pieces[2].file = 9;
    assert_eq!(
        GameSession::restore(&state).unwrap_err(),
        RestoreError::SquareOutOfBounds { file: 9, rank: 1 }
    );
}

#[test]
fn test_restore_rejects_missing_king() {
    let mut state = minimal_state();
    state.pieces.remove(1);
    assert_eq!(
        GameSession::restore(&state).unwrap_err(),
        RestoreError::InvalidPosition {
            source: BuildError::MissingKing { side: Side::Black }
        }
    );
}

#[test]
fn test_restore_rejects_duplicate_kings() {
    let mut state = minimal_state();
    state.pieces.push(SavedPiece {
        file: 2,
        rank: 2,
        kind: PieceKind::King,
        side: Side::White,
        has_moved: true,
    });
    assert_eq!(
        GameSession::restore(&state).unwrap_err(),
        RestoreError::InvalidPosition {
            source: BuildError::DuplicateKing { side: Side::White }
        }
    );
}

#[test]
fn test_restore_rejects_shared_square() {
    let mut state = minimal_state();
    state.pieces.push(SavedPiece {
        file: 1,
        rank: 1,
        kind: PieceKind::Knight,
        side: Side::Black,
        has_moved: true,
    });
    assert!(matches!(
        GameSession::restore(&state).unwrap_err(),
        RestoreError::InvalidPosition {
            source: BuildError::OccupiedSquare { .. }
        }
    ));
}

#[test]
fn test_restore_rejects_unbacked_en_passant() {
    let mut state = minimal_state();
    state.en_passant_target = Some((4, 6));
    state.en_passant_victim = Some((4, 5));
    assert_eq!(
        GameSession::restore(&state).unwrap_err(),
        RestoreError::InvalidEnPassant { target: sq(4, 6) }
    );
}

#[test]
fn test_restore_rejects_corrupt_history() {
    let mut state = minimal_state();
    state.history.push(vec![crate::game::snapshot::HistoryPiece {
        file: 0,
        rank: 4,
        kind: PieceKind::Pawn,
        side: Side::White,
    }]);
    assert_eq!(
        GameSession::restore(&state).unwrap_err(),
        RestoreError::CorruptHistory { entry: 0 }
    );
}

#[test]
fn test_restored_terminal_position_reports_status() {
    // A restored mate position must not pretend to be in progress.
    let mut game = session(
        kings(sq(7, 1), sq(1, 8))
            .piece(PieceKind::Pawn, Side::Black, sq(1, 7))
            .piece(PieceKind::Pawn, Side::Black, sq(2, 7))
            .piece(PieceKind::Rook, Side::White, sq(8, 4)),
    );
    play(&mut game, (8, 4), (8, 8));
    let restored = GameSession::restore(&game.snapshot()).unwrap();
    assert_eq!(restored.status(), game.status());
}

#[cfg(feature = "serde")]
mod serde_round_trips {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let mut game = GameSession::new();
        play(&mut game, (5, 2), (5, 4));
        play(&mut game, (2, 8), (3, 6));

        let state = game.snapshot();
        let json = serde_json::to_string(&state).expect("serialize");
        let back: SaveState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(state, back);

        let restored = GameSession::restore(&back).unwrap();
        assert_eq!(all_select_sets(&game), all_select_sets(&restored));
    }

    #[test]
    fn test_json_preserves_en_passant_fields() {
        let mut game = GameSession::new();
        play(&mut game, (4, 2), (4, 4));

        let json = serde_json::to_string(&game.snapshot()).unwrap();
        assert!(json.contains("en_passant_target"));
        let back: SaveState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.en_passant_target, Some((4, 3)));
    }
}
