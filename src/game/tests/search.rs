//! Minimax search behaviour.

use crate::game::search::{best_move, SearchParams};
use crate::game::tests::{kings, sq};
use crate::game::types::{PieceKind, Side};

fn depth(depth: u32) -> SearchParams {
    SearchParams { depth }
}

#[test]
fn test_default_depth() {
    assert_eq!(SearchParams::default().depth, 4);
}

#[test]
fn test_search_is_deterministic() {
    let board = crate::game::board::Board::new();
    let first = best_move(&board, Side::White, &depth(2)).unwrap();
    let second = best_move(&board, Side::White, &depth(2)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_search_does_not_mutate_the_board() {
    let board = crate::game::board::Board::new();
    let before: Vec<_> = board.pieces().map(|(_, p)| *p).collect();
    best_move(&board, Side::White, &depth(2));
    let after: Vec<_> = board.pieces().map(|(_, p)| *p).collect();
    assert_eq!(before, after);
}

#[test]
fn test_greedy_capture_at_depth_zero() {
    // A hanging black queen on d8, white rook on d1 with the file open.
    let board = kings(sq(7, 1), sq(8, 8))
        .piece(PieceKind::Rook, Side::White, sq(4, 1))
        .piece(PieceKind::Queen, Side::Black, sq(4, 8))
        .build()
        .unwrap();
    let chosen = best_move(&board, Side::White, &depth(0)).unwrap();
    assert_eq!(board.piece(chosen.piece).kind, PieceKind::Rook);
    assert_eq!(chosen.to, sq(4, 8));
}

#[test]
fn test_avoids_losing_the_queen() {
    // Qxe6 wins a knight but loses the queen to fxe6; the search must
    // prefer anything else (Qxf7 wins a clean pawn, for instance).
    let board = kings(sq(1, 1), sq(8, 8))
        .piece(PieceKind::Queen, Side::White, sq(4, 5))
        .piece(PieceKind::Knight, Side::Black, sq(5, 6))
        .piece(PieceKind::Pawn, Side::Black, sq(6, 7))
        .build()
        .unwrap();
    let chosen = best_move(&board, Side::White, &depth(2)).unwrap();
    let is_queen = board.piece(chosen.piece).kind == PieceKind::Queen;
    assert!(
        !(is_queen && chosen.to == sq(5, 6)),
        "took the defended knight"
    );
}

#[test]
fn test_finds_mate_in_one() {
    // The back-rank mate: Rh8 ends the game, and the sentinel value
    // short-circuits the remaining candidates.
    let board = kings(sq(7, 1), sq(1, 8))
        .piece(PieceKind::Pawn, Side::Black, sq(1, 7))
        .piece(PieceKind::Pawn, Side::Black, sq(2, 7))
        .piece(PieceKind::Rook, Side::White, sq(8, 4))
        .build()
        .unwrap();
    let chosen = best_move(&board, Side::White, &depth(2)).unwrap();
    assert_eq!(board.piece(chosen.piece).kind, PieceKind::Rook);
    assert_eq!(chosen.to, sq(8, 8));
}

#[test]
fn test_black_maximises() {
    // Mirror of the hanging-queen test: Black grabs the white queen.
    let board = kings(sq(7, 1), sq(8, 8))
        .piece(PieceKind::Rook, Side::Black, sq(4, 8))
        .piece(PieceKind::Queen, Side::White, sq(4, 1))
        .side_to_move(Side::Black)
        .build()
        .unwrap();
    let chosen = best_move(&board, Side::Black, &depth(0)).unwrap();
    assert_eq!(board.piece(chosen.piece).kind, PieceKind::Rook);
    assert_eq!(chosen.to, sq(4, 1));
}

#[test]
fn test_no_legal_moves_returns_none() {
    // The stalemate position: White has nothing to play.
    let board = kings(sq(1, 1), sq(3, 1))
        .piece(PieceKind::Rook, Side::Black, sq(8, 2))
        .build()
        .unwrap();
    assert!(best_move(&board, Side::White, &depth(2)).is_none());
}

#[test]
fn test_search_result_is_a_legal_move() {
    // Whatever the search picks from the opening position must be
    // accepted by the state machine.
    let mut game = crate::game::session::GameSession::new();
    let chosen = best_move(game.board(), Side::White, &depth(1)).unwrap();
    let from = game.board().piece(chosen.piece).square;
    assert!(game.select(from).contains(chosen.to));
    assert!(game.apply_move(chosen.to).is_some());
}
