//! Knight movement.

use once_cell::sync::Lazy;

use crate::game::board::Board;
use crate::game::types::{Piece, Square};

const JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// On-board jump targets, precomputed per square.
static TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    std::array::from_fn(|idx| {
        let from = Square::from_index(idx);
        JUMPS
            .iter()
            .filter_map(|&(df, dr)| from.offset(df, dr))
            .collect()
    })
});

/// Jump targets minus squares held by friendly pieces.
#[must_use]
pub(crate) fn raw_moves(board: &Board, piece: &Piece) -> Vec<Square> {
    TARGETS[piece.square.index()]
        .iter()
        .copied()
        .filter(|&sq| !board.side_occupies(piece.side, sq))
        .collect()
}

/// Every on-board jump target, occupied or not: a defended friendly
/// piece still denies its square to the enemy king.
#[must_use]
pub(crate) fn attack_squares(piece: &Piece) -> Vec<Square> {
    TARGETS[piece.square.index()].clone()
}

/// The knight's own square when it checks the enemy king, else nothing.
#[must_use]
pub(crate) fn menacing_squares(board: &Board, piece: &Piece, enemy_king: Square) -> Vec<Square> {
    if raw_moves(board, piece).contains(&enemy_king) {
        vec![piece.square]
    } else {
        Vec::new()
    }
}
