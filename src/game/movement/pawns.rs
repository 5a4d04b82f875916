//! Pawn movement.

use crate::game::board::Board;
use crate::game::types::{Piece, Square};

/// Forward steps and captures.
///
/// Single step onto an empty square; double step from the start rank when
/// the pawn has never moved and both squares are empty; diagonal steps
/// only onto enemy pieces, or onto the active en passant target.
#[must_use]
pub(crate) fn raw_moves(board: &Board, piece: &Piece) -> Vec<Square> {
    let mut moves = Vec::new();
    let forward = piece.side.pawn_direction();
    let enemy = piece.side.opponent();

    if let Some(one) = piece.square.offset(0, forward) {
        if board.square_empty(one) {
            moves.push(one);
            if !piece.has_moved && piece.square.rank() == piece.side.pawn_start_rank() {
                if let Some(two) = piece.square.offset(0, 2 * forward) {
                    if board.square_empty(two) {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(diag) = piece.square.offset(df, forward) {
            if board.side_occupies(enemy, diag) || board.en_passant_target() == Some(diag) {
                moves.push(diag);
            }
        }
    }

    moves
}

/// The two capture diagonals, occupied or not — an empty square a pawn
/// covers is still denied to the enemy king.
#[must_use]
pub(crate) fn attack_squares(piece: &Piece) -> Vec<Square> {
    let forward = piece.side.pawn_direction();
    [-1, 1]
        .iter()
        .filter_map(|&df| piece.square.offset(df, forward))
        .collect()
}

/// The pawn's own square when a capture diagonal holds the enemy king.
#[must_use]
pub(crate) fn menacing_squares(piece: &Piece, enemy_king: Square) -> Vec<Square> {
    if attack_squares(piece).contains(&enemy_king) {
        vec![piece.square]
    } else {
        Vec::new()
    }
}
