//! Ray movement shared by bishop, rook and queen.

use crate::game::board::Board;
use crate::game::types::{Direction, Piece, Square};

/// Walk each ray, stopping at the first occupied square: exclusive when
/// it holds a friendly piece, inclusive when it holds an enemy.
#[must_use]
pub(crate) fn raw_moves(board: &Board, piece: &Piece, directions: &[Direction]) -> Vec<Square> {
    let mut moves = Vec::new();

    for &dir in directions {
        let (df, dr) = dir.delta();
        let mut current = piece.square;
        while let Some(next) = current.offset(df, dr) {
            if board.side_occupies(piece.side, next) {
                break;
            }
            moves.push(next);
            if board.side_occupies(piece.side.opponent(), next) {
                break;
            }
            current = next;
        }
    }

    moves
}

/// Like [`raw_moves`], but the first blocker is included regardless of
/// colour: a defended friendly square still counts as attacked.
#[must_use]
pub(crate) fn attack_squares(board: &Board, piece: &Piece, directions: &[Direction]) -> Vec<Square> {
    let mut attacks = Vec::new();

    for &dir in directions {
        let (df, dr) = dir.delta();
        let mut current = piece.square;
        while let Some(next) = current.offset(df, dr) {
            attacks.push(next);
            if !board.square_empty(next) {
                break;
            }
            current = next;
        }
    }

    attacks
}

/// If one ray runs unobstructed into the enemy king, return the empty
/// squares along it plus this piece's own square; any other blocker
/// cancels the ray.
#[must_use]
pub(crate) fn menacing_squares(
    board: &Board,
    piece: &Piece,
    directions: &[Direction],
    enemy_king: Square,
) -> Vec<Square> {
    for &dir in directions {
        let (df, dr) = dir.delta();
        let mut blocking = Vec::new();
        let mut current = piece.square;
        while let Some(next) = current.offset(df, dr) {
            if next == enemy_king {
                blocking.push(piece.square);
                return blocking;
            }
            if !board.square_empty(next) {
                break;
            }
            blocking.push(next);
            current = next;
        }
    }

    Vec::new()
}
