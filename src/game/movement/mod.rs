//! Per-kind movement rules.
//!
//! Three pure views of a piece's reach, all computed from the board's
//! occupancy:
//!
//! - *raw moves*: squares the piece could move to this turn, ignoring
//!   whether its own king ends up in check;
//! - *attack squares*: squares the piece could capture on, used for
//!   "is this square attacked" queries (slider rays include the first
//!   blocker regardless of colour — a defended friendly piece still
//!   denies the square to the enemy king);
//! - *menacing squares*: non-empty only while the piece gives check:
//!   the squares where capturing or blocking it would neutralise that
//!   check.
//!
//! Castling is handled with the legality filter, not here; the king's
//! raw moves are its plain steps.

pub(crate) mod kings;
pub(crate) mod knights;
pub(crate) mod pawns;
pub(crate) mod sliders;

use super::board::Board;
use super::types::{Direction, Piece, PieceKind, Square};

/// Squares the piece can move to, before check legality.
///
/// A captured piece has no moves.
#[must_use]
pub(crate) fn raw_moves(board: &Board, piece: &Piece) -> Vec<Square> {
    if piece.captured {
        return Vec::new();
    }
    match piece.kind {
        PieceKind::Pawn => pawns::raw_moves(board, piece),
        PieceKind::Knight => knights::raw_moves(board, piece),
        PieceKind::Bishop => sliders::raw_moves(board, piece, &Direction::DIAGONAL),
        PieceKind::Rook => sliders::raw_moves(board, piece, &Direction::STRAIGHT),
        PieceKind::Queen => sliders::raw_moves(board, piece, &Direction::ALL),
        PieceKind::King => kings::raw_steps(board, piece),
    }
}

/// Squares the piece attacks for check-detection purposes.
#[must_use]
pub(crate) fn attack_squares(board: &Board, piece: &Piece) -> Vec<Square> {
    if piece.captured {
        return Vec::new();
    }
    match piece.kind {
        PieceKind::Pawn => pawns::attack_squares(piece),
        PieceKind::Knight => knights::attack_squares(piece),
        PieceKind::Bishop => sliders::attack_squares(board, piece, &Direction::DIAGONAL),
        PieceKind::Rook => sliders::attack_squares(board, piece, &Direction::STRAIGHT),
        PieceKind::Queen => sliders::attack_squares(board, piece, &Direction::ALL),
        PieceKind::King => kings::attack_squares(piece),
    }
}

/// Squares whose occupation would neutralise the check this piece gives.
///
/// Empty unless the piece currently checks the enemy king. For sliders
/// the result is the intervening ray squares plus the piece's own square;
/// for leapers and pawns only the piece's own square (capture is the sole
/// remedy).
#[must_use]
pub(crate) fn menacing_squares(board: &Board, piece: &Piece) -> Vec<Square> {
    if piece.captured {
        return Vec::new();
    }
    let enemy_king = board.king_square(piece.side.opponent());
    match piece.kind {
        PieceKind::Pawn => pawns::menacing_squares(piece, enemy_king),
        PieceKind::Knight => knights::menacing_squares(board, piece, enemy_king),
        PieceKind::Bishop => {
            sliders::menacing_squares(board, piece, &Direction::DIAGONAL, enemy_king)
        }
        PieceKind::Rook => sliders::menacing_squares(board, piece, &Direction::STRAIGHT, enemy_king),
        PieceKind::Queen => sliders::menacing_squares(board, piece, &Direction::ALL, enemy_king),
        PieceKind::King => kings::menacing_squares(piece, enemy_king),
    }
}
