//! Static evaluation: material plus piece-square tables.
//!
//! Values are signed so that negative favours White and positive favours
//! Black; the minimax search minimises for White and maximises for
//! Black. Tables are stored once from White's perspective (rank 1 at the
//! bottom, positive = good for the owner) and mirrored by rank for
//! Black. A captured piece evaluates to the negation of its value, so a
//! hypothetical capture inside the search swings the sum against the
//! owner without removing the piece from the collection.

use super::board::Board;
use super::types::{Piece, PieceKind, Side, Square};

/// Base material values, in tenth-of-a-pawn units.
const BASE_VALUES: [i32; 6] = [10, 30, 30, 50, 90, 900];

type Table = [[i32; 8]; 8];

const PAWN_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE: Table = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE: Table = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_TABLE: Table = [
    [0, 0, 0, 5, 5, 0, 0, 0],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const QUEEN_TABLE: Table = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

const KING_MIDDLEGAME_TABLE: Table = [
    [20, 30, 10, 0, 0, 10, 30, 20],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
];

const KING_ENDGAME_TABLE: Table = [
    [50, 30, 30, 30, 30, 30, 30, 50],
    [30, 30, 0, 0, 0, 0, 30, 30],
    [30, 10, -20, -30, -30, -20, 10, 30],
    [30, 10, -30, -40, -40, -30, 10, 30],
    [30, 10, -30, -40, -40, -30, 10, 30],
    [30, 10, -20, -30, -30, -20, 10, 30],
    [30, 20, 10, 0, 0, 10, 20, 30],
    [50, 40, 30, 20, 20, 30, 40, 50],
];

fn table_for(board: &Board, piece: &Piece) -> &'static Table {
    match piece.kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => {
            if king_endgame(board, piece.side) {
                &KING_ENDGAME_TABLE
            } else {
                &KING_MIDDLEGAME_TABLE
            }
        }
    }
}

/// The king switches tables once no queen remains on either side, or
/// once its own side still has a queen but three or fewer living pieces.
fn king_endgame(board: &Board, side: Side) -> bool {
    let own_queen = board.has_queen(side);
    let enemy_queen = board.has_queen(side.opponent());
    (!own_queen && !enemy_queen) || (own_queen && board.living_count(side) <= 3)
}

fn table_bonus(table: &Table, square: Square) -> i32 {
    table[(square.rank() - 1) as usize][(square.file() - 1) as usize]
}

/// Signed positional value of one piece (negative favours White).
#[must_use]
pub(crate) fn position_value(board: &Board, piece: &Piece) -> i32 {
    let square = match piece.side {
        Side::White => piece.square,
        Side::Black => piece.square.mirror_rank(),
    };
    let magnitude = BASE_VALUES[piece.kind.index()] + table_bonus(table_for(board, piece), square);
    let signed = match piece.side {
        Side::White => -magnitude,
        Side::Black => magnitude,
    };
    if piece.captured {
        -signed
    } else {
        signed
    }
}

/// The board total: every piece's value summed, captured pieces negated.
#[must_use]
pub(crate) fn evaluate(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| position_value(board, piece))
        .sum()
}
