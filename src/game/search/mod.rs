//! Fixed-depth minimax move selection.
//!
//! White minimises the static evaluation and Black maximises it
//! (piece values are signed negative-for-White). The search runs on its
//! own copy of the board and explores every legal move at every ply —
//! no pruning, no move ordering, no transposition table. Hypothetical
//! moves are applied with a make/unmake token; capturing the enemy king
//! ends a line at the ±[`MATE_SENTINEL`] extreme, which stands in for a
//! forced mate. Ties keep the first move found, so repeated searches of
//! the same position return the same move.

use super::board::Board;
use super::check::{self, CheckContext};
use super::pst;
use super::types::{PieceId, PieceKind, Side, Square};

#[cfg(feature = "logging")]
use log::debug;

/// Line value when a king has been captured in simulation.
pub(crate) const MATE_SENTINEL: i32 = 100_000;

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Plies explored beyond the root move.
    pub depth: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams { depth: 4 }
    }
}

/// The move the search settled on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiMove {
    pub piece: PieceId,
    pub to: Square,
}

/// The extreme value meaning `side` has won the line.
#[inline]
const fn winning(side: Side) -> i32 {
    match side {
        Side::White => -MATE_SENTINEL,
        Side::Black => MATE_SENTINEL,
    }
}

/// Pick the best move for `side` on `board`.
///
/// Returns `None` when the side has no legal move (the state machine has
/// already declared mate or stalemate by then). The board itself is
/// never mutated; the search works on a clone.
#[must_use]
pub fn best_move(board: &Board, side: Side, params: &SearchParams) -> Option<AiMove> {
    let mut sim = board.clone();
    let ctx = CheckContext::compute(&sim);

    let candidates: Vec<PieceId> = sim.living(side).map(|(id, _)| id).collect();
    let mut best: Option<(AiMove, i32)> = None;

    for id in candidates {
        for to in check::legal_destinations(&sim, &ctx, id) {
            let undo = make(&mut sim, id, to);
            let score = if undo.king_captured {
                winning(side)
            } else if params.depth == 0 {
                pst::evaluate(&sim)
            } else {
                minimax(&mut sim, side.opponent(), params.depth)
            };
            unmake(&mut sim, undo);

            let improves = match (side, &best) {
                (_, None) => true,
                (Side::White, Some((_, current))) => score < *current,
                (Side::Black, Some((_, current))) => score > *current,
            };
            if improves {
                best = Some((AiMove { piece: id, to }, score));
            }
            if score == winning(side) {
                let (chosen, _) = best.expect("just assigned");
                return Some(chosen);
            }
        }
    }

    #[cfg(feature = "logging")]
    if let Some((chosen, score)) = &best {
        debug!(
            "{side} plays {} -> {} (value {score})",
            board.piece(chosen.piece).kind,
            chosen.to
        );
    }

    best.map(|(chosen, _)| chosen)
}

/// Explore `depth` plies for `side`, alternating minimise/maximise.
///
/// A level with no legal moves scores at the extreme unfavourable to the
/// side to move. The check context is rebuilt at every level: pins and
/// checks change with every hypothetical move.
fn minimax(board: &mut Board, side: Side, depth: u32) -> i32 {
    let ctx = CheckContext::compute(board);
    let mut value = winning(side.opponent());

    let candidates: Vec<PieceId> = board.living(side).map(|(id, _)| id).collect();

    for id in candidates {
        for to in check::legal_destinations(board, &ctx, id) {
            let undo = make(board, id, to);
            let score = if undo.king_captured {
                winning(side)
            } else if depth == 1 {
                pst::evaluate(board)
            } else {
                minimax(board, side.opponent(), depth - 1)
            };
            unmake(board, undo);

            value = match side {
                Side::White => value.min(score),
                Side::Black => value.max(score),
            };
            if value == winning(side) {
                return value;
            }
        }
    }

    value
}

/// Everything needed to exactly reverse one hypothetical move.
struct Undo {
    id: PieceId,
    from: Square,
    had_moved: bool,
    victim: Option<PieceId>,
    king_captured: bool,
}

/// Apply a hypothetical move: relocate, flag the mover as moved, and
/// capture whatever stood on the destination. Castling rook relocation
/// and en passant removal are not simulated.
fn make(board: &mut Board, id: PieceId, to: Square) -> Undo {
    let victim = board.piece_at(to);
    let king_captured = victim.is_some_and(|v| board.piece(v).kind == PieceKind::King);
    if let Some(victim) = victim {
        board.piece_mut(victim).captured = true;
    }

    let piece = board.piece_mut(id);
    let from = piece.square;
    let had_moved = piece.has_moved;
    piece.square = to;
    piece.has_moved = true;

    Undo {
        id,
        from,
        had_moved,
        victim,
        king_captured,
    }
}

fn unmake(board: &mut Board, undo: Undo) {
    let piece = board.piece_mut(undo.id);
    piece.square = undo.from;
    piece.has_moved = undo.had_moved;
    if let Some(victim) = undo.victim {
        board.piece_mut(victim).captured = false;
    }
}
