//! Check detection, pins, and the move legality filter.
//!
//! [`CheckContext`] is a derived cache with no lifecycle of its own: it
//! is rebuilt from the board after every applied move (and at every
//! simulated ply inside the search), never patched incrementally.
//!
//! Three ingredients per side:
//! - the *attack set*: every square the side's pieces could capture on;
//! - the *menace set*: squares that would neutralise a check the side is
//!   currently giving (capture the checker or block its ray);
//! - per-piece *direction locks*: pinned pieces may only slide along
//!   their pin line, and a king in direct slider check may not retreat
//!   along the checking ray (the attack set cannot see behind the king).

use super::board::Board;
use super::movement::{self, kings};
use super::types::{Direction, DirectionSet, PieceId, PieceKind, Side, Square, SquareSet};

/// Per-turn derived check state for both sides.
#[derive(Clone, Debug)]
pub(crate) struct CheckContext {
    attacks: [SquareSet; 2],
    menace: [SquareSet; 2],
    in_check: [bool; 2],
    locks: Vec<DirectionSet>,
}

impl CheckContext {
    /// Rebuild everything from the current board.
    #[must_use]
    pub(crate) fn compute(board: &Board) -> Self {
        let mut attacks = [SquareSet::EMPTY; 2];
        let mut menace = [SquareSet::EMPTY; 2];
        let mut locks = vec![DirectionSet::NONE; board.pieces.len()];

        for (_, piece) in board.pieces() {
            if piece.captured {
                continue;
            }
            let side = piece.side.index();
            for square in movement::attack_squares(board, piece) {
                attacks[side].insert(square);
            }
            for square in movement::menacing_squares(board, piece) {
                menace[side].insert(square);
            }
        }

        let in_check = [
            attacks[Side::Black.index()].contains(board.king_square(Side::White)),
            attacks[Side::White.index()].contains(board.king_square(Side::Black)),
        ];

        for (id, piece) in board.pieces() {
            if piece.captured || !piece.kind.is_slider() {
                continue;
            }
            project_pins(board, id, &mut locks);
        }

        CheckContext {
            attacks,
            menace,
            in_check,
            locks,
        }
    }

    /// Squares attacked by `side`.
    #[inline]
    #[must_use]
    pub(crate) fn attacks(&self, side: Side) -> SquareSet {
        self.attacks[side.index()]
    }

    /// Squares that neutralise a check given by `side`.
    #[inline]
    #[must_use]
    pub(crate) fn menace(&self, side: Side) -> SquareSet {
        self.menace[side.index()]
    }

    /// Whether `side`'s king is currently attacked.
    #[inline]
    #[must_use]
    pub(crate) fn in_check(&self, side: Side) -> bool {
        self.in_check[side.index()]
    }

    #[inline]
    fn locks_for(&self, id: PieceId) -> DirectionSet {
        self.locks[id.as_usize()]
    }
}

/// Trace one slider's rays and lock whatever it pins.
///
/// Along each ray: a friendly piece ends the ray; the first enemy piece
/// is either the enemy king (direct check — lock the king's retreat
/// direction, the square behind it is invisible to the attack set) or a
/// pin candidate. The candidate is locked onto the pin line only if the
/// enemy king is the very next piece on the ray.
fn project_pins(board: &Board, id: PieceId, locks: &mut [DirectionSet]) {
    let piece = board.piece(id);
    let directions: &[Direction] = match piece.kind {
        PieceKind::Bishop => &Direction::DIAGONAL,
        PieceKind::Rook => &Direction::STRAIGHT,
        PieceKind::Queen => &Direction::ALL,
        _ => return,
    };
    let enemy = piece.side.opponent();
    let enemy_king = board.king(enemy);

    for &dir in directions {
        let (df, dr) = dir.delta();
        let mut candidate: Option<PieceId> = None;
        let mut current = piece.square;

        while let Some(next) = current.offset(df, dr) {
            current = next;
            let Some(occupant) = board.piece_at(next) else {
                continue;
            };
            if board.piece(occupant).side == piece.side {
                break;
            }
            match candidate {
                None if occupant == enemy_king => {
                    // Direct check: the king may not step away along the ray.
                    locks[occupant.as_usize()].lock(dir);
                    break;
                }
                None => candidate = Some(occupant),
                Some(pinned) if occupant == enemy_king => {
                    let pin = DirectionSet::pin_along(dir);
                    for direction in Direction::ALL {
                        if pin.contains(direction) {
                            locks[pinned.as_usize()].lock(direction);
                        }
                    }
                    break;
                }
                Some(_) => break,
            }
        }
    }
}

/// Legal destinations of one piece under the current context.
///
/// Raw moves, minus whatever would leave the mover's own king in check:
/// while in check every kind (pawns included) may only move into the
/// enemy's menace set; direction locks always apply; the king may never
/// enter the enemy attack set and gains its castling destinations when
/// available.
#[must_use]
pub(crate) fn legal_destinations(board: &Board, ctx: &CheckContext, id: PieceId) -> Vec<Square> {
    let piece = board.piece(id);
    if piece.captured {
        return Vec::new();
    }
    let side = piece.side;
    let enemy = side.opponent();
    let mut moves = movement::raw_moves(board, piece);

    if piece.kind == PieceKind::King {
        let enemy_attacks = ctx.attacks(enemy);
        moves.retain(|&to| !enemy_attacks.contains(to));
        if !ctx.in_check(side) {
            let availability = kings::castling_availability(board, side, enemy_attacks);
            if let Some(castle) = availability.queenside {
                moves.push(castle.king_to);
            }
            if let Some(castle) = availability.kingside {
                moves.push(castle.king_to);
            }
        }
    } else if ctx.in_check(side) {
        let remedies = ctx.menace(enemy);
        moves.retain(|&to| remedies.contains(to));
    }

    let locks = ctx.locks_for(id);
    if !locks.is_empty() {
        // No knight jump lies on a pin line, so any lock freezes a knight.
        if piece.kind == PieceKind::Knight {
            return Vec::new();
        }
        let from = piece.square;
        moves.retain(|&to| {
            match Direction::classify(to.file() - from.file(), to.rank() - from.rank()) {
                Some(direction) => !locks.contains(direction),
                None => true,
            }
        });
    }

    moves
}

/// Whether `side` has at least one legal move anywhere.
#[must_use]
pub(crate) fn side_has_legal_move(board: &Board, ctx: &CheckContext, side: Side) -> bool {
    board
        .living(side)
        .any(|(id, _)| !legal_destinations(board, ctx, id).is_empty())
}
