//! Position records and the persisted game format.
//!
//! [`PositionSnapshot`] is the immutable record compared for threefold
//! repetition. [`SaveState`] is the load-bearing exchange format for
//! save files and network transfer: plain integers and enums, validated
//! on the way back in. With the `serde` feature it derives
//! `Serialize`/`Deserialize`; the field layout is the wire contract.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::error::RestoreError;
use super::types::{Piece, PieceKind, Side, Square};

/// The board at one completed move: every living piece in spawn order.
///
/// Equality is element-wise over the ordered entries; the order is
/// deterministic because pieces are never reordered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionSnapshot {
    entries: Vec<(Square, PieceKind, Side)>,
}

impl PositionSnapshot {
    /// Record the living pieces of `board`.
    #[must_use]
    pub(crate) fn capture(board: &Board) -> Self {
        PositionSnapshot {
            entries: board
                .pieces()
                .filter(|(_, p)| !p.captured)
                .map(|(_, p)| (p.square, p.kind, p.side))
                .collect(),
        }
    }

    fn from_entries(entries: Vec<(Square, PieceKind, Side)>) -> Self {
        PositionSnapshot { entries }
    }

    /// Number of recorded pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One living piece in the persisted form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SavedPiece {
    pub file: i8,
    pub rank: i8,
    pub kind: PieceKind,
    pub side: Side,
    pub has_moved: bool,
}

/// One piece inside a persisted history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistoryPiece {
    pub file: i8,
    pub rank: i8,
    pub kind: PieceKind,
    pub side: Side,
}

/// Everything needed to resume a game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaveState {
    pub side_to_move: Side,
    /// Square a pawn may move to for an en passant capture.
    pub en_passant_target: Option<(i8, i8)>,
    /// Square of the pawn capturable en passant.
    pub en_passant_victim: Option<(i8, i8)>,
    pub halfmove_clock: u32,
    /// The full position history, oldest first.
    pub history: Vec<Vec<HistoryPiece>>,
    /// Every living piece in spawn order.
    pub pieces: Vec<SavedPiece>,
}

impl SaveState {
    /// Capture the persistable parts of a board.
    #[must_use]
    pub(crate) fn capture(board: &Board) -> Self {
        let square_pair = |sq: Square| (sq.file(), sq.rank());
        SaveState {
            side_to_move: board.side_to_move(),
            en_passant_target: board.en_passant_target.map(square_pair),
            en_passant_victim: board
                .en_passant_victim
                .map(|id| square_pair(board.piece(id).square)),
            halfmove_clock: board.halfmove_clock,
            history: board
                .position_history
                .iter()
                .map(|snapshot| {
                    snapshot
                        .entries
                        .iter()
                        .map(|&(sq, kind, side)| HistoryPiece {
                            file: sq.file(),
                            rank: sq.rank(),
                            kind,
                            side,
                        })
                        .collect()
                })
                .collect(),
            pieces: board
                .pieces()
                .filter(|(_, p)| !p.captured)
                .map(|(_, p)| SavedPiece {
                    file: p.square.file(),
                    rank: p.square.rank(),
                    kind: p.kind,
                    side: p.side,
                    has_moved: p.has_moved,
                })
                .collect(),
        }
    }

    /// Validate and rebuild the board this state describes.
    pub(crate) fn rebuild(&self) -> Result<Board, RestoreError> {
        let mut pieces = Vec::with_capacity(self.pieces.len());
        for saved in &self.pieces {
            let square = Square::new(saved.file, saved.rank).ok_or(
                RestoreError::SquareOutOfBounds {
                    file: saved.file,
                    rank: saved.rank,
                },
            )?;
            let mut piece = Piece::new(saved.kind, saved.side, square);
            piece.has_moved = saved.has_moved;
            pieces.push(piece);
        }

        let mut board = Board::from_pieces(pieces, self.side_to_move)?;
        board.halfmove_clock = self.halfmove_clock;

        if let Some((file, rank)) = self.en_passant_target {
            let target =
                Square::new(file, rank).ok_or(RestoreError::SquareOutOfBounds { file, rank })?;
            let victim = self
                .en_passant_victim
                .and_then(|(vf, vr)| Square::new(vf, vr))
                .and_then(|sq| board.piece_at(sq))
                .filter(|&id| {
                    let piece = board.piece(id);
                    piece.kind == PieceKind::Pawn
                        && piece.side == self.side_to_move.opponent()
                        && piece.square.rank() == piece.side.double_step_rank()
                })
                .ok_or(RestoreError::InvalidEnPassant { target })?;
            board.en_passant_target = Some(target);
            board.en_passant_victim = Some(victim);
        }

        for (index, entry) in self.history.iter().enumerate() {
            let mut entries = Vec::with_capacity(entry.len());
            for piece in entry {
                let square = Square::new(piece.file, piece.rank)
                    .ok_or(RestoreError::CorruptHistory { entry: index })?;
                entries.push((square, piece.kind, piece.side));
            }
            board
                .position_history
                .push(PositionSnapshot::from_entries(entries));
        }

        Ok(board)
    }
}
