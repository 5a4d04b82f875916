//! The authoritative board state.

use super::error::BuildError;
use super::snapshot::PositionSnapshot;
use super::types::{Piece, PieceId, PieceKind, Side, Square};

/// All pieces, the side to move, and the auxiliary flags that the rules
/// need (en passant, halfmove clock, position history).
///
/// Pieces live in a spawn-ordered `Vec` and are never reordered; captures
/// flag a piece rather than delete it, so [`PieceId`] handles stay valid
/// and the search can capture and un-capture without reallocation.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) pieces: Vec<Piece>,
    pub(crate) side_to_move: Side,
    pub(crate) white_king: PieceId,
    pub(crate) black_king: PieceId,
    /// Square a pawn may move to for an en passant capture.
    pub(crate) en_passant_target: Option<Square>,
    /// The pawn that just double-stepped and is capturable en passant.
    pub(crate) en_passant_victim: Option<PieceId>,
    /// Half-moves since the last capture or pawn move.
    pub(crate) halfmove_clock: u32,
    /// Completed positions, compared for threefold repetition.
    pub(crate) position_history: Vec<PositionSnapshot>,
}

/// Back-rank spawn order, file 1 to 8.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// The standard starting position, White to move.
    #[must_use]
    pub fn new() -> Self {
        let mut pieces = Vec::with_capacity(32);

        for side in Side::BOTH {
            let back = side.back_rank();
            let pawns = side.pawn_start_rank();
            for (i, &kind) in BACK_RANK.iter().enumerate() {
                let file = i as i8 + 1;
                let square = Square::new(file, back).expect("back rank square");
                pieces.push(Piece::new(kind, side, square));
            }
            for file in 1..=8 {
                let square = Square::new(file, pawns).expect("pawn rank square");
                pieces.push(Piece::new(PieceKind::Pawn, side, square));
            }
        }

        Board::from_pieces(pieces, Side::White).expect("starting position is valid")
    }

    /// Build a board from an explicit piece list.
    ///
    /// Validates the invariants the rest of the engine relies on: exactly
    /// one king per side and no two living pieces on one square.
    pub(crate) fn from_pieces(pieces: Vec<Piece>, side_to_move: Side) -> Result<Self, BuildError> {
        let mut white_king = None;
        let mut black_king = None;

        for (idx, piece) in pieces.iter().enumerate() {
            if piece.captured {
                continue;
            }
            for other in &pieces[idx + 1..] {
                if !other.captured && other.square == piece.square {
                    return Err(BuildError::OccupiedSquare {
                        square: piece.square,
                    });
                }
            }
            if piece.kind == PieceKind::King {
                let slot = match piece.side {
                    Side::White => &mut white_king,
                    Side::Black => &mut black_king,
                };
                if slot.is_some() {
                    return Err(BuildError::DuplicateKing { side: piece.side });
                }
                *slot = Some(PieceId(idx));
            }
        }

        let white_king = white_king.ok_or(BuildError::MissingKing { side: Side::White })?;
        let black_king = black_king.ok_or(BuildError::MissingKing { side: Side::Black })?;

        Ok(Board {
            pieces,
            side_to_move,
            white_king,
            black_king,
            en_passant_target: None,
            en_passant_victim: None,
            halfmove_clock: 0,
            position_history: Vec::new(),
        })
    }

    /// The side whose turn it is.
    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Half-moves since the last capture or pawn move.
    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// The active en passant target square, if any.
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    #[must_use]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.as_usize()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.as_usize()]
    }

    /// All pieces in spawn order, captured ones included.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .map(|(idx, piece)| (PieceId(idx), piece))
    }

    /// Living pieces of one side, in spawn order.
    pub fn living(&self, side: Side) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces()
            .filter(move |(_, p)| p.side == side && !p.captured)
    }

    /// Number of living pieces of one side.
    #[must_use]
    pub fn living_count(&self, side: Side) -> usize {
        self.living(side).count()
    }

    /// Whether a side still has a living queen.
    #[must_use]
    pub(crate) fn has_queen(&self, side: Side) -> bool {
        self.living(side).any(|(_, p)| p.kind == PieceKind::Queen)
    }

    /// The king of a side.
    #[inline]
    #[must_use]
    pub(crate) fn king(&self, side: Side) -> PieceId {
        match side {
            Side::White => self.white_king,
            Side::Black => self.black_king,
        }
    }

    /// The king's square.
    #[inline]
    #[must_use]
    pub fn king_square(&self, side: Side) -> Square {
        self.piece(self.king(side)).square
    }

    /// The living piece occupying a square, if any.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.pieces()
            .find(|(_, p)| !p.captured && p.square == square)
            .map(|(id, _)| id)
    }

    /// Whether a living piece of `side` occupies the square.
    #[must_use]
    pub(crate) fn side_occupies(&self, side: Side, square: Square) -> bool {
        self.pieces
            .iter()
            .any(|p| !p.captured && p.side == side && p.square == square)
    }

    /// Whether no living piece occupies the square.
    #[must_use]
    pub(crate) fn square_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Append a fresh piece (promotion), returning its id.
    pub(crate) fn spawn(&mut self, kind: PieceKind, side: Side, square: Square) -> PieceId {
        debug_assert!(kind != PieceKind::King, "kings are never spawned mid-game");
        let mut piece = Piece::new(kind, side, square);
        piece.has_moved = true;
        self.pieces.push(piece);
        PieceId(self.pieces.len() - 1)
    }

    /// Record the current position for threefold-repetition comparison.
    pub(crate) fn record_position(&mut self) {
        let snapshot = PositionSnapshot::capture(self);
        self.position_history.push(snapshot);
    }

    /// Drop the accumulated history (material changed; old positions can
    /// no longer repeat).
    pub(crate) fn clear_history(&mut self) {
        self.position_history.clear();
    }

    /// Whether any recorded position has occurred three times.
    ///
    /// Only consulted once more than five positions are on record.
    #[must_use]
    pub(crate) fn threefold_repetition(&self) -> bool {
        let history = &self.position_history;
        if history.len() <= 5 {
            return false;
        }
        for i in 0..history.len() - 1 {
            let mut repetitions = 0;
            for later in &history[i + 1..] {
                if history[i] == *later {
                    repetitions += 1;
                    if repetitions == 2 {
                        return true;
                    }
                }
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
