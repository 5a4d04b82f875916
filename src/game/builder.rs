//! Fluent builder for constructing board positions.
//!
//! Tests and the restore path create positions piece by piece instead of
//! parsing a text format.
//!
//! # Example
//! ```
//! use chess_rules::game::{BoardBuilder, PieceKind, Side, Square};
//!
//! let board = BoardBuilder::new()
//!     .piece(PieceKind::King, Side::White, Square::new(5, 1).unwrap())
//!     .piece(PieceKind::King, Side::Black, Square::new(5, 8).unwrap())
//!     .piece(PieceKind::Rook, Side::White, Square::new(1, 1).unwrap())
//!     .build()
//!     .unwrap();
//! ```

use super::board::Board;
use super::error::BuildError;
use super::types::{Piece, PieceKind, Side, Square};

/// A fluent builder for [`Board`] positions.
#[derive(Clone, Debug, Default)]
pub struct BoardBuilder {
    pieces: Vec<Piece>,
    side_to_move: Option<Side>,
    en_passant: Option<(Square, Square)>,
    halfmove_clock: u32,
}

impl BoardBuilder {
    /// Create an empty builder (White to move unless overridden).
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: None,
            en_passant: None,
            halfmove_clock: 0,
        }
    }

    /// Place a piece. The last placement on a square wins.
    ///
    /// Pieces placed off their home squares are treated as already moved
    /// (no castling, no pawn double step); use [`BoardBuilder::piece_unmoved`]
    /// to override.
    #[must_use]
    pub fn piece(self, kind: PieceKind, side: Side, square: Square) -> Self {
        self.place(kind, side, square, true)
    }

    /// Place a piece that has never moved.
    #[must_use]
    pub fn piece_unmoved(self, kind: PieceKind, side: Side, square: Square) -> Self {
        self.place(kind, side, square, false)
    }

    fn place(mut self, kind: PieceKind, side: Side, square: Square, has_moved: bool) -> Self {
        self.pieces.retain(|p| p.square != square);
        let mut piece = Piece::new(kind, side, square);
        piece.has_moved = has_moved;
        self.pieces.push(piece);
        self
    }

    /// Remove whatever is on a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|p| p.square != square);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub fn side_to_move(mut self, side: Side) -> Self {
        self.side_to_move = Some(side);
        self
    }

    /// Arm en passant: `target` is the capture destination, `victim` the
    /// square of the pawn that just double-stepped.
    #[must_use]
    pub fn en_passant(mut self, target: Square, victim: Square) -> Self {
        self.en_passant = Some((target, victim));
        self
    }

    /// Set the halfmove clock (half-moves since capture or pawn move).
    #[must_use]
    pub fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    /// Build the board, validating the engine invariants.
    pub fn build(self) -> Result<Board, BuildError> {
        let side = self.side_to_move.unwrap_or(Side::White);
        let mut board = Board::from_pieces(self.pieces, side)?;
        board.halfmove_clock = self.halfmove_clock;

        if let Some((target, victim_square)) = self.en_passant {
            let victim = board.piece_at(victim_square).filter(|&id| {
                let piece = board.piece(id);
                piece.kind == PieceKind::Pawn && piece.side != side
            });
            board.en_passant_target = Some(target);
            board.en_passant_victim = victim;
        }

        Ok(board)
    }
}
