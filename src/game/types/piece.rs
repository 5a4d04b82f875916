//! Piece kinds, sides, and the piece record owned by the board.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Square;

/// The six chess piece kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All kinds in index order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to.
    pub const PROMOTABLE: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Returns true for bishop, rook and queen.
    #[inline]
    #[must_use]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Returns true if this kind may be the result of a promotion.
    #[inline]
    #[must_use]
    pub fn is_promotable(self) -> bool {
        Self::PROMOTABLE.contains(&self)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        write!(f, "{name}")
    }
}

/// The two players.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Both sides in index order (White = 0, Black = 1).
    pub const BOTH: [Side; 2] = [Side::White, Side::Black];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// The opposing side.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Pawn forward direction along ranks (+1 for White, -1 for Black).
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_direction(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// The rank pawns start on (2 for White, 7 for Black).
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_start_rank(self) -> i8 {
        match self {
            Side::White => 2,
            Side::Black => 7,
        }
    }

    /// The rank a pawn promotes on (8 for White, 1 for Black).
    #[inline]
    #[must_use]
    pub(crate) const fn promotion_rank(self) -> i8 {
        match self {
            Side::White => 8,
            Side::Black => 1,
        }
    }

    /// The rank a pawn lands on after a double step (4 for White, 5 for
    /// Black); landing here on a first move arms en passant.
    #[inline]
    #[must_use]
    pub(crate) const fn double_step_rank(self) -> i8 {
        match self {
            Side::White => 4,
            Side::Black => 5,
        }
    }

    /// The home rank of king and rooks (1 for White, 8 for Black).
    #[inline]
    #[must_use]
    pub(crate) const fn back_rank(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => 8,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Stable handle to a piece in the board's spawn-ordered collection.
///
/// Ids stay valid for the lifetime of a game: captured pieces are
/// retained (flagged) rather than deleted, so search can capture and
/// un-capture without invalidating handles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    #[inline]
    #[must_use]
    pub(crate) const fn as_usize(self) -> usize {
        self.0
    }
}

/// A piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub square: Square,
    /// Gates castling eligibility and the pawn double step.
    pub has_moved: bool,
    /// Logically removed but retained in the collection.
    pub captured: bool,
}

impl Piece {
    #[must_use]
    pub(crate) fn new(kind: PieceKind, side: Side, square: Square) -> Self {
        Piece {
            kind,
            side,
            square,
            has_moved: false,
            captured: false,
        }
    }
}
