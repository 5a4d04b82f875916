//! King movement and castling availability.

use once_cell::sync::Lazy;

use crate::game::board::Board;
use crate::game::types::{Piece, PieceId, PieceKind, Side, Square, SquareSet};

const STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// On-board step targets, precomputed per square.
static TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    std::array::from_fn(|idx| {
        let from = Square::from_index(idx);
        STEPS
            .iter()
            .filter_map(|&(df, dr)| from.offset(df, dr))
            .collect()
    })
});

/// Step targets minus squares held by friendly pieces.
#[must_use]
pub(crate) fn raw_steps(board: &Board, piece: &Piece) -> Vec<Square> {
    TARGETS[piece.square.index()]
        .iter()
        .copied()
        .filter(|&sq| !board.side_occupies(piece.side, sq))
        .collect()
}

/// Every on-board step target, occupied or not.
#[must_use]
pub(crate) fn attack_squares(piece: &Piece) -> Vec<Square> {
    TARGETS[piece.square.index()].clone()
}

/// The king's own square when it stands next to the enemy king.
#[must_use]
pub(crate) fn menacing_squares(piece: &Piece, enemy_king: Square) -> Vec<Square> {
    if TARGETS[piece.square.index()].contains(&enemy_king) {
        vec![piece.square]
    } else {
        Vec::new()
    }
}

/// One castling wing: the rook involved and both destinations.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CastlingMove {
    pub rook: PieceId,
    pub king_to: Square,
    pub rook_to: Square,
}

/// Castling availability for one side, derived fresh per query and never
/// cached across turns.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CastlingAvailability {
    pub queenside: Option<CastlingMove>,
    pub kingside: Option<CastlingMove>,
}

/// Compute which castling moves are open to `side` right now.
///
/// Requirements per wing: the king has never moved, the wing rook stands
/// on its original square unmoved, the squares between them are empty,
/// and neither the king's current square nor any square it crosses or
/// lands on is attacked. The queenside b-file square only needs to be
/// empty; the rook may pass through an attacked square.
#[must_use]
pub(crate) fn castling_availability(
    board: &Board,
    side: Side,
    enemy_attacks: SquareSet,
) -> CastlingAvailability {
    let mut availability = CastlingAvailability::default();

    let king = board.piece(board.king(side));
    let back = side.back_rank();
    if king.has_moved || king.square != Square::new(5, back).expect("king home square") {
        return availability;
    }
    let king_home = king.square;
    if enemy_attacks.contains(king_home) {
        return availability;
    }

    let file_square = |file: i8| Square::new(file, back).expect("back rank square");
    let wing_rook = |file: i8| -> Option<PieceId> {
        board.piece_at(file_square(file)).filter(|&id| {
            let piece = board.piece(id);
            piece.kind == PieceKind::Rook && piece.side == side && !piece.has_moved
        })
    };

    if let Some(rook) = wing_rook(1) {
        let clear = board.square_empty(file_square(2))
            && board.square_empty(file_square(3))
            && board.square_empty(file_square(4));
        let safe =
            !enemy_attacks.contains(file_square(3)) && !enemy_attacks.contains(file_square(4));
        if clear && safe {
            availability.queenside = Some(CastlingMove {
                rook,
                king_to: file_square(3),
                rook_to: file_square(4),
            });
        }
    }

    if let Some(rook) = wing_rook(8) {
        let clear = board.square_empty(file_square(6)) && board.square_empty(file_square(7));
        let safe =
            !enemy_attacks.contains(file_square(6)) && !enemy_attacks.contains(file_square(7));
        if clear && safe {
            availability.kingside = Some(CastlingMove {
                rook,
                king_to: file_square(7),
                rook_to: file_square(6),
            });
        }
    }

    availability
}
