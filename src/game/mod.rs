//! Chess rules engine and fixed-depth minimax opponent.
//!
//! The engine is a piece-list implementation of the full chess rules:
//! legal-move generation under check constraints, castling, en passant,
//! promotion, and the draw rules (stalemate, 75-move, threefold
//! repetition, insufficient material). A [`GameSession`] owns the board
//! and drives turns; [`best_move`] searches the current position for an
//! automated opponent.
//!
//! # Example
//! ```
//! use chess_rules::game::{GameSession, Square};
//!
//! let mut game = GameSession::new();
//! let destinations = game.select(Square::new(5, 2).unwrap());
//! assert!(!destinations.is_empty());
//! ```

mod board;
mod builder;
mod check;
mod error;
mod movement;
mod pst;
mod search;
mod session;
mod snapshot;
mod types;

#[cfg(test)]
mod tests;

pub use board::Board;
pub use builder::BoardBuilder;
pub use error::{BuildError, RestoreError};
pub use search::{best_move, AiMove, SearchParams};
pub use session::{DrawReason, GameEvent, GameSession, GameStatus};
pub use snapshot::{HistoryPiece, PositionSnapshot, SaveState, SavedPiece};
pub use types::{Direction, DirectionSet, Piece, PieceId, PieceKind, Side, Square, SquareSet};
