//! Unit tests for the rules engine.

mod playouts;
mod search;
mod snapshot;

use super::builder::BoardBuilder;
use super::session::GameSession;
use super::types::{PieceKind, Side, Square};

/// Shorthand square constructor for tests.
pub(crate) fn sq(file: i8, rank: i8) -> Square {
    Square::new(file, rank).expect("test square on the board")
}

/// A builder pre-seeded with two far-apart kings.
pub(crate) fn kings(white: Square, black: Square) -> BoardBuilder {
    BoardBuilder::new()
        .piece(PieceKind::King, Side::White, white)
        .piece(PieceKind::King, Side::Black, black)
}

/// Build a session from a builder, panicking on an invalid position.
pub(crate) fn session(builder: BoardBuilder) -> GameSession {
    GameSession::from_board(builder.build().expect("valid test position"))
}
