pub mod game;

pub use game::{
    Board, BoardBuilder, DrawReason, GameEvent, GameSession, GameStatus, Piece, PieceId,
    PieceKind, SaveState, SearchParams, Side, Square, SquareSet,
};
pub use game::{best_move, AiMove};
