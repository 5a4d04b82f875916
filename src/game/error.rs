//! Error types for building and restoring game state.

use std::fmt;

use super::types::{Side, Square};

/// Error type for invalid position construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A side has no king.
    MissingKing { side: Side },
    /// A side has more than one king.
    DuplicateKing { side: Side },
    /// Two pieces were placed on the same square.
    OccupiedSquare { square: Square },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingKing { side } => {
                write!(f, "{side} has no king")
            }
            BuildError::DuplicateKing { side } => {
                write!(f, "{side} has more than one king")
            }
            BuildError::OccupiedSquare { square } => {
                write!(f, "two pieces share square {square}")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Error type for rejecting a corrupt or inconsistent saved game.
///
/// The caller decides the fallback (typically a fresh game); the engine
/// only reports why the data cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    /// A piece coordinate falls outside the board.
    SquareOutOfBounds { file: i8, rank: i8 },
    /// The piece list violates a board invariant.
    InvalidPosition { source: BuildError },
    /// An en passant target is recorded without a matching pawn.
    InvalidEnPassant { target: Square },
    /// A history entry references a coordinate outside the board.
    CorruptHistory { entry: usize },
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreError::SquareOutOfBounds { file, rank } => {
                write!(f, "square ({file}, {rank}) is outside the board")
            }
            RestoreError::InvalidPosition { source } => {
                write!(f, "invalid position: {source}")
            }
            RestoreError::InvalidEnPassant { target } => {
                write!(f, "en passant target {target} has no capturable pawn")
            }
            RestoreError::CorruptHistory { entry } => {
                write!(f, "position history entry {entry} is corrupt")
            }
        }
    }
}

impl std::error::Error for RestoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RestoreError::InvalidPosition { source } => Some(source),
            _ => None,
        }
    }
}

impl From<BuildError> for RestoreError {
    fn from(source: BuildError) -> Self {
        RestoreError::InvalidPosition { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_king_message() {
        let err = BuildError::MissingKing { side: Side::White };
        assert!(err.to_string().contains("White"));
        assert!(err.to_string().contains("no king"));
    }

    #[test]
    fn test_occupied_square_message() {
        let err = BuildError::OccupiedSquare {
            square: Square::new(5, 4).unwrap(),
        };
        assert!(err.to_string().contains("e4"));
    }

    #[test]
    fn test_restore_wraps_build_error() {
        let err: RestoreError = BuildError::DuplicateKing { side: Side::Black }.into();
        assert!(err.to_string().contains("Black"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = RestoreError::SquareOutOfBounds { file: 9, rank: 1 };
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn test_error_equality() {
        let a = RestoreError::CorruptHistory { entry: 3 };
        let b = RestoreError::CorruptHistory { entry: 3 };
        assert_eq!(a, b);
    }
}
