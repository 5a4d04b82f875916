//! The game state machine.
//!
//! A [`GameSession`] owns the board and drives turns. External
//! collaborators (UI, persistence, network relay, the AI scheduler) call
//! [`select`](GameSession::select) /
//! [`apply_move`](GameSession::apply_move) /
//! [`choose_promotion`](GameSession::choose_promotion) and read the
//! returned [`GameEvent`]; there is no callback surface. Illegal input is
//! rejected with an empty set or `None` and never mutates state — the
//! caller is expected to only offer legal choices, but the engine does
//! not trust it to.

use super::board::Board;
use super::check::{self, CheckContext};
use super::snapshot::SaveState;
use super::types::{Piece, PieceId, PieceKind, Side, Square, SquareSet};

#[cfg(feature = "logging")]
use log::debug;

/// Why a game ended in a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// The same position occurred three times.
    Repetition,
    /// 150 half-moves without a capture or pawn move.
    SeventyFiveMoves,
    /// Neither side can deliver checkmate with the remaining material.
    InsufficientMaterial,
}

/// Where the game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// The game is running; the board's side to move may act.
    InProgress,
    /// A pawn reached the far rank; turn advancement is suspended until
    /// [`GameSession::choose_promotion`] supplies a piece kind.
    AwaitingPromotion(Side),
    /// Terminal: `winner` delivered checkmate.
    Checkmate { winner: Side },
    /// Terminal: drawn.
    Drawn(DrawReason),
}

/// What a completed operation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The move was applied; play continues.
    Moved,
    /// The move was applied and a promotion choice is now required.
    PromotionPending(Side),
    /// The move was applied and left `side` in check.
    Check(Side),
    /// The move ended the game; `side` wins.
    Checkmate(Side),
    /// The move ended the game in a draw.
    Draw(DrawReason),
}

/// A running game: board, derived check state, and turn bookkeeping.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    check: CheckContext,
    status: GameStatus,
    active: Option<PieceId>,
    pending_promotion: Option<PieceId>,
}

impl GameSession {
    /// Start a fresh game from the standard position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Wrap an arbitrary board (builder positions, restored games) and
    /// derive the game status from it.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        let check = CheckContext::compute(&board);
        let mut session = GameSession {
            board,
            check,
            status: GameStatus::InProgress,
            active: None,
            pending_promotion: None,
        };
        session.status = session.position_status();
        session
    }

    /// The underlying board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current game status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether `side`'s king is currently attacked.
    #[must_use]
    pub fn in_check(&self, side: Side) -> bool {
        self.check.in_check(side)
    }

    /// Select the piece on `square` and return its legal destinations.
    ///
    /// Empty when the game is over, the square is empty, or the piece
    /// does not belong to the side to move. No board mutation.
    pub fn select(&mut self, square: Square) -> SquareSet {
        if self.status != GameStatus::InProgress {
            return SquareSet::EMPTY;
        }
        let Some(id) = self.board.piece_at(square) else {
            self.active = None;
            return SquareSet::EMPTY;
        };
        if self.board.piece(id).side != self.board.side_to_move() {
            self.active = None;
            return SquareSet::EMPTY;
        }
        self.active = Some(id);
        check::legal_destinations(&self.board, &self.check, id)
            .into_iter()
            .collect()
    }

    /// Clear the current selection.
    pub fn deselect(&mut self) {
        self.active = None;
    }

    /// Move the selected piece to `to`.
    ///
    /// Returns `None` (and changes nothing) without a selection or when
    /// `to` is not a legal destination of the selected piece.
    pub fn apply_move(&mut self, to: Square) -> Option<GameEvent> {
        if self.status != GameStatus::InProgress {
            return None;
        }
        let id = self.active?;
        if !check::legal_destinations(&self.board, &self.check, id).contains(&to) {
            return None;
        }

        let mover = *self.board.piece(id);
        self.board.halfmove_clock += 1;

        let mut ep_armed = false;
        let mut promotion = false;

        match mover.kind {
            PieceKind::Pawn => {
                self.capture_en_passant(to);
                ep_armed = self.arm_en_passant(id, &mover, to);
                if to.rank() == mover.side.promotion_rank() {
                    promotion = true;
                    self.board.clear_history();
                }
                self.board.halfmove_clock = 0;
            }
            PieceKind::King => self.execute_castling(&mover, to),
            _ => {}
        }

        // An ordinary capture on the destination square.
        if let Some(victim) = self.board.piece_at(to) {
            debug_assert!(self.board.piece(victim).side != mover.side);
            self.board.piece_mut(victim).captured = true;
            self.board.halfmove_clock = 0;
            self.board.clear_history();
        }

        let piece = self.board.piece_mut(id);
        piece.square = to;
        piece.has_moved = true;

        #[cfg(feature = "logging")]
        debug!("{} {} {} -> {}", mover.side, mover.kind, mover.square, to);

        if promotion {
            self.status = GameStatus::AwaitingPromotion(mover.side);
            self.pending_promotion = Some(id);
            return Some(GameEvent::PromotionPending(mover.side));
        }

        self.board.record_position();
        Some(self.advance_turn(ep_armed))
    }

    /// Resolve a pending promotion with the chosen piece kind.
    ///
    /// Returns `None` when no promotion is pending or for a
    /// non-promotable kind (pawn, king).
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Option<GameEvent> {
        let GameStatus::AwaitingPromotion(side) = self.status else {
            return None;
        };
        if !kind.is_promotable() {
            return None;
        }
        let pawn = self.pending_promotion?;
        let square = self.board.piece(pawn).square;

        self.board.piece_mut(pawn).captured = true;
        self.board.spawn(kind, side, square);

        #[cfg(feature = "logging")]
        debug!("{side} promotes to {kind} on {square}");

        self.status = GameStatus::InProgress;
        self.board.record_position();
        Some(self.advance_turn(false))
    }

    /// If the move is an en passant capture, remove the victim pawn.
    fn capture_en_passant(&mut self, to: Square) {
        if self.board.en_passant_target != Some(to) {
            return;
        }
        if let Some(victim) = self.board.en_passant_victim {
            self.board.piece_mut(victim).captured = true;
        }
        self.board.en_passant_target = None;
        self.board.en_passant_victim = None;
    }

    /// A first-move double step arms en passant for exactly one reply.
    fn arm_en_passant(&mut self, id: PieceId, mover: &Piece, to: Square) -> bool {
        if mover.has_moved || to.rank() != mover.side.double_step_rank() {
            return false;
        }
        let behind = to.offset(0, -mover.side.pawn_direction());
        self.board.en_passant_target = behind;
        self.board.en_passant_victim = Some(id);
        true
    }

    /// A king move of two files is a castle: relocate the wing rook.
    fn execute_castling(&mut self, mover: &Piece, to: Square) {
        if mover.has_moved || (to.file() - mover.square.file()).abs() != 2 {
            return;
        }
        let back = mover.side.back_rank();
        let (rook_from, rook_to) = if to.file() == 3 {
            (Square::new(1, back), Square::new(4, back))
        } else {
            (Square::new(8, back), Square::new(6, back))
        };
        let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) else {
            return;
        };
        if let Some(rook) = self.board.piece_at(rook_from) {
            let rook_piece = self.board.piece_mut(rook);
            rook_piece.square = rook_to;
            rook_piece.has_moved = true;
        }
    }

    /// Flip the turn and re-derive check state and game status.
    fn advance_turn(&mut self, ep_armed: bool) -> GameEvent {
        if !ep_armed {
            self.board.en_passant_target = None;
            self.board.en_passant_victim = None;
        }
        self.active = None;
        self.pending_promotion = None;
        self.board.side_to_move = self.board.side_to_move.opponent();

        self.check = CheckContext::compute(&self.board);
        self.status = self.position_status();

        let event = match self.status {
            GameStatus::Checkmate { winner } => GameEvent::Checkmate(winner),
            GameStatus::Drawn(reason) => GameEvent::Draw(reason),
            _ if self.check.in_check(self.board.side_to_move) => {
                GameEvent::Check(self.board.side_to_move)
            }
            _ => GameEvent::Moved,
        };

        #[cfg(feature = "logging")]
        match event {
            GameEvent::Checkmate(winner) => debug!("checkmate, {winner} wins"),
            GameEvent::Draw(reason) => debug!("draw: {reason:?}"),
            GameEvent::Check(side) => debug!("{side} is in check"),
            _ => {}
        }

        event
    }

    /// Evaluate checkmate, stalemate and the draw rules for the side to
    /// move, without touching the board.
    fn position_status(&self) -> GameStatus {
        let mover = self.board.side_to_move;

        if !check::side_has_legal_move(&self.board, &self.check, mover) {
            if self.check.in_check(mover) {
                return GameStatus::Checkmate {
                    winner: mover.opponent(),
                };
            }
            return GameStatus::Drawn(DrawReason::Stalemate);
        }

        if self.board.halfmove_clock >= 150 {
            return GameStatus::Drawn(DrawReason::SeventyFiveMoves);
        }

        if self.board.threefold_repetition() {
            return GameStatus::Drawn(DrawReason::Repetition);
        }

        if self.insufficient_material() {
            return GameStatus::Drawn(DrawReason::InsufficientMaterial);
        }

        GameStatus::InProgress
    }

    /// Material with which neither side can force mate. Only consulted
    /// when both sides are down to three or fewer living pieces.
    fn insufficient_material(&self) -> bool {
        if self.board.living_count(Side::White) > 3 || self.board.living_count(Side::Black) > 3 {
            return false;
        }

        let extras = |side: Side| -> Vec<(PieceKind, Square)> {
            self.board
                .living(side)
                .filter(|(_, p)| p.kind != PieceKind::King)
                .map(|(_, p)| (p.kind, p.square))
                .collect()
        };
        let white = extras(Side::White);
        let black = extras(Side::Black);

        let lone_minor = |extra: &[(PieceKind, Square)]| {
            matches!(
                extra,
                [(PieceKind::Knight, _)] | [(PieceKind::Bishop, _)]
            )
        };
        let two_knights = |extra: &[(PieceKind, Square)]| {
            matches!(extra, [(PieceKind::Knight, _), (PieceKind::Knight, _)])
        };

        match (white.as_slice(), black.as_slice()) {
            // King against king.
            ([], []) => true,
            // King and one minor piece against a bare king.
            (extra, []) | ([], extra) if lone_minor(extra) || two_knights(extra) => true,
            // Bishops bound to the same square colour.
            ([(PieceKind::Bishop, wb)], [(PieceKind::Bishop, bb)]) => wb.parity() == bb.parity(),
            _ => false,
        }
    }

    /// Serialize the full game state for save files or network transfer.
    #[must_use]
    pub fn snapshot(&self) -> SaveState {
        SaveState::capture(&self.board)
    }

    /// Rebuild a session from persisted state.
    ///
    /// Corrupt data is reported, never repaired; the caller owns the
    /// fallback (typically a fresh game).
    pub fn restore(state: &SaveState) -> Result<Self, super::error::RestoreError> {
        let board = state.rebuild()?;
        Ok(Self::from_board(board))
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
