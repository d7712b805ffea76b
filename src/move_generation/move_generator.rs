use thiserror::Error;

use crate::chess_errors::{NotationError, TransitionError};
use crate::game_state::position::Position;
use crate::moves::move_descriptions::Move;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveGenerationError {
    #[error("generated move could not be applied: {0}")]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// A legal move paired with the position it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedMove {
    pub mv: Move,
    pub position_after_move: Position,
}

pub trait MoveGenerator: Send + Sync {
    /// Every legal move of the side to move. Empty means checkmate or
    /// stalemate.
    fn generate_legal_moves(&self, position: &Position) -> MoveGenResult<Vec<GeneratedMove>>;

    /// Whether the side to move's king is currently attacked.
    fn is_in_check(&self, position: &Position) -> bool;
}
