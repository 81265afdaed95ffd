//! AI player trait definition.

use std::fmt;

use crate::domain::{AttackMove, DefenseMove, Game};
use crate::errors::domain::DomainError;

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI failed to make a decision within timeout
    Timeout,
    /// AI encountered an internal error
    Internal(String),
    /// AI produced an invalid move
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Timeout => write!(f, "AI decision timeout"),
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<DomainError> for AiError {
    fn from(err: DomainError) -> Self {
        AiError::Internal(err.to_string())
    }
}

/// Trait for AI players.
///
/// Implementations receive the full game and must return a move from the
/// legal set for the phase in question. They never mutate the caller's game.
pub trait AiPlayer: Send + Sync {
    /// Choose a move for the active attacker.
    fn choose_attack(&self, game: &Game) -> Result<AttackMove, AiError>;

    /// Choose a move for the defender.
    fn choose_defense(&self, game: &Game) -> Result<DefenseMove, AiError>;
}
