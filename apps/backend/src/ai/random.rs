//! Random AI player - makes random legal moves.
//!
//! [`RandomPlayer`] is the baseline opponent for self-play and the simplest
//! implementation of the [`AiPlayer`](super::AiPlayer) trait: it locks its
//! RNG, asks the move generator for the legal set and picks uniformly.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer};
use crate::domain::{legal_attacks, legal_defenses, AttackMove, DefenseMove, Game, Phase};

/// AI that makes random legal moves.
///
/// ```rust,ignore
/// // Non-deterministic (uses system entropy)
/// let random_ai = RandomPlayer::new(None);
///
/// // Deterministic (uses seed for reproducible behavior)
/// let seeded_ai = RandomPlayer::new(Some(12345));
/// ```
pub struct RandomPlayer {
    /// `AiPlayer` methods take `&self`, the RNG needs `&mut`.
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    pub const fn name() -> &'static str {
        Self::NAME
    }

    pub const fn version() -> &'static str {
        Self::VERSION
    }

    /// `Some(seed)` for reproducible play, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_attack(&self, game: &Game) -> Result<AttackMove, AiError> {
        let mut view = game.clone();
        view.phase = Phase::Attack;
        let legal = legal_attacks(&view);

        // Nothing to play and nothing on the field: the only move is to pass.
        if legal.is_empty() {
            return Ok(AttackMove::Pass);
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        legal
            .choose(&mut *rng)
            .cloned()
            .ok_or_else(|| AiError::Internal("Failed to choose random attack".into()))
    }

    fn choose_defense(&self, game: &Game) -> Result<DefenseMove, AiError> {
        let mut view = game.clone();
        view.phase = Phase::Defense;
        let legal = legal_defenses(&view);

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        legal
            .choose(&mut *rng)
            .cloned()
            .ok_or_else(|| AiError::InvalidMove("No legal defenses available".into()))
    }
}
