//! Search-backed AI player.

use std::sync::Mutex;

use rand::prelude::*;

use super::config::SearchConfig;
use super::mcts::{decide_attack, decide_defense};
use super::trait_def::{AiError, AiPlayer};
use crate::domain::{AttackMove, DefenseMove, Game};

/// AI that picks moves by Monte-Carlo tree search under a time budget.
pub struct MctsPlayer {
    config: SearchConfig,
    rng: Mutex<StdRng>,
}

impl MctsPlayer {
    pub const NAME: &'static str = "MctsPlayer";
    pub const VERSION: &'static str = "1.0.0";

    pub const fn name() -> &'static str {
        Self::NAME
    }

    pub const fn version() -> &'static str {
        Self::VERSION
    }

    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed() {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn lock_rng(&self) -> Result<std::sync::MutexGuard<'_, StdRng>, AiError> {
        self.rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))
    }
}

impl AiPlayer for MctsPlayer {
    fn choose_attack(&self, game: &Game) -> Result<AttackMove, AiError> {
        let mut rng = self.lock_rng()?;
        decide_attack(game, &self.config, &mut *rng)
    }

    fn choose_defense(&self, game: &Game) -> Result<DefenseMove, AiError> {
        let mut rng = self.lock_rng()?;
        decide_defense(game, &self.config, &mut *rng)
    }
}
