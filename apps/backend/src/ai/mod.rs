//! AI player module - picks attack and defense moves.
//!
//! This module provides:
//! - the `AiPlayer` trait and its error type
//! - Monte-Carlo tree search (`decide_attack`, `decide_defense`) and random rollouts
//! - `MctsPlayer` and `RandomPlayer`, plus a static registry of both

pub mod config;
pub mod mcts;
mod mcts_player;
mod random;
pub mod registry;
pub mod rollout;
mod trait_def;

pub use config::SearchConfig;
pub use mcts::{decide_attack, decide_defense, search, SearchReport};
pub use mcts_player::MctsPlayer;
pub use random::RandomPlayer;
pub use rollout::{legal_moves, play_out, Move};
use serde_json::Value as JsonValue;
pub use trait_def::{AiError, AiPlayer};

/// Create an AI player from ai_type string and optional config.
///
/// Accepts the registry names as well as the short forms `"mcts"` and
/// `"random"`. For MCTS the whole config is read as a [`SearchConfig`]; the
/// random player only looks at `seed`.
///
/// Returns None if ai_type is unrecognized.
pub fn create_ai(ai_type: &str, config: Option<&JsonValue>) -> Option<Box<dyn AiPlayer>> {
    match ai_type {
        "random" | RandomPlayer::NAME => {
            let seed = config.and_then(|c| c.get("seed")).and_then(|s| s.as_u64());
            Some(Box::new(RandomPlayer::new(seed)))
        }
        "mcts" | MctsPlayer::NAME => {
            Some(Box::new(MctsPlayer::new(SearchConfig::from_json(config))))
        }
        _ => None,
    }
}
