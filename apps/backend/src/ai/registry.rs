//! How to register your AI
//!
//! 1) Implement `AiPlayer` for your type in its module.
//! 2) Add a new `AiFactory` entry to the static list with stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed ⇒ same behavior (where applicable).

use crate::ai::{AiPlayer, MctsPlayer, RandomPlayer, SearchConfig};

/// Factory definition for constructing AI implementations.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn AiPlayer + Send + Sync>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
    AiFactory {
        name: MctsPlayer::NAME,
        version: MctsPlayer::VERSION,
        make: make_mcts_player,
    },
];

/// Returns the statically registered AI factories.
pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Finds a registered AI factory by its name.
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|factory| factory.name == name)
}

fn make_random_player(seed: Option<u64>) -> Box<dyn AiPlayer + Send + Sync> {
    Box::new(RandomPlayer::new(seed))
}

fn make_mcts_player(seed: Option<u64>) -> Box<dyn AiPlayer + Send + Sync> {
    let config = SearchConfig {
        seed,
        ..SearchConfig::default()
    };
    Box::new(MctsPlayer::new(config))
}
