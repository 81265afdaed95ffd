// Proptest generators for domain types.
// Game generators produce states reachable by legal play.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::{
    apply_attack, apply_defense, deal_game, legal_attacks, legal_defenses, AttackMove, Card, Game,
    Phase, Rank, Suit,
};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Spades),
        Just(Suit::Hearts),
    ]
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    proptest::sample::select(Rank::ALL.to_vec())
}

/// Generate a single Card
pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// Generate a freshly dealt game with 2..=6 players
pub fn dealt_game() -> impl Strategy<Value = Game> {
    (MIN_PLAYERS..=MAX_PLAYERS, any::<u64>()).prop_filter_map("deal failed", |(n, seed)| {
        deal_game(n, seed).ok()
    })
}

/// Generate a game reached by playing up to 120 uniformly random legal moves
/// from a fresh deal.
pub fn played_game() -> impl Strategy<Value = Game> {
    (dealt_game(), any::<u64>(), 0usize..120).prop_map(|(game, seed, steps)| {
        let mut rng = StdRng::seed_from_u64(seed);
        play_random(game, steps, &mut rng)
    })
}

/// Apply up to `steps` random legal moves, stopping early when the game ends.
pub fn play_random(mut game: Game, steps: usize, rng: &mut StdRng) -> Game {
    for _ in 0..steps {
        let applied = match game.phase {
            Phase::Attack => {
                let mv = legal_attacks(&game)
                    .choose(rng)
                    .cloned()
                    .unwrap_or(AttackMove::Pass);
                apply_attack(&mut game, &mv).is_ok()
            }
            Phase::Defense => match legal_defenses(&game).choose(rng).cloned() {
                Some(mv) => apply_defense(&mut game, &mv).is_ok(),
                None => false,
            },
            Phase::Done => false,
        };
        if !applied {
            break;
        }
    }
    game
}
