//! Deterministic dealing of a fresh game.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::full_deck;
use crate::domain::rules::{max_attacks_for, HAND_TOP_UP, MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::state::{Battlefield, Game, Phase, Player, PlayerStatus};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Deal a new game deterministically from `seed`.
///
/// Six cards go to each player round-robin; the bottom card of the remaining
/// deck fixes the trump suit. The opening attacker is drawn from the same
/// generator and the defender sits to their left.
pub fn deal_game(player_count: usize, seed: u64) -> Result<Game, DomainError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!("Player count must be {MIN_PLAYERS}..={MAX_PLAYERS}, got {player_count}"),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut cards = full_deck();
    cards.shuffle(&mut rng);
    let mut deck: VecDeque<Card> = cards.into();

    let mut players: Vec<Player> = (0..player_count).map(|_| Player::new(Vec::new())).collect();
    for _ in 0..HAND_TOP_UP {
        for player in players.iter_mut() {
            if let Some(card) = deck.pop_front() {
                player.hand.push(card);
            }
        }
    }

    let trump = deck
        .back()
        .or_else(|| players.last().and_then(|p| p.hand.last()))
        .map(|c| c.suit)
        .ok_or_else(|| DomainError::internal("Dealt an empty deck"))?;

    let attacker = rng.random_range(0..player_count);
    let defender = (attacker + 1) % player_count;
    players[attacker].status = PlayerStatus::Attacking;
    players[defender].status = PlayerStatus::Defending;
    let max_attacks = max_attacks_for(players[defender].hand.len());

    Ok(Game {
        attacker,
        defender,
        last_attacker: attacker,
        deck,
        battlefield: Battlefield::new(max_attacks),
        players,
        players_remaining: player_count,
        attacks_remaining: player_count - 1,
        phase: Phase::Attack,
        trump,
        perspective: attacker,
    })
}
