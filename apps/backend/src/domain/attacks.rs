//! Attack-phase moves: enumeration and application.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::game_transition::advance_phase;
use crate::domain::state::{AttackSlot, Game, Phase};
use crate::domain::{Card, Rank};
use crate::errors::domain::DomainError;

/// What the active attacker does on their turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttackMove {
    /// Decline to add cards. Only offered once the field has cards on it.
    Pass,
    /// Put these cards, all of one rank, on the field in order.
    Play(Vec<Card>),
}

/// Enumerate the distinct legal attacks for the active attacker.
///
/// Cards are grouped by rank (ascending), each group in hand order. Every
/// candidate for a group contains the group's first card; each later card is
/// independently included or left out, and candidates larger than the open
/// capacity are discarded. `Pass` comes first whenever the field is non-empty.
pub fn legal_attacks(game: &Game) -> Vec<AttackMove> {
    if game.phase != Phase::Attack {
        return Vec::new();
    }

    let field = &game.battlefield;
    let mut moves = Vec::new();
    if !field.is_empty() {
        moves.push(AttackMove::Pass);
    }

    let capacity = field.open_capacity();
    if capacity == 0 {
        return moves;
    }

    let valid_ranks = field.valid_ranks();
    let mut groups: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
    for &card in &game.attacking_player().hand {
        if valid_ranks.is_empty() || valid_ranks.contains(&card.rank) {
            groups.entry(card.rank).or_default().push(card);
        }
    }

    for group in groups.values() {
        let Some((&first, rest)) = group.split_first() else {
            continue;
        };
        let mut current = vec![first];
        extend_with_subsets(rest, capacity, &mut current, &mut moves);
    }

    moves
}

fn extend_with_subsets(
    rest: &[Card],
    capacity: usize,
    current: &mut Vec<Card>,
    out: &mut Vec<AttackMove>,
) {
    if current.len() > capacity {
        return;
    }
    let Some((&next, tail)) = rest.split_first() else {
        out.push(AttackMove::Play(current.clone()));
        return;
    };

    extend_with_subsets(tail, capacity, current, out);

    current.push(next);
    extend_with_subsets(tail, capacity, current, out);
    current.pop();
}

/// Apply an attack move for the active attacker, then advance the phase.
///
/// An attacker with no cards left only advances the phase: the field and the
/// pass counter are untouched. Cards beyond the open capacity are not placed
/// and stay in the attacker's hand.
pub fn apply_attack(game: &mut Game, mv: &AttackMove) -> Result<Phase, DomainError> {
    game.require_phase(Phase::Attack, "apply_attack")?;
    game.require_player(game.attacker, "apply_attack")?;

    let attacker = game.attacker;
    match mv {
        _ if game.players[attacker].hand.is_empty() => {}
        AttackMove::Pass => {
            game.attacks_remaining = game.attacks_remaining.saturating_sub(1);
        }
        AttackMove::Play(cards) => {
            let capacity = game.battlefield.open_capacity();
            let mut placed = 0;
            for &card in cards.iter().take(capacity) {
                if !game.players[attacker].take_card(card) {
                    return Err(DomainError::internal(format!(
                        "Attack card {card} is not in player {attacker}'s hand"
                    )));
                }
                game.battlefield.slots.push(AttackSlot::open(card));
                placed += 1;
            }
            if placed > 0 {
                game.attacks_remaining = game.players_remaining.saturating_sub(1);
                game.last_attacker = attacker;
            } else {
                game.attacks_remaining = game.attacks_remaining.saturating_sub(1);
            }
        }
    }

    advance_phase(game)?;
    Ok(game.phase)
}

const PASS_TOKEN: &str = "pass";

impl Serialize for AttackMove {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            AttackMove::Pass => serializer.serialize_str(PASS_TOKEN),
            AttackMove::Play(cards) => cards.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AttackMoveWire {
    Sentinel(String),
    Cards(Vec<Card>),
}

impl<'de> Deserialize<'de> for AttackMove {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match AttackMoveWire::deserialize(deserializer)? {
            AttackMoveWire::Sentinel(s) if s == PASS_TOKEN => Ok(AttackMove::Pass),
            AttackMoveWire::Sentinel(s) => Err(serde::de::Error::custom(format!(
                "Invalid attack sentinel: {s}"
            ))),
            AttackMoveWire::Cards(cards) if cards.is_empty() => {
                Err(serde::de::Error::custom("Attack must play at least one card"))
            }
            AttackMoveWire::Cards(cards) => Ok(AttackMove::Play(cards)),
        }
    }
}
