//! Defense-phase moves: enumeration and application.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::game_transition::advance_phase;
use crate::domain::state::{Game, Phase, PlayerStatus};
use crate::domain::{card_beats, Card};
use crate::errors::domain::DomainError;

/// What the defender does against the open attacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefenseMove {
    /// Give up and collect every card on the field at round end.
    Surrender,
    /// One entry per battlefield slot; `Some` covers that slot with the card.
    Defend(Vec<Option<Card>>),
}

impl DefenseMove {
    /// Cards this move puts on the field.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        let assigned: &[Option<Card>] = match self {
            DefenseMove::Surrender => &[],
            DefenseMove::Defend(slots) => slots,
        };
        assigned.iter().flatten().copied()
    }
}

/// Enumerate legal defenses: `Surrender` first, then every complete
/// assignment of distinct hand cards to the open slots.
///
/// Partial covers are never offered. If any open slot has no card able to
/// beat it, the result is `Surrender` alone. With no open slots the single
/// complete assignment is the empty one.
pub fn legal_defenses(game: &Game) -> Vec<DefenseMove> {
    if game.phase != Phase::Defense {
        return Vec::new();
    }

    let mut moves = vec![DefenseMove::Surrender];
    let field = &game.battlefield;
    let hand = &game.defending_player().hand;

    let open = field.open_slot_indices();
    let candidates: Vec<Vec<usize>> = open
        .iter()
        .map(|&slot| {
            let attacking = field.slots[slot].attacking;
            hand.iter()
                .enumerate()
                .filter(|&(_, &c)| card_beats(c, attacking, game.trump))
                .map(|(i, _)| i)
                .collect()
        })
        .collect();

    if candidates.iter().any(Vec::is_empty) {
        return moves;
    }

    let mut used = vec![false; hand.len()];
    let mut assignment = vec![None; field.len()];
    assign_slots(
        &open,
        &candidates,
        hand,
        &mut used,
        &mut assignment,
        &mut moves,
    );
    moves
}

fn assign_slots(
    open: &[usize],
    candidates: &[Vec<usize>],
    hand: &[Card],
    used: &mut [bool],
    assignment: &mut [Option<Card>],
    out: &mut Vec<DefenseMove>,
) {
    let Some((&slot, rest)) = open.split_first() else {
        out.push(DefenseMove::Defend(assignment.to_vec()));
        return;
    };
    let (choices, rest_candidates) = (&candidates[0], &candidates[1..]);

    for &i in choices {
        if used[i] {
            continue;
        }
        used[i] = true;
        assignment[slot] = Some(hand[i]);
        assign_slots(rest, rest_candidates, hand, used, assignment, out);
        assignment[slot] = None;
        used[i] = false;
    }
}

/// Apply a defense move for the defender, then advance the phase.
///
/// A defender with no cards left simply advances.
pub fn apply_defense(game: &mut Game, mv: &DefenseMove) -> Result<Phase, DomainError> {
    game.require_phase(Phase::Defense, "apply_defense")?;
    game.require_player(game.defender, "apply_defense")?;

    let defender = game.defender;
    if !game.players[defender].hand.is_empty() {
        match mv {
            DefenseMove::Surrender => {
                game.players[defender].status = PlayerStatus::Surrendered;
            }
            DefenseMove::Defend(slots) => {
                for (i, assigned) in slots.iter().enumerate() {
                    let Some(card) = *assigned else {
                        continue;
                    };
                    let Some(slot) = game.battlefield.slots.get_mut(i) else {
                        return Err(DomainError::internal(format!(
                            "Defense names slot {i} but the field has {} slots",
                            game.battlefield.slots.len()
                        )));
                    };
                    if slot.defending.is_some() {
                        return Err(DomainError::internal(format!(
                            "Slot {i} is already covered"
                        )));
                    }
                    if !game.players[defender].take_card(card) {
                        return Err(DomainError::internal(format!(
                            "Defense card {card} is not in player {defender}'s hand"
                        )));
                    }
                    slot.defending = Some(card);
                }
            }
        }
    }

    advance_phase(game)?;
    Ok(game.phase)
}

const SURRENDER_TOKEN: &str = "surrender";

impl Serialize for DefenseMove {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DefenseMove::Surrender => serializer.serialize_str(SURRENDER_TOKEN),
            DefenseMove::Defend(slots) => slots.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefenseMoveWire {
    Sentinel(String),
    Slots(Vec<Option<Card>>),
}

impl<'de> Deserialize<'de> for DefenseMove {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match DefenseMoveWire::deserialize(deserializer)? {
            DefenseMoveWire::Sentinel(s) if s == SURRENDER_TOKEN => Ok(DefenseMove::Surrender),
            DefenseMoveWire::Sentinel(s) => Err(serde::de::Error::custom(format!(
                "Invalid defense sentinel: {s}"
            ))),
            DefenseMoveWire::Slots(slots) => Ok(DefenseMove::Defend(slots)),
        }
    }
}
