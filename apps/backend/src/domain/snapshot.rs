//! Wire snapshot of a game, as the table client exports it, and its
//! validated conversion into a [`Game`].
//!
//! Validation happens here, once. Move generation and transitions trust
//! the resulting `Game`.

use std::collections::{HashSet, VecDeque};

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::state::{AttackSlot, Battlefield, Game, Phase, Player, PlayerStatus};
use crate::domain::{card_beats, full_deck, Card, Rank};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackSnapshot {
    pub attacking: Card,
    #[serde(default)]
    pub defending: Option<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlefieldSnapshot {
    #[serde(default)]
    pub attacks: Vec<AttackSnapshot>,
    pub max_attacks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub hand: Vec<Card>,
    /// Absent or null means the player has no role this round.
    #[serde(default, deserialize_with = "status_or_idle")]
    pub status: PlayerStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub attacking_player: usize,
    pub defending_player: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attacker: Option<usize>,
    /// Undealt cards in draw order. Takes precedence over `deck_size`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<Vec<Card>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_size: Option<usize>,
    pub battlefield: BattlefieldSnapshot,
    pub players: Vec<PlayerSnapshot>,
    pub players_remaining: usize,
    pub trump_card: Card,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
}

fn status_or_idle<'de, D>(deserializer: D) -> Result<PlayerStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<PlayerStatus>::deserialize(deserializer)?.unwrap_or_default())
}

fn invalid(kind: ValidationKind, detail: impl Into<String>) -> DomainError {
    DomainError::validation(kind, detail)
}

impl GameSnapshot {
    /// Validate the snapshot and build a [`Game`] from it.
    ///
    /// When only `deckSize` is known, the hidden deck is filled with cards
    /// sampled from those not visible anywhere in the snapshot, with the
    /// trump card at the bottom.
    pub fn into_game<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Game, DomainError> {
        let player_count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(invalid(
                ValidationKind::InvalidPlayerCount,
                format!("Expected {MIN_PLAYERS}..={MAX_PLAYERS} players, got {player_count}"),
            ));
        }

        let last_attacker = self.last_attacker.unwrap_or(self.attacking_player);
        for (name, idx) in [
            ("attackingPlayer", self.attacking_player),
            ("defendingPlayer", self.defending_player),
            ("lastAttacker", last_attacker),
        ] {
            if idx >= player_count {
                return Err(invalid(
                    ValidationKind::InvalidPlayerIndex,
                    format!("{name} {idx} is out of range for {player_count} players"),
                ));
            }
        }
        if self.attacking_player == self.defending_player {
            return Err(invalid(
                ValidationKind::InvalidPlayerIndex,
                "attackingPlayer and defendingPlayer must differ",
            ));
        }

        for (role, idx) in [
            ("attackingPlayer", self.attacking_player),
            ("defendingPlayer", self.defending_player),
        ] {
            if self.players[idx].status == PlayerStatus::Out {
                return Err(invalid(
                    ValidationKind::InvalidPlayerIndex,
                    format!("{role} {idx} is already OUT"),
                ));
            }
        }
        if let Some(idx) = self
            .players
            .iter()
            .position(|p| p.status == PlayerStatus::Out && !p.hand.is_empty())
        {
            return Err(invalid(
                ValidationKind::Other,
                format!("Player {idx} is OUT but still holds cards"),
            ));
        }

        let active = self
            .players
            .iter()
            .filter(|p| p.status != PlayerStatus::Out)
            .count();
        if self.players_remaining != active {
            return Err(invalid(
                ValidationKind::Other,
                format!(
                    "playersRemaining is {} but {active} players are not OUT",
                    self.players_remaining
                ),
            ));
        }

        let field = &self.battlefield;
        if field.attacks.len() > field.max_attacks {
            return Err(invalid(
                ValidationKind::BattlefieldOverflow,
                format!(
                    "{} attacks on a field capped at {}",
                    field.attacks.len(),
                    field.max_attacks
                ),
            ));
        }

        let trump = self.trump_card.suit;
        for (slot, attack) in field.attacks.iter().enumerate() {
            if let Some(defending) = attack.defending {
                if !card_beats(defending, attack.attacking, trump) {
                    return Err(invalid(
                        ValidationKind::Other,
                        format!(
                            "Slot {slot}: {defending} does not beat {}",
                            attack.attacking
                        ),
                    ));
                }
            }
        }

        let phase = match self.phase.unwrap_or(Phase::Attack) {
            Phase::Done => {
                return Err(invalid(
                    ValidationKind::PhaseMismatch,
                    "A finished game has no move to decide",
                ))
            }
            phase => phase,
        };

        let mut seen = HashSet::new();
        let visible = self
            .players
            .iter()
            .flat_map(|p| p.hand.iter().copied())
            .chain(
                field
                    .attacks
                    .iter()
                    .flat_map(|a| std::iter::once(a.attacking).chain(a.defending)),
            )
            .chain(self.deck.iter().flatten().copied());
        for card in visible {
            if !seen.insert(card) {
                return Err(invalid(
                    ValidationKind::DuplicateCard,
                    format!("Card {card} appears more than once"),
                ));
            }
        }

        let deck: VecDeque<Card> = match (self.deck, self.deck_size) {
            (Some(deck), _) => deck.into(),
            (None, Some(0)) | (None, None) => VecDeque::new(),
            (None, Some(size)) => reconstruct_deck(size, self.trump_card, &seen, rng)?,
        };

        let players = self
            .players
            .into_iter()
            .map(|p| Player {
                hand: p.hand,
                status: p.status,
            })
            .collect();
        let battlefield = Battlefield {
            slots: field
                .attacks
                .iter()
                .map(|a| AttackSlot {
                    attacking: a.attacking,
                    defending: a.defending,
                })
                .collect(),
            max_attacks: field.max_attacks,
        };

        Ok(Game {
            attacker: self.attacking_player,
            defender: self.defending_player,
            last_attacker,
            deck,
            battlefield,
            players,
            players_remaining: self.players_remaining,
            attacks_remaining: self.players_remaining.saturating_sub(1),
            phase,
            trump: self.trump_card.suit,
            perspective: self.attacking_player,
        })
    }
}

fn reconstruct_deck<R: Rng + ?Sized>(
    size: usize,
    trump_card: Card,
    seen: &HashSet<Card>,
    rng: &mut R,
) -> Result<VecDeque<Card>, DomainError> {
    if seen.contains(&trump_card) {
        return Err(invalid(
            ValidationKind::DuplicateCard,
            format!("Trump card {trump_card} is visible outside the deck"),
        ));
    }
    let hidden = size - 1;
    let pool = full_deck()
        .into_iter()
        .filter(|c| *c != trump_card && !seen.contains(c));
    let mut sampled = pool.choose_multiple(rng, hidden);
    if sampled.len() < hidden {
        return Err(invalid(
            ValidationKind::Other,
            format!(
                "deckSize {size} exceeds the {} cards not visible in the snapshot",
                sampled.len() + 1
            ),
        ));
    }
    // Sampling keeps pool order; draw order must be random too.
    sampled.shuffle(rng);
    let mut deck: VecDeque<Card> = sampled.into();
    deck.push_back(trump_card);
    Ok(deck)
}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        GameSnapshot {
            attacking_player: game.attacker,
            defending_player: game.defender,
            last_attacker: Some(game.last_attacker),
            deck: Some(game.deck.iter().copied().collect()),
            deck_size: Some(game.deck.len()),
            battlefield: BattlefieldSnapshot {
                attacks: game
                    .battlefield
                    .slots
                    .iter()
                    .map(|s| AttackSnapshot {
                        attacking: s.attacking,
                        defending: s.defending,
                    })
                    .collect(),
                max_attacks: game.battlefield.max_attacks,
            },
            players: game
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    hand: p.hand.clone(),
                    status: p.status,
                })
                .collect(),
            players_remaining: game.players_remaining,
            // Once the deck is drawn out only the suit matters.
            trump_card: game
                .deck
                .back()
                .copied()
                .unwrap_or_else(|| Card::new(Rank::Six, game.trump)),
            phase: Some(game.phase),
        }
    }
}
