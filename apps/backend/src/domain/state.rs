use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::domain::rules::HAND_TOP_UP;
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

pub type PlayerId = usize;

/// Game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// The active attacker chooses cards to play, or passes.
    Attack,
    /// The defender covers every open slot, or surrenders.
    Defense,
    /// At most one player still holds cards.
    Done,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    /// In the game but without a role this round.
    #[default]
    Idle,
    Attacking,
    Defending,
    /// Defender gave up this round and will collect the field.
    Surrendered,
    /// Shed every card with the deck empty; finished (a win).
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub hand: Vec<Card>,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(hand: Vec<Card>) -> Self {
        Self {
            hand,
            status: PlayerStatus::Idle,
        }
    }

    pub fn is_out(&self) -> bool {
        self.status == PlayerStatus::Out
    }

    /// Remove `card` from the hand, returning whether it was held.
    pub fn take_card(&mut self, card: Card) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Cards still needed to reach the top-up size.
    pub fn shortfall(&self) -> usize {
        HAND_TOP_UP.saturating_sub(self.hand.len())
    }
}

/// One attacking card and, once covered, the card that beat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackSlot {
    pub attacking: Card,
    pub defending: Option<Card>,
}

impl AttackSlot {
    pub fn open(attacking: Card) -> Self {
        Self {
            attacking,
            defending: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.defending.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Battlefield {
    pub slots: Vec<AttackSlot>,
    pub max_attacks: usize,
}

impl Battlefield {
    pub fn new(max_attacks: usize) -> Self {
        Self {
            slots: Vec::with_capacity(max_attacks),
            max_attacks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.max_attacks
    }

    /// Slots an attacker may still fill this round.
    pub fn open_capacity(&self) -> usize {
        self.max_attacks.saturating_sub(self.slots.len())
    }

    pub fn has_open_slots(&self) -> bool {
        self.slots.iter().any(AttackSlot::is_open)
    }

    pub fn open_slot_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_open())
            .map(|(i, _)| i)
            .collect()
    }

    /// Ranks of every attacking and defending card on the field.
    /// Empty only when the field is empty, meaning any rank may lead.
    pub fn valid_ranks(&self) -> BTreeSet<Rank> {
        let mut ranks = BTreeSet::new();
        for slot in &self.slots {
            ranks.insert(slot.attacking.rank);
            if let Some(d) = slot.defending {
                ranks.insert(d.rank);
            }
        }
        ranks
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots
            .iter()
            .flat_map(|s| std::iter::once(s.attacking).chain(s.defending))
    }

    /// Empty the field, returning every card that was on it.
    pub fn clear(&mut self) -> Vec<Card> {
        let cards: Vec<Card> = self.cards().collect();
        self.slots.clear();
        cards
    }
}

/// Entire game container, sufficient for move generation, transitions and search.
///
/// Every clone is a fully independent copy; search nodes and rollouts each own one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub attacker: PlayerId,
    pub defender: PlayerId,
    /// Most recent player to put cards on the field; dealing after the round starts here.
    pub last_attacker: PlayerId,
    /// Undealt cards; the front is drawn first, the trump card sits at the back.
    pub deck: VecDeque<Card>,
    pub battlefield: Battlefield,
    pub players: Vec<Player>,
    pub players_remaining: usize,
    /// Consecutive passes still allowed before the round ends.
    pub attacks_remaining: usize,
    pub phase: Phase,
    pub trump: Suit,
    /// Player whose outcome rollouts score. Only meaningful during search.
    pub perspective: PlayerId,
}

impl Game {
    pub fn attacking_player(&self) -> &Player {
        &self.players[self.attacker]
    }

    pub fn defending_player(&self) -> &Player {
        &self.players[self.defender]
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Every card held by players, on the field, or in the deck.
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.battlefield.cards().count()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    /// Next player clockwise from `p` that is not OUT.
    pub fn next_active(&self, p: PlayerId) -> PlayerId {
        let n = self.players.len();
        let mut next = (p + 1) % n;
        for _ in 0..n {
            if !self.players[next].is_out() {
                return next;
            }
            next = (next + 1) % n;
        }
        // Everybody is out; fall back to the plain neighbour.
        (p + 1) % n
    }

    /// Next player clockwise from the current attacker that may attack:
    /// not OUT and not the defender.
    pub fn next_attacker(&self) -> PlayerId {
        let n = self.players.len();
        let mut next = self.attacker;
        for _ in 0..n {
            next = self.next_active(next);
            if next != self.defender {
                return next;
            }
        }
        self.attacker
    }

    pub fn require_player(&self, p: PlayerId, ctx: &'static str) -> Result<(), DomainError> {
        if p < self.players.len() {
            Ok(())
        } else {
            Err(DomainError::internal(format!(
                "Invariant violated: player index {p} out of range ({ctx})"
            )))
        }
    }

    pub fn require_phase(&self, phase: Phase, ctx: &'static str) -> Result<(), DomainError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(DomainError::internal(format!(
                "Expected {phase:?}, game is in {:?} ({ctx})",
                self.phase
            )))
        }
    }
}
