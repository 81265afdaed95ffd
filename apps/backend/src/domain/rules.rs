//! Table constants shared by dealing, transitions and ingress validation.

/// Hands are topped up to this many cards after each round.
pub const HAND_TOP_UP: usize = 6;

/// Hard ceiling on attack slots in a round.
pub const MAX_ATTACK_SLOTS: usize = 6;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// Cards in a Durak deck (six through ace, four suits).
pub const DECK_SIZE: usize = 36;

/// Attack slots for a round opening against a defender holding `hand_len` cards.
pub fn max_attacks_for(hand_len: usize) -> usize {
    MAX_ATTACK_SLOTS.min(hand_len)
}
