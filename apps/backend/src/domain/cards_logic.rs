//! Card comparison under a trump suit.
//!
//! The trump suit is always passed in explicitly; each game carries its own.

use super::cards_types::{Card, Suit};

/// Outcome of comparing two cards under a trump suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Beats {
    /// The first card beats the second.
    First,
    /// The second card beats the first.
    Second,
    /// Neither card beats the other.
    Incomparable,
}

pub fn compare(a: Card, b: Card, trump: Suit) -> Beats {
    let a_trump = a.suit == trump;
    let b_trump = b.suit == trump;
    if a_trump && !b_trump {
        return Beats::First;
    }
    if b_trump && !a_trump {
        return Beats::Second;
    }
    if a.suit != b.suit {
        return Beats::Incomparable;
    }
    match a.rank.cmp(&b.rank) {
        std::cmp::Ordering::Greater => Beats::First,
        std::cmp::Ordering::Less => Beats::Second,
        // Only reachable for identical cards
        std::cmp::Ordering::Equal => Beats::Incomparable,
    }
}

/// True when `a` strictly beats `b`.
pub fn card_beats(a: Card, b: Card, trump: Suit) -> bool {
    compare(a, b, trump) == Beats::First
}

pub fn hand_has_rank(hand: &[Card], rank: super::cards_types::Rank) -> bool {
    hand.iter().any(|c| c.rank == rank)
}
