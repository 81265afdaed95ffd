//! Card parsing from string tokens (e.g., "AS", "10H", "6C")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

impl Rank {
    pub const fn token(self) -> &'static str {
        match self {
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl Suit {
    pub const fn token(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.token(), self.suit.token())
    }
}

fn parse_error(s: &str) -> DomainError {
    DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s:?}"))
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || !(2..=3).contains(&s.len()) {
            return Err(parse_error(s));
        }
        let (rank_str, suit_str) = s.split_at(s.len() - 1);
        let rank = match rank_str {
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(parse_error(s)),
        };
        let suit = match suit_str {
            "C" => Suit::Clubs,
            "D" => Suit::Diamonds,
            "S" => Suit::Spades,
            "H" => Suit::Hearts,
            _ => return Err(parse_error(s)),
        };
        Ok(Card { suit, rank })
    }
}

/// Non-panicking helper to parse card tokens into Card instances.
/// Returns the first parse failure if any token is invalid.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
