//! Domain layer: pure game logic types and helpers.

pub mod attacks;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod defenses;

pub mod game_transition;
pub mod rules;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_game_transition;
#[cfg(test)]
mod tests_moves;

// Re-exports for ergonomics
pub use attacks::{apply_attack, legal_attacks, AttackMove};
pub use cards_logic::{card_beats, compare, hand_has_rank, Beats};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{full_deck, Card, Rank, Suit};
pub use dealing::deal_game;
pub use defenses::{apply_defense, legal_defenses, DefenseMove};
pub use game_transition::advance_phase;
pub use snapshot::GameSnapshot;
pub use state::{AttackSlot, Battlefield, Game, Phase, Player, PlayerId, PlayerStatus};
