//! Phase state machine: ATTACK → DEFENSE → round end → redeal, until DONE.

use crate::domain::rules::max_attacks_for;
use crate::domain::state::{Game, Phase, PlayerId, PlayerStatus};
use crate::errors::domain::DomainError;

/// Advance the game after a move has been applied.
///
/// 1. With the deck empty, players holding no cards go OUT.
/// 2. With at most one player left, the game is DONE.
/// 3. Otherwise the ATTACK or DEFENSE rules pick the next actor, or end the round.
pub fn advance_phase(game: &mut Game) -> Result<(), DomainError> {
    if game.deck.is_empty() {
        mark_empty_hands_out(game);
    }

    if game.players_remaining <= 1 {
        game.phase = Phase::Done;
        return Ok(());
    }

    match game.phase {
        Phase::Attack => advance_from_attack(game),
        Phase::Defense => advance_from_defense(game),
        Phase::Done => Err(DomainError::internal(format!(
            "Cannot advance a finished game with {} players remaining",
            game.players_remaining
        ))),
    }
}

fn advance_from_attack(game: &mut Game) -> Result<(), DomainError> {
    if game.attacks_remaining == 0 {
        return end_round(game);
    }

    if game.last_attacker != game.attacker {
        hand_attack_to(game, game.next_attacker());
        return Ok(());
    }

    // Every attacker has had a turn since the last cards went down.
    if game.defending_player().status == PlayerStatus::Surrendered {
        if game.battlefield.is_full() || !attackers_hold_cards(game) {
            return end_round(game);
        }
        hand_attack_to(game, game.next_attacker());
    } else if game.battlefield.has_open_slots() {
        game.phase = Phase::Defense;
    } else if !attackers_hold_cards(game) {
        return end_round(game);
    } else {
        hand_attack_to(game, game.next_attacker());
    }
    Ok(())
}

/// Whether any player other than the defender can still add to the field.
fn attackers_hold_cards(game: &Game) -> bool {
    game.players
        .iter()
        .enumerate()
        .any(|(id, p)| id != game.defender && !p.is_out() && !p.hand.is_empty())
}

fn advance_from_defense(game: &mut Game) -> Result<(), DomainError> {
    if game.battlefield.is_full() || game.defending_player().is_out() {
        return end_round(game);
    }

    game.phase = Phase::Attack;
    if game.attacking_player().is_out() {
        hand_attack_to(game, game.next_attacker());
    }
    Ok(())
}

/// Close the round: the field goes to a surrendering defender or to the
/// discard, roles rotate, and hands are topped up.
pub fn end_round(game: &mut Game) -> Result<(), DomainError> {
    game.require_player(game.defender, "end_round")?;

    let defender = game.defender;
    let field_cards = game.battlefield.clear();
    let surrendered = game.players[defender].status == PlayerStatus::Surrendered;

    let mut attacker = if surrendered {
        game.players[defender].hand.extend(field_cards);
        game.next_active(defender)
    } else if game.players[defender].is_out() {
        game.next_active(defender)
    } else {
        defender
    };

    redeal(game);
    if game.deck.is_empty() {
        mark_empty_hands_out(game);
    }
    if game.players_remaining <= 1 {
        game.phase = Phase::Done;
        return Ok(());
    }
    if game.players[attacker].is_out() {
        attacker = game.next_active(attacker);
    }
    let defender = game.next_active(attacker);

    for player in game.players.iter_mut().filter(|p| !p.is_out()) {
        player.status = PlayerStatus::Idle;
    }
    game.players[attacker].status = PlayerStatus::Attacking;
    game.players[defender].status = PlayerStatus::Defending;

    game.attacker = attacker;
    game.defender = defender;
    game.last_attacker = attacker;
    game.phase = Phase::Attack;
    game.battlefield.max_attacks = max_attacks_for(game.players[defender].hand.len());
    game.attacks_remaining = game.players_remaining.saturating_sub(1);
    Ok(())
}

/// Top hands up to six cards, one player at a time in seat order starting
/// at the last attacker, stopping as soon as the deck runs dry.
pub fn redeal(game: &mut Game) {
    let n = game.players.len();
    let start = game.last_attacker % n;
    for offset in 0..n {
        if game.deck.is_empty() {
            return;
        }
        let seat = (start + offset) % n;
        let player = &mut game.players[seat];
        if player.is_out() {
            continue;
        }
        let wanted = player.shortfall();
        for _ in 0..wanted {
            let Some(card) = game.deck.pop_front() else {
                return;
            };
            player.hand.push(card);
        }
    }
}

fn mark_empty_hands_out(game: &mut Game) {
    for player in game.players.iter_mut() {
        if !player.is_out() && player.hand.is_empty() {
            player.status = PlayerStatus::Out;
            game.players_remaining = game.players_remaining.saturating_sub(1);
        }
    }
    game.attacks_remaining = game
        .attacks_remaining
        .min(game.players_remaining.saturating_sub(1));
}

fn hand_attack_to(game: &mut Game, next: PlayerId) {
    let current = game.attacker;
    if game.players[current].status == PlayerStatus::Attacking {
        game.players[current].status = PlayerStatus::Idle;
    }
    game.attacker = next;
    if !game.players[next].is_out() && next != game.defender {
        game.players[next].status = PlayerStatus::Attacking;
    }
}
