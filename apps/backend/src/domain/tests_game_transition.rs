use crate::domain::game_transition::{end_round, redeal};
use crate::domain::rules::HAND_TOP_UP;
use crate::domain::state::{Phase, PlayerStatus};
use crate::domain::test_state_helpers::{cards, table};
use crate::domain::{advance_phase, apply_attack, apply_defense, AttackMove, DefenseMove, Suit};

#[test]
fn single_remaining_player_finishes_the_game_from_any_phase() {
    for phase in [Phase::Attack, Phase::Defense] {
        let mut game = table(&[&["6C"], &["7C"], &["8C"]], Suit::Hearts).in_phase(phase);
        game.players[0].status = PlayerStatus::Out;
        game.players[2].status = PlayerStatus::Out;
        game.players_remaining = 1;

        advance_phase(&mut game).unwrap();

        assert_eq!(game.phase, Phase::Done);
    }
}

#[test]
fn advancing_a_finished_game_is_internal_error() {
    let mut game = table(&[&["6C"], &["7C"]], Suit::Hearts).in_phase(Phase::Done);
    let err = advance_phase(&mut game).unwrap_err();
    assert!(!err.is_validation());
}

#[test]
fn empty_hands_go_out_once_the_deck_is_empty() {
    let mut game = table(&[&["6C"], &["7C", "8D"]], Suit::Hearts);

    let phase = apply_attack(&mut game, &AttackMove::Play(cards(&["6C"]))).unwrap();

    // The attacker shed the last card with no deck left: they are out and the
    // defender is the last player holding cards.
    assert_eq!(game.players[0].status, PlayerStatus::Out);
    assert_eq!(game.players_remaining, 1);
    assert_eq!(phase, Phase::Done);
}

#[test]
fn empty_hands_stay_in_while_the_deck_has_cards() {
    let mut game = table(&[&["6C"], &["7C", "8D"]], Suit::Hearts).with_deck(&["AS", "KS"]);

    let phase = apply_attack(&mut game, &AttackMove::Play(cards(&["6C"]))).unwrap();

    assert_eq!(phase, Phase::Defense);
    assert_eq!(game.players[0].status, PlayerStatus::Attacking);
    assert_eq!(game.players_remaining, 2);
}

#[test]
fn surrendering_defender_collects_field_and_is_skipped() {
    let mut game = table(&[&["9S"], &["7C"], &["QS"]], Suit::Hearts)
        .with_field(&[("6C", Some("7D")), ("6D", None)])
        .with_deck(&[
            "AC", "AD", "AS", "AH", "KC", "KD", "KS", "KH", "JC", "JD", "JS", "JH",
        ]);
    game.players[1].status = PlayerStatus::Surrendered;
    let before = game.card_count();

    end_round(&mut game).unwrap();

    assert!(game.battlefield.is_empty());
    // Defender picked up three field cards on top of 7C.
    assert_eq!(game.players[1].hand.len(), 4 + 2);
    assert_eq!(game.attacker, 2);
    assert_eq!(game.defender, 0);
    assert_eq!(game.players[2].status, PlayerStatus::Attacking);
    assert_eq!(game.players[0].status, PlayerStatus::Defending);
    assert_eq!(game.players[1].status, PlayerStatus::Idle);
    assert_eq!(game.phase, Phase::Attack);
    assert_eq!(game.last_attacker, 2);
    assert_eq!(game.attacks_remaining, 2);
    assert_eq!(game.card_count(), before);
}

#[test]
fn successful_defender_becomes_attacker() {
    let mut game = table(&[&["9S"], &["7C"], &["QS"]], Suit::Hearts)
        .with_field(&[("6C", Some("8C"))])
        .with_deck(&["AC", "AD", "AS"]);
    let before = game.card_count();

    end_round(&mut game).unwrap();

    assert_eq!(game.attacker, 1);
    assert_eq!(game.defender, 2);
    assert_eq!(game.card_count(), before - 2);
    assert_eq!(game.battlefield.max_attacks, game.players[2].hand.len().min(6));
}

#[test]
fn redeal_starts_at_last_attacker_and_stops_when_the_deck_runs_dry() {
    let mut game = table(&[&["6C"], &["7C"], &["8C"]], Suit::Hearts)
        .with_deck(&["AC", "AD", "AS", "AH", "KC", "KD", "KS"]);
    game.last_attacker = 2;

    redeal(&mut game);

    // Seat 2 draws five, seat 0 gets the remaining two, seat 1 gets nothing.
    assert_eq!(game.players[2].hand.len(), HAND_TOP_UP);
    assert_eq!(game.players[0].hand.len(), 3);
    assert_eq!(game.players[1].hand.len(), 1);
    assert!(game.deck.is_empty());
    assert_eq!(game.players[2].hand[1], cards(&["AC"])[0]);
}

#[test]
fn redeal_never_tops_up_an_oversized_hand() {
    let big = ["6C", "7C", "8C", "9C", "10C", "JC", "QC"];
    let mut game = table(&[&big, &["6D"]], Suit::Hearts).with_deck(&["AS", "KS"]);

    redeal(&mut game);

    assert_eq!(game.players[0].hand.len(), big.len());
    assert_eq!(game.players[1].hand.len(), 3);
}

#[test]
fn out_defender_passes_the_attack_along() {
    let mut game = table(&[&["9S"], &["7C"], &["QS", "KS"]], Suit::Hearts)
        .with_field(&[("6C", None)])
        .in_phase(Phase::Defense);

    // Defender covers with their last card and the deck is empty.
    let phase =
        apply_defense(&mut game, &DefenseMove::Defend(vec![Some(cards(&["7C"])[0])])).unwrap();

    assert_eq!(game.players[1].status, PlayerStatus::Out);
    assert_eq!(phase, Phase::Attack);
    assert_eq!(game.attacker, 2);
    assert_eq!(game.defender, 0);
    assert_eq!(game.players_remaining, 2);
}

#[test]
fn everyone_passing_ends_the_round() {
    let mut game = table(&[&["9S"], &["7D", "8D"], &["QS", "KS"]], Suit::Hearts)
        .with_field(&[("6C", Some("7C"))])
        .with_deck(&["AC", "AD", "AS", "AH"]);

    // Attacker 0 passes; attacker 2 passes; the round closes.
    assert_eq!(apply_attack(&mut game, &AttackMove::Pass).unwrap(), Phase::Attack);
    assert_eq!(game.attacker, 2);
    assert_eq!(game.attacks_remaining, 1);
    assert_eq!(game.players[2].status, PlayerStatus::Attacking);

    assert_eq!(apply_attack(&mut game, &AttackMove::Pass).unwrap(), Phase::Attack);
    assert!(game.battlefield.is_empty());
    assert_eq!(game.attacker, 1);
    assert_eq!(game.defender, 2);
}

#[test]
fn empty_handed_attacker_hands_on_without_spending_a_pass() {
    let mut game = table(&[&[], &["7D", "8D"], &["QS", "KS"]], Suit::Hearts)
        .with_field(&[("6C", Some("7C"))])
        .with_deck(&["AC", "AD", "AS", "AH"]);
    assert_eq!(game.attacks_remaining, 2);

    assert_eq!(apply_attack(&mut game, &AttackMove::Pass).unwrap(), Phase::Attack);
    assert_eq!(game.attacks_remaining, 2);
    assert_eq!(game.attacker, 2);
    assert_eq!(game.battlefield.len(), 1);

    // Only seat 2's passes count; the round still closes.
    apply_attack(&mut game, &AttackMove::Pass).unwrap();
    assert_eq!(game.attacker, 0);
    assert_eq!(game.attacks_remaining, 1);
    apply_attack(&mut game, &AttackMove::Pass).unwrap();
    assert_eq!(game.attacker, 2);
    apply_attack(&mut game, &AttackMove::Pass).unwrap();
    assert!(game.battlefield.is_empty());
    assert_eq!(game.attacker, 1);
    assert_eq!(game.defender, 2);
}

#[test]
fn round_ends_when_no_attacker_holds_cards() {
    let mut game = table(&[&[], &["7D", "8D"]], Suit::Hearts)
        .with_field(&[("6C", Some("7C"))])
        .with_deck(&["AC", "AD", "AS", "AH"]);

    let phase = apply_attack(&mut game, &AttackMove::Pass).unwrap();

    assert_eq!(phase, Phase::Attack);
    assert!(game.battlefield.is_empty());
    assert_eq!(game.attacker, 1);
    assert_eq!(game.defender, 0);
    assert_eq!(game.players[0].hand.len(), 4);
    assert!(game.deck.is_empty());
}
