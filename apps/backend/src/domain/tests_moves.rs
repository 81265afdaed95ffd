use crate::domain::state::{Phase, PlayerStatus};
use crate::domain::test_state_helpers::{cards, table};
use crate::domain::{
    apply_attack, apply_defense, legal_attacks, legal_defenses, AttackMove, DefenseMove, Rank, Suit,
};

fn play(tokens: &[&str]) -> AttackMove {
    AttackMove::Play(cards(tokens))
}

#[test]
fn trump_of_same_suit_covers_lower_trump() {
    let game = table(&[&["8C"], &["7H"]], Suit::Hearts)
        .with_field(&[("6H", None)])
        .in_phase(Phase::Defense);

    let moves = legal_defenses(&game);
    assert_eq!(
        moves,
        vec![
            DefenseMove::Surrender,
            DefenseMove::Defend(vec![Some(cards(&["7H"])[0])]),
        ]
    );
}

#[test]
fn plain_card_cannot_cover_trump() {
    let game = table(&[&["8C"], &["7S"]], Suit::Hearts)
        .with_field(&[("6H", None)])
        .in_phase(Phase::Defense);

    assert_eq!(legal_defenses(&game), vec![DefenseMove::Surrender]);
}

#[test]
fn opening_attack_groups_by_rank_with_first_card_forced() {
    let game = table(&[&["6H", "6S", "7H"], &["AC", "AD", "AS", "KC", "KD", "KS"]], Suit::Clubs);

    let moves = legal_attacks(&game);
    assert!(!moves.contains(&AttackMove::Pass), "no pass on an empty field");
    assert!(moves.contains(&play(&["6H"])));
    assert!(moves.contains(&play(&["6H", "6S"])));
    assert!(moves.contains(&play(&["7H"])));
    // Subsets without the group's first card are never offered.
    assert!(!moves.contains(&play(&["6S"])));
    assert_eq!(moves.len(), 3);
}

#[test]
fn follow_up_attacks_match_field_ranks_and_offer_pass_first() {
    let game = table(
        &[&["6C", "9D", "9S", "KH"], &["AC", "AD", "AS", "KC", "KD", "KS"]],
        Suit::Hearts,
    )
    .with_field(&[("9H", Some("JH"))]);

    let moves = legal_attacks(&game);
    assert_eq!(moves[0], AttackMove::Pass);
    assert!(moves.contains(&play(&["9D"])));
    assert!(moves.contains(&play(&["9D", "9S"])));
    assert!(moves.iter().all(|m| match m {
        AttackMove::Pass => true,
        AttackMove::Play(played) => played.iter().all(|c| c.rank == Rank::Nine),
    }));
    assert_eq!(moves.len(), 3);
}

#[test]
fn attack_candidates_respect_open_capacity() {
    let mut game = table(&[&["6C", "6D", "6S"], &["AC", "AD"]], Suit::Hearts);
    assert_eq!(game.battlefield.max_attacks, 2);

    let moves = legal_attacks(&game);
    assert!(moves.iter().all(|m| match m {
        AttackMove::Pass => true,
        AttackMove::Play(c) => c.len() <= 2,
    }));
    assert!(!moves.contains(&play(&["6C", "6D", "6S"])));

    game.battlefield.max_attacks = 0;
    assert!(legal_attacks(&game).is_empty());
}

#[test]
fn defenses_use_each_card_once_across_slots() {
    // Either club covers 6C; only AD covers 7D.
    let game = table(&[&["9S"], &["7C", "8C", "AD"]], Suit::Spades)
        .with_field(&[("6C", None), ("7D", None)])
        .in_phase(Phase::Defense);

    let moves = legal_defenses(&game);
    let c = |t: &str| Some(cards(&[t])[0]);
    assert_eq!(
        moves,
        vec![
            DefenseMove::Surrender,
            DefenseMove::Defend(vec![c("7C"), c("AD")]),
            DefenseMove::Defend(vec![c("8C"), c("AD")]),
        ]
    );
}

#[test]
fn defenses_skip_covered_slots() {
    let game = table(&[&["9S"], &["7C", "8C"]], Suit::Spades)
        .with_field(&[("6D", Some("7D")), ("6C", None)])
        .in_phase(Phase::Defense);

    let moves = legal_defenses(&game);
    for mv in moves.iter().skip(1) {
        let DefenseMove::Defend(slots) = mv else {
            panic!("expected an assignment, got {mv:?}");
        };
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0], None);
        assert!(slots[1].is_some());
    }
    assert_eq!(moves.len(), 3);
}

#[test]
fn duplicate_candidate_exhaustion_yields_surrender_only() {
    // One trump must cover two slots.
    let game = table(&[&["9S"], &["AH", "6C"]], Suit::Hearts)
        .with_field(&[("7D", None), ("8D", None)])
        .in_phase(Phase::Defense);

    assert_eq!(legal_defenses(&game), vec![DefenseMove::Surrender]);
}

#[test]
fn generators_are_phase_specific() {
    let game = table(&[&["6C"], &["7C"]], Suit::Hearts);
    assert!(legal_defenses(&game).is_empty());
    let game = game.with_field(&[("6D", None)]).in_phase(Phase::Defense);
    assert!(legal_attacks(&game).is_empty());
}

#[test]
fn played_attack_moves_cards_and_hands_to_defense() {
    let mut game = table(&[&["6C", "6D", "9S"], &["7C", "8D", "AH"]], Suit::Hearts);

    let phase = apply_attack(&mut game, &play(&["6C", "6D"])).unwrap();

    assert_eq!(phase, Phase::Defense);
    assert_eq!(game.players[0].hand, cards(&["9S"]));
    assert_eq!(game.battlefield.len(), 2);
    assert!(game.battlefield.slots.iter().all(|s| s.is_open()));
    assert_eq!(game.last_attacker, 0);
    assert_eq!(game.attacks_remaining, 1);
}

#[test]
fn attack_beyond_capacity_keeps_excess_in_hand() {
    let mut game = table(&[&["6C", "6D", "6S"], &["7C", "8D"]], Suit::Hearts);
    game.battlefield.max_attacks = 2;

    apply_attack(&mut game, &play(&["6C", "6D", "6S"])).unwrap();

    assert_eq!(game.battlefield.len(), 2);
    assert_eq!(game.players[0].hand, cards(&["6S"]));
    assert_eq!(game.card_count(), 5);
}

#[test]
fn attack_with_card_not_in_hand_is_internal_error() {
    let mut game = table(&[&["6C"], &["7C"]], Suit::Hearts);
    let err = apply_attack(&mut game, &play(&["6D"])).unwrap_err();
    assert!(!err.is_validation());
}

#[test]
fn pass_counts_down_and_ends_round_when_exhausted() {
    let mut game = table(&[&["9S", "10S"], &["7C", "8D"]], Suit::Hearts)
        .with_field(&[("6C", Some("7C"))])
        .with_deck(&["AC", "AD", "AS"]);
    game.players[1].hand = cards(&["8D"]);

    let phase = apply_attack(&mut game, &AttackMove::Pass).unwrap();

    // Two players: one pass exhausts the counter; defender held, so roles swap.
    assert_eq!(phase, Phase::Attack);
    assert!(game.battlefield.is_empty());
    assert_eq!(game.attacker, 1);
    assert_eq!(game.defender, 0);
    assert_eq!(game.players[1].status, PlayerStatus::Attacking);
    assert_eq!(game.players[0].status, PlayerStatus::Defending);
}

#[test]
fn surrender_marks_defender_and_lets_attackers_pile_on() {
    let mut game = table(
        &[&["6D", "9S"], &["7C", "8D"], &["6S", "KH"]],
        Suit::Hearts,
    )
    .with_field(&[("6C", None)])
    .in_phase(Phase::Defense);

    let phase = apply_defense(&mut game, &DefenseMove::Surrender).unwrap();

    assert_eq!(phase, Phase::Attack);
    assert_eq!(game.players[1].status, PlayerStatus::Surrendered);
    assert_eq!(game.players[1].hand.len(), 2);
}

#[test]
fn defend_fills_slots_and_returns_to_attack() {
    let mut game = table(&[&["6D", "9S"], &["7C", "8D", "AH"]], Suit::Hearts)
        .with_field(&[("6C", None)])
        .in_phase(Phase::Defense);

    let c = |t: &str| Some(cards(&[t])[0]);
    let phase = apply_defense(&mut game, &DefenseMove::Defend(vec![c("7C")])).unwrap();

    assert_eq!(phase, Phase::Attack);
    assert_eq!(game.battlefield.slots[0].defending, c("7C"));
    assert_eq!(game.players[1].hand, cards(&["8D", "AH"]));
}

#[test]
fn defense_onto_covered_slot_is_internal_error() {
    let mut game = table(&[&["6D"], &["7C", "8C"]], Suit::Hearts)
        .with_field(&[("6C", Some("AC"))])
        .in_phase(Phase::Defense);
    let c = |t: &str| Some(cards(&[t])[0]);

    assert!(apply_defense(&mut game, &DefenseMove::Defend(vec![c("7C")])).is_err());
}

#[test]
fn move_wire_tokens() {
    assert_eq!(serde_json::to_string(&AttackMove::Pass).unwrap(), "\"pass\"");
    assert_eq!(
        serde_json::to_string(&play(&["10H", "10S"])).unwrap(),
        "[\"10H\",\"10S\"]"
    );
    assert_eq!(
        serde_json::to_string(&DefenseMove::Surrender).unwrap(),
        "\"surrender\""
    );
    let defend = DefenseMove::Defend(vec![None, Some(cards(&["AS"])[0])]);
    assert_eq!(serde_json::to_string(&defend).unwrap(), "[null,\"AS\"]");

    let parsed: DefenseMove = serde_json::from_str("[null,\"AS\"]").unwrap();
    assert_eq!(parsed, defend);
    assert!(serde_json::from_str::<AttackMove>("\"fold\"").is_err());
}
