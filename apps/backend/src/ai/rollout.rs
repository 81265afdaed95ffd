//! Uniform move type over both phases, and random playouts to the end.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::domain::{
    apply_attack, apply_defense, legal_attacks, legal_defenses, AttackMove, DefenseMove, Game,
    Phase, PlayerId,
};
use crate::errors::domain::DomainError;

/// A move in whichever phase is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    Attack(AttackMove),
    Defense(DefenseMove),
}

/// Every move available in the current phase.
///
/// An attacker facing an empty field with no cards is handed a `Pass`, which
/// only advances the phase, so only a finished game yields no moves.
pub fn legal_moves(game: &Game) -> Vec<Move> {
    match game.phase {
        Phase::Attack => {
            let moves = legal_attacks(game);
            if moves.is_empty() {
                vec![Move::Attack(AttackMove::Pass)]
            } else {
                moves.into_iter().map(Move::Attack).collect()
            }
        }
        Phase::Defense => legal_defenses(game).into_iter().map(Move::Defense).collect(),
        Phase::Done => Vec::new(),
    }
}

pub fn apply_move(game: &mut Game, mv: &Move) -> Result<Phase, DomainError> {
    match mv {
        Move::Attack(mv) => apply_attack(game, mv),
        Move::Defense(mv) => apply_defense(game, mv),
    }
}

/// Whether `player` finished by shedding every card.
pub fn has_won(game: &Game, player: PlayerId) -> bool {
    game.players.get(player).is_some_and(|p| p.is_out())
}

/// Play uniformly random legal moves on a copy of `game` until it is DONE,
/// returning whether `perspective` won.
///
/// Hitting `move_limit` first counts as a loss.
pub fn play_out<R: Rng + ?Sized>(
    game: &Game,
    perspective: PlayerId,
    move_limit: usize,
    rng: &mut R,
) -> Result<bool, DomainError> {
    if game.is_done() {
        return Ok(has_won(game, perspective));
    }

    let mut sim = game.clone();
    for _ in 0..move_limit {
        let moves = legal_moves(&sim);
        let Some(mv) = moves.choose(rng) else {
            break;
        };
        apply_move(&mut sim, mv)?;
        if sim.is_done() {
            return Ok(has_won(&sim, perspective));
        }
    }
    Ok(false)
}
