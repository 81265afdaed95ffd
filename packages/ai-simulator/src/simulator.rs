//! In-memory self-play for Durak AIs.
//!
//! A [`Simulator`] deals a fresh game and asks each seat's AI for moves until
//! at most one player still holds cards, or a move ceiling is hit.

use durak_backend::ai::{AiError, AiPlayer};
use durak_backend::domain::{
    apply_attack, apply_defense, deal_game, AttackMove, DefenseMove, Game, Phase, PlayerId,
};

/// Per-seat move counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatStats {
    pub attacks: u32,
    pub passes: u32,
    pub defenses: u32,
    pub surrenders: u32,
}

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    /// Seats in the order they shed their last card
    pub finish_order: Vec<PlayerId>,
    /// The player left holding cards; `None` for a draw or an unfinished game
    pub durak: Option<PlayerId>,
    /// False when the move ceiling stopped the game
    pub completed: bool,
    pub moves: usize,
    pub seats: Vec<SeatStats>,
}

/// In-memory game simulator.
pub struct Simulator {
    game: Game,
    max_moves: usize,
    finish_order: Vec<PlayerId>,
    seats: Vec<SeatStats>,
    moves: usize,
}

impl Simulator {
    /// Deal a new game for `players` seats from `seed`.
    pub fn new(players: usize, seed: u64, max_moves: usize) -> Result<Self, SimulatorError> {
        let game = deal_game(players, seed)
            .map_err(|e| SimulatorError::DomainError(format!("Deal failed: {e}")))?;
        Ok(Self {
            game,
            max_moves,
            finish_order: Vec::new(),
            seats: vec![SeatStats::default(); players],
            moves: 0,
        })
    }

    /// Simulate a complete game, one AI per seat.
    pub fn simulate_game(mut self, ais: &[Box<dyn AiPlayer>]) -> Result<GameResult, SimulatorError> {
        if ais.len() != self.game.players.len() {
            return Err(SimulatorError::InvalidState(format!(
                "{} AIs for {} seats",
                ais.len(),
                self.game.players.len()
            )));
        }

        while !self.game.is_done() && self.moves < self.max_moves {
            match self.game.phase {
                Phase::Attack => self.play_attack(ais)?,
                Phase::Defense => self.play_defense(ais)?,
                Phase::Done => break,
            }
            self.moves += 1;
            self.record_finishers();
        }

        let completed = self.game.is_done();
        let durak = if completed {
            self.game.players.iter().position(|p| !p.is_out())
        } else {
            None
        };

        Ok(GameResult {
            finish_order: self.finish_order,
            durak,
            completed,
            moves: self.moves,
            seats: self.seats,
        })
    }

    fn play_attack(&mut self, ais: &[Box<dyn AiPlayer>]) -> Result<(), SimulatorError> {
        let seat = self.game.attacker;
        let mv = ais[seat]
            .choose_attack(&self.game)
            .map_err(|e| SimulatorError::AiError(seat, "attack", e))?;

        match mv {
            AttackMove::Pass => self.seats[seat].passes += 1,
            AttackMove::Play(_) => self.seats[seat].attacks += 1,
        }

        apply_attack(&mut self.game, &mv)
            .map_err(|e| SimulatorError::DomainError(format!("Apply attack failed: {e}")))?;
        Ok(())
    }

    fn play_defense(&mut self, ais: &[Box<dyn AiPlayer>]) -> Result<(), SimulatorError> {
        let seat = self.game.defender;
        let mv = ais[seat]
            .choose_defense(&self.game)
            .map_err(|e| SimulatorError::AiError(seat, "defense", e))?;

        match mv {
            DefenseMove::Surrender => self.seats[seat].surrenders += 1,
            DefenseMove::Defend(_) => self.seats[seat].defenses += 1,
        }

        apply_defense(&mut self.game, &mv)
            .map_err(|e| SimulatorError::DomainError(format!("Apply defense failed: {e}")))?;
        Ok(())
    }

    fn record_finishers(&mut self) {
        for (seat, player) in self.game.players.iter().enumerate() {
            if player.is_out() && !self.finish_order.contains(&seat) {
                self.finish_order.push(seat);
            }
        }
    }
}

#[derive(Debug)]
pub enum SimulatorError {
    /// AI returned an error
    AiError(PlayerId, &'static str, AiError),
    /// Domain logic error
    DomainError(String),
    /// Invalid simulator setup
    InvalidState(String),
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::AiError(seat, action, err) => {
                write!(f, "AI error (seat {seat}, {action}): {err}")
            }
            SimulatorError::DomainError(msg) => write!(f, "Domain error: {msg}"),
            SimulatorError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}
