//! Per-game metrics for simulation output.

use serde::Serialize;

use crate::simulator::GameResult;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub players: usize,
    pub completed: bool,
    pub moves: usize,
    pub duration_ms: f64,
    pub finish_order: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durak: Option<usize>,
    pub seats: Vec<SeatMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatMetrics {
    pub seat: usize,
    pub ai_type: String,
    /// 1-based place in the finish order; absent for the durak
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_position: Option<usize>,
    pub durak: bool,
    pub attacks: u32,
    pub passes: u32,
    pub defenses: u32,
    pub surrenders: u32,
}

/// Build metrics from a finished simulation.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    ai_types: &[String],
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let seats = ai_types
        .iter()
        .zip(&result.seats)
        .enumerate()
        .map(|(seat, (ai_type, stats))| SeatMetrics {
            seat,
            ai_type: ai_type.clone(),
            finish_position: result
                .finish_order
                .iter()
                .position(|&s| s == seat)
                .map(|p| p + 1),
            durak: result.durak == Some(seat),
            attacks: stats.attacks,
            passes: stats.passes,
            defenses: stats.defenses,
            surrenders: stats.surrenders,
        })
        .collect();

    GameMetrics {
        game_id,
        seed,
        players: ai_types.len(),
        completed: result.completed,
        moves: result.moves,
        duration_ms,
        finish_order: result.finish_order.clone(),
        durak: result.durak,
        seats,
    }
}
