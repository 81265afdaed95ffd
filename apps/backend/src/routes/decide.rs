//! Decision routes: a snapshot in, the chosen move out.

use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::ai::{decide_attack, decide_defense, SearchConfig};
use crate::domain::snapshot::GameSnapshot;
use crate::domain::{AttackMove, DefenseMove, Game};
use crate::error::AppError;
use crate::state::app_state::AppState;

fn search_rng(config: &SearchConfig) -> StdRng {
    match config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Validate the snapshot and run `decide` on the blocking pool.
async fn run_decision<T, F>(
    snapshot: GameSnapshot,
    config: SearchConfig,
    decide: F,
) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&Game, &SearchConfig, &mut StdRng) -> Result<T, AppError> + Send + 'static,
{
    web::block(move || {
        let mut rng = search_rng(&config);
        let game = snapshot.into_game(&mut rng).inspect_err(|e| {
            warn!(error = %e, "Rejected snapshot");
        })?;
        decide(&game, &config, &mut rng)
    })
    .await
    .map_err(|e| AppError::internal(format!("Search worker failed: {e}")))?
}

/// POST /attack
///
/// Returns `"pass"` or the list of cards to attack with.
async fn attack(
    body: web::Json<GameSnapshot>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<AttackMove>, AppError> {
    let config = app_state.search.clone();
    let mv = run_decision(body.into_inner(), config, |game, config, rng| {
        Ok(decide_attack(game, config, rng)?)
    })
    .await?;

    info!(decision = ?mv, "Attack decided");
    Ok(web::Json(mv))
}

/// POST /defend
///
/// Returns `"surrender"` or one entry per battlefield slot.
async fn defend(
    body: web::Json<GameSnapshot>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<DefenseMove>, AppError> {
    let config = app_state.search.clone();
    let mv = run_decision(body.into_inner(), config, |game, config, rng| {
        Ok(decide_defense(game, config, rng)?)
    })
    .await?;

    info!(decision = ?mv, "Defense decided");
    Ok(web::Json(mv))
}

/// Malformed or mistyped bodies become `400 INVALID_INPUT` problem responses.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "Rejected request body");
    AppError::invalid_input(format!("Invalid snapshot: {err}")).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/attack", web::post().to(attack))
        .route("/defend", web::post().to(defend));
}
