#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod routes;
pub mod state;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use ai::{create_ai, decide_attack, decide_defense, AiError, AiPlayer, SearchConfig};
pub use config::server::ServerConfig;
pub use domain::snapshot::GameSnapshot;
pub use domain::{AttackMove, DefenseMove, Game};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
