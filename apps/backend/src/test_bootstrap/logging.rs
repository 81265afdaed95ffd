#![cfg(test)]

//! Test logging initialization shared by every unit test in the crate.
//!
//! A one-time guard prevents double initialization; the subscriber writes
//! through the test writer so cargo's output capture keeps runs quiet.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize logging for tests.
///
/// Idempotent and race-safe. The level comes from, in order:
///
/// 1. `TEST_LOG` environment variable (preferred)
/// 2. `RUST_LOG` environment variable (fallback)
/// 3. `"warn"` (default, quiet)
///
/// ```bash
/// # See the per-search MCTS summaries
/// TEST_LOG=durak_backend=debug cargo test -p durak-backend mcts
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
