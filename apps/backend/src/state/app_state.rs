use crate::ai::SearchConfig;

/// Application state shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search settings applied to each decision.
    pub search: SearchConfig,
}

impl AppState {
    pub fn new(search: SearchConfig) -> Self {
        Self { search }
    }

    /// Create a test AppState with a small, seeded search.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(SearchConfig::default().with_iterations(25).with_seed(1))
    }
}
