//! Listener and search settings read from the environment.

use std::env;

use crate::ai::SearchConfig;
use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Read `DURAK_HOST`, `DURAK_PORT`, `DURAK_SEARCH_MS` and `DURAK_SEARCH_SEED`.
    ///
    /// Unset variables take defaults; set but unparsable ones are an error.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("DURAK_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var(&lookup, "DURAK_PORT")?.unwrap_or(DEFAULT_PORT);

        let mut search = SearchConfig::default();
        if let Some(ms) = parse_var::<u64, _>(&lookup, "DURAK_SEARCH_MS")? {
            search.time_budget_ms = ms;
        }
        search.seed = parse_var(&lookup, "DURAK_SEARCH_SEED")?;

        Ok(Self { host, port, search })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::config(format!("{key} must be a valid number: {e}"))),
    }
}
