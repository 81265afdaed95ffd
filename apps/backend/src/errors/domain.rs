//! Domain-level error type used by the card model, snapshot ingress and
//! the transition engine.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// What kind of input failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    ParseCard,
    InvalidPlayerIndex,
    InvalidPlayerCount,
    DuplicateCard,
    BattlefieldOverflow,
    PhaseMismatch,
    Other,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input-format error: the snapshot or a token could not be accepted
    Validation(ValidationKind, String),
    /// Internal-consistency error: the state machine left its defined transitions
    Internal(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Internal(d) => write!(f, "internal consistency error: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    /// True for input-format failures (as opposed to engine defects).
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(..))
    }
}
