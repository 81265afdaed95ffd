//! Error codes for the Durak AI API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses. Add new codes here; never pass ad-hoc
//! strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Snapshot failed to parse or validate
    InvalidInput,
    /// AI could not produce a move
    AiFailure,
    /// Engine reached an undefined state
    Internal,
    /// Server configuration is invalid
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::AiFailure => "AI_FAILURE",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
