//! Error codes for the Spinfour backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

use crate::errors::domain::{InvalidMoveKind, NotFoundKind};

/// Centralized error codes for the Spinfour backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Missing or malformed request field
    ValidationError,

    // Resource Not Found
    /// Game id is unknown or expired
    GameNotFound,
    /// Tentative pairing is unknown or expired
    MatchNotFound,

    // Rule Violations
    /// Actor does not own the turn color
    OutOfTurn,
    /// Target column has no empty cell
    ColumnFull,
    ColumnOutOfRange,
    /// Game is waiting, tentative or finished
    GameNotActive,
    /// Actor is not seated in the game
    NotAPlayer,

    // System Errors
    ConfigError,
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::MatchNotFound => "MATCH_NOT_FOUND",

            Self::OutOfTurn => "OUT_OF_TURN",
            Self::ColumnFull => "COLUMN_FULL",
            Self::ColumnOutOfRange => "COLUMN_OUT_OF_RANGE",
            Self::GameNotActive => "GAME_NOT_ACTIVE",
            Self::NotAPlayer => "NOT_A_PLAYER",

            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl From<NotFoundKind> for ErrorCode {
    fn from(kind: NotFoundKind) -> Self {
        match kind {
            NotFoundKind::Game => Self::GameNotFound,
            NotFoundKind::Match => Self::MatchNotFound,
        }
    }
}

impl From<InvalidMoveKind> for ErrorCode {
    fn from(kind: InvalidMoveKind) -> Self {
        match kind {
            InvalidMoveKind::GameNotActive => Self::GameNotActive,
            InvalidMoveKind::NotAPlayer => Self::NotAPlayer,
            InvalidMoveKind::OutOfTurn => Self::OutOfTurn,
            InvalidMoveKind::ColumnOutOfRange => Self::ColumnOutOfRange,
            InvalidMoveKind::ColumnFull => Self::ColumnFull,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
