//! Domain-level error type used across the engine, store and services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Entities that can be missing or expired in the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Match,
}

/// Reasons a move or rotation is rejected by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidMoveKind {
    /// Game is not in the `playing` state.
    GameNotActive,
    /// Actor is not seated in this game.
    NotAPlayer,
    /// Actor does not own the turn color.
    OutOfTurn,
    ColumnOutOfRange,
    ColumnFull,
}

/// External collaborators whose failures are best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DependencyKind {
    Notifier,
    Ranking,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Missing or malformed request input
    Validation(String),
    /// Referenced game or pairing is absent or expired
    NotFound(NotFoundKind, String),
    /// Rule violation; nothing was mutated
    InvalidMove(InvalidMoveKind, String),
    /// Ranking store or notifier failed
    Transient(DependencyKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::InvalidMove(kind, d) => write!(f, "invalid move {kind:?}: {d}"),
            DomainError::Transient(kind, d) => write!(f, "transient {kind:?} failure: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn invalid_move(kind: InvalidMoveKind, detail: impl Into<String>) -> Self {
        Self::InvalidMove(kind, detail.into())
    }
    pub fn transient(kind: DependencyKind, detail: impl Into<String>) -> Self {
        Self::Transient(kind, detail.into())
    }

    /// Shorthand for the most common lookup failure.
    pub fn game_not_found(game_id: &str) -> Self {
        Self::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    }

    pub fn invalid_move_kind(&self) -> Option<InvalidMoveKind> {
        match self {
            DomainError::InvalidMove(kind, _) => Some(*kind),
            _ => None,
        }
    }
}
