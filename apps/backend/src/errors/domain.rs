//! Domain-level error type used across the rules engine and services.
//!
//! This error type is HTTP- and transport-agnostic. Route handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError` using
//! the provided `From<DomainError> for AppError` implementation; the room
//! actor turns it into an `{type:"error"}` frame for the offending session.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Input validation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    MissingRoomName,
    MissingPlayerName,
    BadSuit,
    BadSeatIndex,
    BadCardId,
    BadDifficulty,
}

/// Game-phase violation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PhaseKind {
    WrongPhase,
    NotYourTurn,
    MustFollowSuit,
    BlockedSuit,
}

/// Semantic conflict kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    RoomExists,
    NameTaken,
    RoomFull,
}

/// Authorization failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthKind {
    WrongPassword,
    CreatorOnly,
    TokenMismatch,
}

/// Domain-level not-found entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Player,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation violation
    Validation(ValidationKind, String),
    /// Action not legal given the current game phase or turn
    Phase(PhaseKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Password or capability failure
    Unauthorized(AuthKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Phase(kind, d) => write!(f, "phase {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::Unauthorized(kind, d) => write!(f, "unauthorized {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn phase(kind: PhaseKind, detail: impl Into<String>) -> Self {
        Self::Phase(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn unauthorized(kind: AuthKind, detail: impl Into<String>) -> Self {
        Self::Unauthorized(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// Human-readable message, used verbatim in `{type:"error"}` frames.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Phase(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::Unauthorized(_, d)
            | DomainError::NotFound(_, d) => d,
        }
    }

    /// The canonical code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::MissingRoomName => ErrorCode::MissingRoomName,
                ValidationKind::MissingPlayerName => ErrorCode::MissingPlayerName,
                ValidationKind::BadSuit => ErrorCode::InvalidSuit,
                ValidationKind::BadSeatIndex => ErrorCode::InvalidSeatIndex,
                ValidationKind::BadCardId => ErrorCode::InvalidCardId,
                ValidationKind::BadDifficulty => ErrorCode::InvalidDifficulty,
            },
            DomainError::Phase(kind, _) => match kind {
                PhaseKind::WrongPhase => ErrorCode::WrongPhase,
                PhaseKind::NotYourTurn => ErrorCode::NotYourTurn,
                PhaseKind::MustFollowSuit => ErrorCode::MustFollowSuit,
                PhaseKind::BlockedSuit => ErrorCode::BlockedSuit,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::RoomExists => ErrorCode::RoomExists,
                ConflictKind::NameTaken => ErrorCode::NameTaken,
                ConflictKind::RoomFull => ErrorCode::RoomFull,
            },
            DomainError::Unauthorized(kind, _) => match kind {
                AuthKind::WrongPassword => ErrorCode::WrongPassword,
                AuthKind::CreatorOnly => ErrorCode::CreatorOnly,
                AuthKind::TokenMismatch => ErrorCode::CreatorTokenMismatch,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Room => ErrorCode::RoomNotFound,
                NotFoundKind::Player => ErrorCode::PlayerNotFound,
            },
        }
    }
}
