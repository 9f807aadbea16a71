//! Error codes for the euchre backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses and websocket error frames.

use core::fmt;

/// Centralized error codes for the euchre backend API.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authorization
    /// Room password mismatch
    WrongPassword,
    /// Creator-only action attempted by a non-creator
    CreatorOnly,
    /// Creator token mismatch
    CreatorTokenMismatch,

    // Request Validation
    /// Missing or empty room name
    MissingRoomName,
    /// Missing or empty player name
    MissingPlayerName,
    /// Unknown suit value
    InvalidSuit,
    /// Seat index outside 0..=3
    InvalidSeatIndex,
    /// Card id does not parse or is not in the relevant hand
    InvalidCardId,
    /// Unknown bot difficulty value
    InvalidDifficulty,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Room not found (or expired)
    RoomNotFound,
    /// Player not found in room
    PlayerNotFound,

    // Conflicts
    /// Room already exists
    RoomExists,
    /// Player name already connected in this room
    NameTaken,
    /// All seats occupied and no matching disconnected player
    RoomFull,

    // Game phase violations
    /// Action is not legal in the current phase
    WrongPhase,
    /// Acting seat does not hold the turn
    NotYourTurn,
    /// Played card does not follow the led suit
    MustFollowSuit,
    /// Round-2 call names the turned-down suit
    BlockedSuit,

    // System Errors
    /// Persistent store error
    StorageError,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WrongPassword => "WRONG_PASSWORD",
            Self::CreatorOnly => "CREATOR_ONLY",
            Self::CreatorTokenMismatch => "CREATOR_TOKEN_MISMATCH",

            Self::MissingRoomName => "MISSING_ROOM_NAME",
            Self::MissingPlayerName => "MISSING_PLAYER_NAME",
            Self::InvalidSuit => "INVALID_SUIT",
            Self::InvalidSeatIndex => "INVALID_SEAT_INDEX",
            Self::InvalidCardId => "INVALID_CARD_ID",
            Self::InvalidDifficulty => "INVALID_DIFFICULTY",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",

            Self::RoomExists => "ROOM_EXISTS",
            Self::NameTaken => "NAME_TAKEN",
            Self::RoomFull => "ROOM_FULL",

            Self::WrongPhase => "WRONG_PHASE",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::MustFollowSuit => "MUST_FOLLOW_SUIT",
            Self::BlockedSuit => "BLOCKED_SUIT",

            Self::StorageError => "STORAGE_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
