//! Room lifecycle and lobby operations.
//!
//! Admission (password, reconnection-by-name, seat assignment) and the
//! creator-only lobby commands. Everything here mutates a `Room` the caller
//! already owns exclusively; the room actor is the single writer.

use rand::Rng;

use crate::domain::state::{BotDifficulty, Player, Room, RoomStatus};
use crate::domain::{transitions, Seat, PLAYERS};
use crate::errors::domain::{
    AuthKind, ConflictKind, DomainError, NotFoundKind, PhaseKind, ValidationKind,
};

pub const MAX_ROOM_NAME_LEN: usize = 24;
pub const MAX_PLAYER_NAME_LEN: usize = 40;

/// Trim and truncate a requested room name.
pub fn sanitize_room_name(raw: &str) -> Result<String, DomainError> {
    let name: String = raw.trim().chars().take(MAX_ROOM_NAME_LEN).collect();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MissingRoomName,
            "Room name is required",
        ));
    }
    Ok(name)
}

/// Trim and truncate a requested player name.
pub fn sanitize_player_name(raw: &str) -> Result<String, DomainError> {
    let name: String = raw.trim().chars().take(MAX_PLAYER_NAME_LEN).collect();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MissingPlayerName,
            "Player name is required",
        ));
    }
    Ok(name)
}

#[derive(Debug, Clone)]
pub struct ReserveOutcome {
    pub player_id: String,
    /// False when this was a reconnection to an existing seat.
    pub newly_seated: bool,
}

/// Admit a connection: password gate, then reconnection by name
/// (case-insensitive) or a fresh seat. `as_creator` is set on the creating
/// connection and on later connections carrying the creator token.
pub fn reserve_seat(
    room: &mut Room,
    name: &str,
    password: Option<&str>,
    as_creator: bool,
) -> Result<ReserveOutcome, DomainError> {
    if let Some(expected) = room.password.as_deref() {
        if password != Some(expected) {
            return Err(DomainError::unauthorized(
                AuthKind::WrongPassword,
                "Wrong room password",
            ));
        }
    }
    let name = sanitize_player_name(name)?;

    if let Some(existing) = room.player_by_name(&name) {
        if existing.is_bot {
            return Err(DomainError::conflict(
                ConflictKind::NameTaken,
                "That name belongs to a bot",
            ));
        }
        if existing.connected {
            return Err(DomainError::conflict(
                ConflictKind::NameTaken,
                "That name is already connected",
            ));
        }
        let player_id = existing.id.clone();
        if as_creator && room.creator_player_id.is_none() {
            room.creator_player_id = Some(player_id.clone());
        }
        return Ok(ReserveOutcome {
            player_id,
            newly_seated: false,
        });
    }

    if room.is_full() {
        return Err(DomainError::conflict(
            ConflictKind::RoomFull,
            "The room is full",
        ));
    }
    let seat = room.free_seat().ok_or_else(|| {
        DomainError::conflict(ConflictKind::RoomFull, "No free seat available")
    })?;
    let player = Player::new_human(name, seat);
    let player_id = player.id.clone();
    room.players.push(player);
    if as_creator && room.creator_player_id.is_none() {
        room.creator_player_id = Some(player_id.clone());
    }
    Ok(ReserveOutcome {
        player_id,
        newly_seated: true,
    })
}

/// Flip a seat's connected flag; returns an info line when it changed.
pub fn mark_connected(room: &mut Room, player_id: &str, connected: bool) -> Option<String> {
    let player = room.player_by_id_mut(player_id)?;
    if player.connected == connected {
        return None;
    }
    player.connected = connected;
    let name = player.name.clone();
    Some(if connected {
        format!("{name} connected.")
    } else {
        format!("{name} disconnected.")
    })
}

fn ensure_creator(room: &Room, actor_id: &str) -> Result<(), DomainError> {
    if !room.is_creator(actor_id) {
        return Err(DomainError::unauthorized(
            AuthKind::CreatorOnly,
            "Only the room creator may do that",
        ));
    }
    Ok(())
}

fn ensure_lobby(room: &Room) -> Result<(), DomainError> {
    if room.status != RoomStatus::Waiting {
        return Err(DomainError::phase(
            PhaseKind::WrongPhase,
            "Only available in the lobby",
        ));
    }
    Ok(())
}

pub fn add_bot(room: &mut Room, actor_id: &str) -> Result<Vec<String>, DomainError> {
    ensure_creator(room, actor_id)?;
    ensure_lobby(room)?;
    if room.is_full() {
        return Err(DomainError::conflict(
            ConflictKind::RoomFull,
            "The room is full",
        ));
    }
    let seat = room.free_seat().ok_or_else(|| {
        DomainError::conflict(ConflictKind::RoomFull, "No free seat available")
    })?;
    let number = room.bot_count() + 1;
    let bot = Player::new_bot(format!("Bot {number}"), seat);
    let name = bot.name.clone();
    room.players.push(bot);
    Ok(vec![format!("{name} joined the table.")])
}

pub fn remove_bot(room: &mut Room, actor_id: &str) -> Result<Vec<String>, DomainError> {
    ensure_creator(room, actor_id)?;
    ensure_lobby(room)?;
    let index = room
        .players
        .iter()
        .rposition(|p| p.is_bot)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "No bot to remove"))?;
    let bot = room.players.remove(index);
    Ok(vec![format!("{} left the table.", bot.name)])
}

pub fn set_bot_difficulty(
    room: &mut Room,
    actor_id: &str,
    difficulty: BotDifficulty,
) -> Result<Vec<String>, DomainError> {
    ensure_creator(room, actor_id)?;
    room.bot_difficulty = difficulty;
    let label = match difficulty {
        BotDifficulty::Easy => "easy",
        BotDifficulty::Medium => "medium",
        BotDifficulty::Hard => "hard",
    };
    Ok(vec![format!("Bot difficulty set to {label}.")])
}

/// Move a player to a seat, swapping with any current occupant.
pub fn set_seat(
    room: &mut Room,
    actor_id: &str,
    target_player_id: &str,
    seat_index: Seat,
) -> Result<Vec<String>, DomainError> {
    ensure_creator(room, actor_id)?;
    ensure_lobby(room)?;
    if seat_index >= PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::BadSeatIndex,
            "Seat index must be 0..=3",
        ));
    }
    let target_seat = room
        .player_by_id(target_player_id)
        .map(|p| p.seat_index)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "No such player"))?;
    if target_seat == seat_index {
        return Ok(Vec::new());
    }

    if let Some(occupant) = room.player_at_seat_mut(seat_index) {
        occupant.seat_index = target_seat;
    }
    let target = room
        .player_by_id_mut(target_player_id)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "No such player"))?;
    target.seat_index = seat_index;
    let name = target.name.clone();
    Ok(vec![format!("{name} moved to seat {seat_index}.")])
}

/// Creator starts the match once all four seats are filled.
pub fn start_room<R: Rng + ?Sized>(
    room: &mut Room,
    actor_id: &str,
    rng: &mut R,
) -> Result<Vec<String>, DomainError> {
    ensure_creator(room, actor_id)?;
    ensure_lobby(room)?;
    transitions::begin_match(room, rng)
}
