//! Room, player, and game state records.
//!
//! Everything here is serde round-trippable: the same shapes are written
//! to the persistent store and (filtered) into client snapshots.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::cards_types::{Card, Suit};
use super::rules::{team_of, Seat, PLAYERS};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    BiddingRound1,
    BiddingRound2,
    DealerDiscard,
    Playing,
    HandOver,
    GameOver,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    Easy,
    Medium,
    Hard,
}

impl BotDifficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickPlay {
    pub player_id: String,
    pub card: Card,
}

/// Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTrick {
    pub index: u8,
    pub winner_seat: Seat,
    pub cards: Vec<TrickPlay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandSummary {
    pub maker_team: u8,
    pub maker_tricks: u8,
    pub defender_tricks: u8,
    pub points_awarded: u16,
    pub awarded_to: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub team0: u16,
    pub team1: u16,
}

impl Score {
    pub fn for_team(&self, team: u8) -> u16 {
        if team == 0 {
            self.team0
        } else {
            self.team1
        }
    }

    pub fn add(&mut self, team: u8, points: u16) {
        if team == 0 {
            self.team0 += points;
        } else {
            self.team1 += points;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub phase: Phase,
    pub dealer_seat: Seat,
    pub turn_seat: Seat,
    pub upcard: Option<Card>,
    pub kitty: Vec<Card>,
    pub blocked_suit: Option<Suit>,
    pub trump: Option<Suit>,
    pub maker_team: Option<u8>,
    pub called_by_player_id: Option<String>,
    pub going_alone_player_id: Option<String>,
    pub sitting_out_seat: Option<Seat>,
    pub current_trick: Vec<TrickPlay>,
    pub completed_tricks: Vec<CompletedTrick>,
    pub trick_index: u8,
    pub hand_summary: Option<HandSummary>,
    pub hand_number: u32,
}

impl GameState {
    /// Seats taking part in the current hand (3 during a loner).
    pub fn active_seat_count(&self) -> usize {
        if self.sitting_out_seat.is_some() {
            3
        } else {
            PLAYERS as usize
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub seat_index: Seat,
    pub connected: bool,
    pub is_bot: bool,
    pub hand: Vec<Card>,
}

impl Player {
    pub fn new_human(name: impl Into<String>, seat_index: Seat) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            name: name.into(),
            seat_index,
            connected: false,
            is_bot: false,
            hand: Vec::new(),
        }
    }

    pub fn new_bot(name: impl Into<String>, seat_index: Seat) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            name: name.into(),
            seat_index,
            connected: true,
            is_bot: true,
            hand: Vec::new(),
        }
    }

    pub fn team(&self) -> u8 {
        team_of(self.seat_index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub name: String,
    pub password: Option<String>,
    pub creator_token: String,
    pub creator_player_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub max_players: u8,
    pub status: RoomStatus,
    pub bot_difficulty: BotDifficulty,
    pub score: Score,
    pub players: Vec<Player>,
    pub game: Option<GameState>,
}

impl Room {
    pub fn new(name: impl Into<String>, password: Option<String>, creator_token: String) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            name: name.into(),
            password,
            creator_token,
            creator_player_id: None,
            created_at: now,
            updated_at: now,
            max_players: PLAYERS,
            status: RoomStatus::Waiting,
            bot_difficulty: BotDifficulty::Medium,
            score: Score::default(),
            players: Vec::new(),
            game: None,
        }
    }

    pub fn player_at_seat(&self, seat: Seat) -> Option<&Player> {
        self.players.iter().find(|p| p.seat_index == seat)
    }

    pub fn player_at_seat_mut(&mut self, seat: Seat) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.seat_index == seat)
    }

    pub fn player_by_id(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_by_id_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Reconnection matches names case-insensitively.
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn seat_of(&self, player_id: &str) -> Option<Seat> {
        self.player_by_id(player_id).map(|p| p.seat_index)
    }

    pub fn bot_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_bot).count()
    }

    pub fn has_bot(&self) -> bool {
        self.players.iter().any(|p| p.is_bot)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players as usize
    }

    pub fn free_seat(&self) -> Option<Seat> {
        (0..PLAYERS).find(|&s| self.player_at_seat(s).is_none())
    }

    pub fn is_creator(&self, player_id: &str) -> bool {
        self.creator_player_id.as_deref() == Some(player_id)
    }

    pub fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }
}
