//! Personalized room snapshots.
//!
//! After every mutation each connected session receives its own view: all
//! public room facts, the recipient's hand, and the recipient's legal plays
//! for the current turn. Other players' hands are never serialized; only
//! their counts are.

use serde::{Deserialize, Serialize};

use crate::domain::state::{
    BotDifficulty, GameState, HandSummary, Phase, Room, RoomStatus, Score, TrickPlay,
};
use crate::domain::{legal_plays, Card, Seat, Suit, TARGET_SCORE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: String,
    pub name: String,
    pub seat_index: Seat,
    pub connected: bool,
    pub is_bot: bool,
    pub hand_count: usize,
}

/// The recipient's private slice of the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouSnapshot {
    pub player_id: String,
    pub seat_index: Seat,
    pub hand: Vec<Card>,
    pub is_creator: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_token: Option<String>,
}

/// Public game facts: the kitty and other hands stay hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub phase: Phase,
    pub dealer_seat: Seat,
    pub turn_seat: Seat,
    pub upcard: Option<Card>,
    pub blocked_suit: Option<Suit>,
    pub trump: Option<Suit>,
    pub maker_team: Option<u8>,
    pub called_by_player_id: Option<String>,
    pub going_alone_player_id: Option<String>,
    pub sitting_out_seat: Option<Seat>,
    pub current_trick: Vec<TrickPlay>,
    pub completed_tricks: Vec<CompletedTrickSnapshot>,
    pub trick_index: u8,
    pub hand_summary: Option<HandSummary>,
    pub hand_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTrickSnapshot {
    pub index: u8,
    pub winner_seat: Seat,
    pub cards: Vec<TrickPlay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_name: String,
    pub max_players: u8,
    pub status: RoomStatus,
    pub bot_difficulty: BotDifficulty,
    pub bot_count: usize,
    pub score: Score,
    pub players: Vec<PlayerSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub you: Option<YouSnapshot>,
    pub game: Option<GameSnapshot>,
    pub legal_plays: Vec<Card>,
    pub target_score: u16,
}

fn game_snapshot(game: &GameState) -> GameSnapshot {
    GameSnapshot {
        phase: game.phase,
        dealer_seat: game.dealer_seat,
        turn_seat: game.turn_seat,
        upcard: game.upcard,
        blocked_suit: game.blocked_suit,
        trump: game.trump,
        maker_team: game.maker_team,
        called_by_player_id: game.called_by_player_id.clone(),
        going_alone_player_id: game.going_alone_player_id.clone(),
        sitting_out_seat: game.sitting_out_seat,
        current_trick: game.current_trick.clone(),
        completed_tricks: game
            .completed_tricks
            .iter()
            .map(|t| CompletedTrickSnapshot {
                index: t.index,
                winner_seat: t.winner_seat,
                cards: t.cards.clone(),
            })
            .collect(),
        trick_index: game.trick_index,
        hand_summary: game.hand_summary,
        hand_number: game.hand_number,
    }
}

/// Build the snapshot one recipient is allowed to see. `viewer` is None for
/// an observerless build (e.g. logging); such snapshots carry no hand.
pub fn snapshot_for(room: &Room, viewer: Option<&str>) -> RoomSnapshot {
    let you = viewer.and_then(|id| room.player_by_id(id)).map(|p| {
        let is_creator = room.is_creator(&p.id);
        YouSnapshot {
            player_id: p.id.clone(),
            seat_index: p.seat_index,
            hand: p.hand.clone(),
            is_creator,
            creator_token: is_creator.then(|| room.creator_token.clone()),
        }
    });

    let legal = match (&you, room.game.as_ref()) {
        (Some(you), Some(game))
            if game.phase == Phase::Playing && game.turn_seat == you.seat_index =>
        {
            game.trump
                .map(|trump| legal_plays(&you.hand, &game.current_trick, trump))
                .unwrap_or_default()
        }
        _ => Vec::new(),
    };

    RoomSnapshot {
        room_name: room.name.clone(),
        max_players: room.max_players,
        status: room.status,
        bot_difficulty: room.bot_difficulty,
        bot_count: room.bot_count(),
        score: room.score,
        players: room
            .players
            .iter()
            .map(|p| PlayerSnapshot {
                id: p.id.clone(),
                name: p.name.clone(),
                seat_index: p.seat_index,
                connected: p.connected,
                is_bot: p.is_bot,
                hand_count: p.hand.len(),
            })
            .collect(),
        you,
        game: room.game.as_ref().map(game_snapshot),
        legal_plays: legal,
        target_score: TARGET_SCORE,
    }
}

/// One row of `GET /rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub name: String,
    pub players: usize,
    pub max_players: u8,
    pub bot_count: usize,
    pub bot_difficulty: BotDifficulty,
    pub has_password: bool,
    pub status: RoomStatus,
    pub created_at: i64,
}

pub fn summarize(room: &Room) -> RoomSummary {
    RoomSummary {
        name: room.name.clone(),
        players: room.players.len(),
        max_players: room.max_players,
        bot_count: room.bot_count(),
        bot_difficulty: room.bot_difficulty,
        has_password: room.password.is_some(),
        status: room.status,
        created_at: room.created_at.unix_timestamp(),
    }
}
