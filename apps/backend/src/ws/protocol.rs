//! Wire protocol frames.
//!
//! Client frames are tagged by `type`; actions carry a second `action` tag.
//! Server frames are `pong`, `info`, `error`, and `state`.

use serde::{Deserialize, Serialize};

use crate::domain::{Seat, Suit};
use crate::protocol::RoomSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMsg {
    Ping,
    Action(ActionMsg),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ActionMsg {
    Pass,
    #[serde(rename_all = "camelCase")]
    OrderUp {
        #[serde(default)]
        alone: bool,
    },
    #[serde(rename_all = "camelCase")]
    ChooseTrump {
        suit: Suit,
        #[serde(default)]
        alone: bool,
    },
    #[serde(rename_all = "camelCase")]
    Discard { card_id: String },
    #[serde(rename_all = "camelCase")]
    PlayCard { card_id: String },
    StartNextHand,
    RestartMatch,
    AddBot,
    RemoveBot,
    #[serde(rename_all = "camelCase")]
    SetSeat {
        target_player_id: String,
        seat_index: Seat,
    },
    #[serde(rename_all = "camelCase")]
    SetBotDifficulty { bot_difficulty: String },
    StartRoom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMsg {
    Pong,
    Info { message: String },
    Error { message: String },
    State { state: RoomSnapshot },
}
