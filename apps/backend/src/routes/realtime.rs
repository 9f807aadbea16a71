//! Websocket upgrade: room lookup/creation, admission, session start.
//!
//! Admission failures surface as HTTP statuses before the upgrade: 403 for
//! a bad password, 409 for create conflicts and full rooms, 404 for a
//! missing room. Only an admitted connection becomes a session actor.

use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::state::BotDifficulty;
use crate::domain::Room;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::rooms::{sanitize_player_name, sanitize_room_name};
use crate::state::AppState;
use crate::utils::creator_token::generate_creator_token;
use crate::ws::room::{CheckCreatorToken, Expire, Reserve, RoomActor, Summarize};
use crate::ws::session::WsSession;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectQuery {
    #[serde(default)]
    room: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    create: Option<u8>,
    #[serde(default)]
    creator_token: Option<String>,
    #[serde(default)]
    bot_difficulty: Option<String>,
}

/// Find the live room actor, reaping it first if it outlived its TTL.
async fn live_room(app: &AppState, name: &str) -> Option<actix::Addr<RoomActor>> {
    let addr = app.room(name)?;
    match addr.send(Summarize).await {
        Ok(Some(_)) => Some(addr),
        Ok(None) => {
            addr.do_send(Expire);
            None
        }
        Err(_) => {
            app.remove_room(name);
            None
        }
    }
}

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<ConnectQuery>,
    app: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let query = query.into_inner();
    let room_name = sanitize_room_name(&query.room).map_err(AppError::from)?;
    let player_name = sanitize_player_name(&query.name).map_err(AppError::from)?;
    let wants_create = query.create == Some(1);

    let existing = live_room(&app, &room_name).await;
    let (addr, as_creator) = match existing {
        Some(addr) => {
            // Creating over an existing room demands the matching token;
            // with it, this is just the creator reconnecting.
            let token_matches = match query.creator_token.clone() {
                Some(token) => addr
                    .send(CheckCreatorToken { token })
                    .await
                    .unwrap_or(false),
                None => false,
            };
            if wants_create && !token_matches {
                return Err(AppError::conflict(
                    ErrorCode::RoomExists,
                    format!("Room {room_name} already exists"),
                )
                .into());
            }
            (addr, token_matches)
        }
        None => {
            if !wants_create {
                return Err(AppError::not_found(
                    ErrorCode::RoomNotFound,
                    format!("No room named {room_name}"),
                )
                .into());
            }
            let mut room = Room::new(
                room_name.clone(),
                query.password.clone().filter(|p| !p.is_empty()),
                generate_creator_token(),
            );
            if let Some(difficulty) = query
                .bot_difficulty
                .as_deref()
                .and_then(BotDifficulty::parse)
            {
                room.bot_difficulty = difficulty;
            }
            info!(room = %room_name, "room created");
            (app.spawn_room(room), true)
        }
    };

    let reserved = addr
        .send(Reserve {
            name: player_name,
            password: query.password.clone(),
            as_creator,
        })
        .await
        .map_err(|_| AppError::internal("Room actor unavailable"))?
        .map_err(AppError::from)?;

    let conn_id = Uuid::new_v4();
    let session = WsSession::new(conn_id, reserved.player_id, addr);
    ws::start(session, &req, stream)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/websocket").route(web::get().to(upgrade)));
}
