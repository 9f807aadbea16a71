//! Room listing and creator deletion.

use actix_web::{web, HttpResponse};
use futures_util::future;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::protocol::RoomSummary;
use crate::state::AppState;
use crate::ws::room::{DeleteRoom, Expire, Summarize};

#[derive(Serialize)]
struct RoomsResponse {
    rooms: Vec<RoomSummary>,
}

#[derive(Serialize)]
struct DeleteResponse {
    ok: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    #[serde(default)]
    creator_token: Option<String>,
}

/// `GET /rooms`: list live rooms, reaping any that outlived their TTL.
pub async fn list_rooms(app: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let named: Vec<_> = app
        .room_names()
        .into_iter()
        .filter_map(|name| app.room(&name).map(|addr| (name, addr)))
        .collect();
    let summaries =
        future::join_all(named.iter().map(|(_, addr)| addr.send(Summarize))).await;

    let mut rooms = Vec::new();
    for ((name, addr), outcome) in named.iter().zip(summaries) {
        match outcome {
            Ok(Some(summary)) => rooms.push(summary),
            Ok(None) => {
                // Expired: the actor closes its sessions and unregisters.
                addr.do_send(Expire);
            }
            Err(_) => app.remove_room(name),
        }
    }
    rooms.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(HttpResponse::Ok().json(RoomsResponse { rooms }))
}

/// `DELETE /rooms/{name}`: creator-token-gated room removal.
pub async fn delete_room(
    app: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DeleteQuery>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    let token = query.into_inner().creator_token.unwrap_or_default();

    let addr = app.room(&name).ok_or_else(|| {
        AppError::not_found(ErrorCode::RoomNotFound, format!("No room named {name}"))
    })?;
    addr.send(DeleteRoom {
        creator_token: token,
    })
    .await
    .map_err(|_| AppError::internal("Room actor unavailable"))??;

    info!(room = %name, "room deleted");
    Ok(HttpResponse::Ok().json(DeleteResponse { ok: true }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/rooms").route(web::get().to(list_rooms)),
    )
    .service(web::resource("/rooms/{name}").route(web::delete().to(delete_room)));
}
