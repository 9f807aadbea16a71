#![deny(clippy::wildcard_imports)]

use std::path::PathBuf;

use actix_web::{web, App, HttpServer};
use backend::config::Pacing;
use backend::infra::RoomStore;
use backend::middleware::cors::cors_middleware;
use backend::routes;
use backend::state::AppState;
use time::OffsetDateTime;
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    backend::telemetry::init_tracing();

    let data_dir = std::env::var("EUCHRE_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let store = RoomStore::open(&PathBuf::from(data_dir)).unwrap_or_else(|err| {
        eprintln!("failed to open room store: {err}");
        std::process::exit(1);
    });
    let pacing = Pacing::from_env();
    let app_state = AppState::new(store, pacing);

    restore_rooms(&app_state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    info!(%host, port, "starting euchre backend");

    let app_data = web::Data::new(app_state);
    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(app_data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

/// Cold-start restore: every persisted room comes back with its actor;
/// rooms past their TTL are dropped instead. The store already cleared the
/// connected flag on non-bot players.
fn restore_rooms(app: &AppState) {
    let rooms = match app.store().load_all() {
        Ok(rooms) => rooms,
        Err(err) => {
            warn!(error = %err, "could not load persisted rooms; starting empty");
            return;
        }
    };
    let now = OffsetDateTime::now_utc();
    for (name, room) in rooms {
        if now - room.created_at >= app.pacing().room_ttl {
            info!(room = %name, "dropping expired room at restore");
            if let Err(err) = app.store().remove(&name) {
                warn!(room = %name, error = %err, "failed to drop expired room");
            }
            continue;
        }
        info!(room = %name, "restoring room");
        app.spawn_room(room);
    }
}
