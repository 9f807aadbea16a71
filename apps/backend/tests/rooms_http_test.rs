//! HTTP surface: room listing and creator deletion.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend::config::Pacing;
use backend::domain::state::Player;
use backend::domain::Room;
use backend::infra::RoomStore;
use backend::routes;
use backend::state::AppState;
use backend_test_support::problem_details::assert_problem_details;
use backend_test_support::unique_helpers::unique_room_name;
use serde_json::Value;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

fn app_state() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RoomStore::open(dir.path()).expect("open store");
    (dir, AppState::new(store, Pacing::immediate()))
}

fn seeded_room(name: &str, token: &str) -> Room {
    let mut room = Room::new(name, None, token.to_string());
    let creator = Player::new_human("alice", 0);
    room.creator_player_id = Some(creator.id.clone());
    room.players.push(creator);
    room
}

#[actix_web::test]
async fn list_delete_and_403_flow() {
    let (_dir, state) = app_state();
    let name = unique_room_name();
    state.spawn_room(seeded_room(&name, "SECRETTOKEN"));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;

    // The room is listed with its lobby facts.
    let resp = test::call_service(&app, test::TestRequest::get().uri("/rooms").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let rooms = body["rooms"].as_array().expect("rooms array");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["name"], name.as_str());
    assert_eq!(rooms[0]["players"], 1);
    assert_eq!(rooms[0]["maxPlayers"], 4);
    assert_eq!(rooms[0]["hasPassword"], false);
    assert_eq!(rooms[0]["status"], "waiting");

    // Deleting without the creator token is refused.
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/rooms/{name}?creatorToken=WRONG"))
            .to_request(),
    )
    .await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details(
        status,
        &headers,
        &body,
        StatusCode::FORBIDDEN,
        "CREATOR_TOKEN_MISMATCH",
        None,
    );

    // The holder of the token may evict the room.
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/rooms/{name}?creatorToken=SECRETTOKEN"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);

    // Gone from the listing and from later deletes.
    let resp = test::call_service(&app, test::TestRequest::get().uri("/rooms").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["rooms"].as_array().expect("rooms array").len(), 0);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/rooms/{name}?creatorToken=SECRETTOKEN"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleting_an_unknown_room_is_404() {
    let (_dir, state) = app_state();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/rooms/nowhere?creatorToken=x")
            .to_request(),
    )
    .await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details(
        status,
        &headers,
        &body,
        StatusCode::NOT_FOUND,
        "ROOM_NOT_FOUND",
        None,
    );
}

#[actix_web::test]
async fn healthz_answers() {
    let (_dir, state) = app_state();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
