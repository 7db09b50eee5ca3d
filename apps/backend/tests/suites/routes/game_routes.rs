// Full lifecycle over HTTP: find-match, confirm, move, rotate, state, leave.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use spinfour_backend::middleware::RequestTrace;
use spinfour_backend::routes;

use crate::common::harness;

async fn post<S>(app: &S, uri: &str, body: Value) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "POST {uri}");
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn two_players_play_over_http() {
    let h = harness().await;
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(h.state.clone()))
            .configure(routes::configure),
    )
    .await;

    let first = post(
        &app,
        "/api/game/find-match",
        json!({"player_id": "alice", "player_name": "Alice"}),
    )
    .await;
    assert_eq!(first["success"], true);
    assert_eq!(first["status"], "waiting");
    assert!(first.get("opponent_id").is_none());
    let game_id = first["game_id"].as_str().unwrap().to_string();

    let second = post(&app, "/api/game/find-match", json!({"player_id": "bob"})).await;
    assert_eq!(second["status"], "tentative");
    assert_eq!(second["game_id"], game_id.as_str());
    assert_eq!(second["opponent_id"], "alice");
    assert_eq!(second["opponent_name"], "Alice");

    let pending = post(
        &app,
        "/api/game/confirm",
        json!({"game_id": game_id, "player_id": "alice"}),
    )
    .await;
    assert_eq!(pending["status"], "pending");

    let started = post(
        &app,
        "/api/game/confirm",
        json!({"game_id": game_id, "player_id": "bob"}),
    )
    .await;
    assert_eq!(started["status"], "started");
    assert_eq!(started["game"]["status"], "playing");
    assert_eq!(started["game"]["current_player"], "red");
    assert_eq!(started["game"]["winner"], Value::Null);
    assert_eq!(started["game"]["players"][1]["player_name"], "Player");
    assert_eq!(started["game"]["board"].as_array().unwrap().len(), 6);

    let moved = post(
        &app,
        "/api/game/move",
        json!({"game_id": game_id, "player_id": "alice", "column": 3}),
    )
    .await;
    assert_eq!(moved["move"]["row"], 5);
    assert_eq!(moved["move"]["rotated"], false);
    assert_eq!(moved["game"]["board"][5][3], "red");
    assert_eq!(moved["game"]["board"][0][3], Value::Null);
    assert!(moved.get("rotated_board").is_none());

    let rotated = post(
        &app,
        "/api/game/rotate",
        json!({"game_id": game_id, "player_id": "bob", "direction": "left"}),
    )
    .await;
    assert_eq!(rotated["move"]["rotated"], true);
    assert_eq!(rotated["move"]["direction"], "left");
    assert_eq!(rotated["move"]["color"], "yellow");
    assert_eq!(rotated["rotated_board"].as_array().unwrap().len(), 7);
    assert_eq!(rotated["game"]["current_player"], "red");

    let req = test::TestRequest::get()
        .uri(&format!("/api/game/state?game_id={game_id}"))
        .to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["success"], true);
    assert_eq!(state["game"]["id"], game_id.as_str());
    assert_eq!(state["game"], rotated["game"]);

    let left = post(
        &app,
        "/api/game/leave",
        json!({"game_id": game_id, "player_id": "bob"}),
    )
    .await;
    assert_eq!(left, json!({"success": true}));

    let req = test::TestRequest::get()
        .uri(&format!("/api/game/state?game_id={game_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert_eq!(
        h.notifier.names(),
        vec!["game.start", "game.move", "game.move", "player.left"]
    );
}

#[actix_web::test]
async fn leave_for_unknown_game_still_succeeds() {
    let h = harness().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(h.state.clone()))
            .configure(routes::configure),
    )
    .await;

    let body = post(
        &app,
        "/api/game/leave",
        json!({"game_id": "nothing-here", "player_id": "alice"}),
    )
    .await;
    assert_eq!(body["success"], true);
    assert!(h.notifier.events().is_empty());
}
