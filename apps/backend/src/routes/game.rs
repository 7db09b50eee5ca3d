//! Game lifecycle endpoints under `/api/game`.
//!
//! Bodies are parsed by [`ValidatedJson`], so a missing or mistyped field is
//! a 400 before any service runs.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::ok;
use crate::domain::{Board, Direction, Game, MoveRecord};
use crate::error::AppError;
use crate::extractors::{GameIdQuery, ValidatedJson};
use crate::services::TurnOutcome;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct FindMatchRequest {
    pub player_id: String,
    #[serde(default)]
    pub player_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GamePlayerRequest {
    pub game_id: String,
    pub player_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub game_id: String,
    pub player_id: String,
    pub column: i64,
}

#[derive(Debug, Deserialize)]
pub struct RotateRequest {
    pub game_id: String,
    pub player_id: String,
    pub direction: Direction,
}

#[derive(Serialize)]
struct GameBody {
    game: Game,
}

#[derive(Serialize)]
struct TurnBody {
    game: Game,
    #[serde(rename = "move")]
    record: MoveRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotated_board: Option<Board>,
}

impl From<TurnOutcome> for TurnBody {
    fn from(outcome: TurnOutcome) -> Self {
        Self {
            game: outcome.game,
            record: outcome.record,
            rotated_board: outcome.rotated_board,
        }
    }
}

#[derive(Serialize)]
struct Empty {}

/// POST /api/game/find-match
async fn find_match(
    body: ValidatedJson<FindMatchRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ticket = app_state
        .matches
        .find_match(&body.player_id, body.player_name.as_deref())
        .await?;
    Ok(ok(ticket))
}

/// POST /api/game/confirm
async fn confirm(
    body: ValidatedJson<GamePlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let confirmation = app_state
        .matches
        .confirm_match(&body.game_id, &body.player_id)
        .await?;
    Ok(ok(confirmation))
}

/// POST /api/game/move
async fn make_move(
    body: ValidatedJson<MoveRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state
        .games
        .make_move(&body.game_id, &body.player_id, body.column)
        .await?;
    Ok(ok(TurnBody::from(outcome)))
}

/// POST /api/game/rotate
async fn rotate(
    body: ValidatedJson<RotateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state
        .games
        .rotate(&body.game_id, &body.player_id, body.direction)
        .await?;
    Ok(ok(TurnBody::from(outcome)))
}

/// POST /api/game/leave
///
/// Always succeeds for a well-formed request, whether or not the game exists.
async fn leave(
    body: ValidatedJson<GamePlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state
        .matches
        .leave(&body.game_id, &body.player_id)
        .await?;
    Ok(ok(Empty {}))
}

/// GET /api/game/state?game_id=
async fn state(
    game_id: GameIdQuery,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state.games.state(&game_id.0)?;
    Ok(ok(GameBody { game }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/find-match", web::post().to(find_match))
        .route("/confirm", web::post().to(confirm))
        .route("/move", web::post().to(make_move))
        .route("/rotate", web::post().to(rotate))
        .route("/leave", web::post().to(leave))
        .route("/state", web::get().to(state));
}
