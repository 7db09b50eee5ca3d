use std::collections::HashMap;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::error::AppError;

/// `game_id` taken from the query string, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameIdQuery(pub String);

impl FromRequest for GameIdQuery {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(extract(req.query_string()))
    }
}

fn extract(query: &str) -> Result<GameIdQuery, AppError> {
    let params = web::Query::<HashMap<String, String>>::from_query(query)
        .map_err(|e| AppError::invalid(format!("Invalid query string: {e}")))?;

    match params.get("game_id").map(|id| id.trim()) {
        Some(id) if !id.is_empty() => Ok(GameIdQuery(id.to_string())),
        _ => Err(AppError::invalid("game_id is required")),
    }
}
