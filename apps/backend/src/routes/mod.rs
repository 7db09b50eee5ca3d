use actix_web::{web, HttpResponse};
use serde::Serialize;

pub mod game;
pub mod health;
pub mod ranking;

/// Successful body: the payload's fields plus `"success": true`.
#[derive(Serialize)]
pub(crate) struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

pub(crate) fn ok<T: Serialize>(body: T) -> HttpResponse {
    HttpResponse::Ok().json(Success {
        success: true,
        body,
    })
}

/// Register every endpoint. `main.rs` adds the request middleware around this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.configure(health::configure_routes);

    // Game routes: /api/game/**
    cfg.service(web::scope("/api/game").configure(game::configure_routes));

    // Ranking routes: /api/ranking/**
    cfg.service(web::scope("/api/ranking").configure(ranking::configure_routes));
}
