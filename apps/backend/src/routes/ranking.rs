use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use super::ok;
use crate::error::AppError;
use crate::ranking::MonthKey;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct MonthlyQuery {
    #[serde(default)]
    year_month: Option<String>,
}

#[derive(Serialize)]
struct RankingRow {
    rank: usize,
    player_name: String,
    wins: u32,
    year_month: MonthKey,
}

#[derive(Serialize)]
struct MonthlyBody {
    rankings: Vec<RankingRow>,
    year_month: MonthKey,
}

#[derive(Serialize)]
struct MonthsBody {
    available_months: Vec<MonthKey>,
}

/// GET /api/ranking/monthly?year_month=
///
/// Without a usable `year_month` (fewer than six digits) the current month is used.
async fn monthly(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let query = web::Query::<MonthlyQuery>::from_query(req.query_string())
        .map_err(|e| AppError::invalid(format!("Invalid query string: {e}")))?;

    let raw = query.year_month.as_deref();
    let month = MonthKey::resolve(raw, app_state.store.now()).ok_or_else(|| {
        AppError::invalid(format!(
            "year_month must name a month 01-12, got {:?}",
            raw.unwrap_or_default()
        ))
    })?;

    let rankings = app_state
        .ranking
        .monthly(month)
        .await?
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RankingRow {
            rank: i + 1,
            player_name: entry.player_name,
            wins: entry.wins,
            year_month: month,
        })
        .collect();

    Ok(ok(MonthlyBody {
        rankings,
        year_month: month,
    }))
}

/// GET /api/ranking/available-months
async fn available_months(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let available_months = app_state.ranking.available_months().await?;
    Ok(ok(MonthsBody { available_months }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/monthly", web::get().to(monthly))
        .route("/available-months", web::get().to(available_months));
}
