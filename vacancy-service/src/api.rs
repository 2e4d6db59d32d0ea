use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use shared::{AvailableResponse, ErrorResponse, HealthResponse, ReserveRequest, ReserveResponse};
use tracing::{debug, info, warn};

use crate::service::VacancyService;
use crate::stock::StockError;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<VacancyService>,
}

/// Reserve and availability endpoints, without the health route. The
/// co-located process merges these into its own router and keeps a single
/// health endpoint.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/reserve", post(reserve))
        .route("/api/v1/available", get(available))
        .with_state(state)
}

/// Full router for the standalone vacancy process.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .merge(routes(state))
}

pub async fn reserve(
    State(state): State<AppState>,
    payload: Result<Json<ReserveRequest>, JsonRejection>,
) -> Result<Json<ReserveResponse>, (StatusCode, Json<ErrorResponse>)> {
    // A missing or non-integer quantity is the caller's mistake, same as a
    // non-positive one: always a 400, never a decrement.
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected reserve body: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("invalid_quantity", rejection.body_text())),
        )
    })?;
    info!("Reserve request: qty={}", request.qty);

    match state.service.reserve(request.qty) {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e @ StockError::InvalidQuantity(_)) => {
            warn!("Invalid reservation request: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("invalid_quantity", e.to_string())),
            ))
        }
    }
}

pub async fn available(State(state): State<AppState>) -> Json<AvailableResponse> {
    let snapshot = state.service.available();
    debug!("Available inventory: {}", snapshot.qty);
    Json(snapshot)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("vacancy"))
}
