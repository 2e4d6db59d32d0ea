use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use shared::{ErrorResponse, HealthResponse, PurchaseRequest, PurchaseResponse, ReadyResponse};
use tracing::{error, info, warn};
use vacancy_service::api as vacancy_api;
use vacancy_service::service::VacancyService;

use crate::service::{TicketError, TicketService};

#[derive(Clone)]
pub struct AppState {
    pub tickets: Arc<TicketService>,
}

/// Router for the purchase process.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/purchase", post(purchase))
        .route("/api/v1/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}

/// Single-process assembly for co-located deployments: the inventory
/// endpoints and the purchase endpoints share one listener and one
/// in-process service.
pub fn combined_router(vacancy: Arc<VacancyService>, state: AppState) -> Router {
    vacancy_api::routes(vacancy_api::AppState { service: vacancy }).merge(router(state))
}

pub async fn purchase(
    State(state): State<AppState>,
    payload: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Result<Json<PurchaseResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected purchase body: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("invalid_quantity", rejection.body_text())),
        )
    })?;
    info!("Purchase request: qty={}", request.qty);

    match state.tickets.purchase(request.qty).await {
        Ok(response) => Ok(Json(response)),
        Err(e @ TicketError::InvalidQuantity(_)) => {
            warn!("Invalid purchase request: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("invalid_quantity", e.to_string())),
            ))
        }
        Err(e @ TicketError::Upstream(_)) => {
            error!("Vacancy service error: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("vacancy_unavailable", e.to_string())),
            ))
        }
        Err(e @ TicketError::Internal(_)) => {
            error!("Unexpected purchase failure: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", e.to_string())),
            ))
        }
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("ticket"))
}

pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    if state.tickets.ready().await {
        (StatusCode::OK, Json(ReadyResponse::ready()))
    } else {
        warn!("Readiness check failed: vacancy service not healthy");
        (StatusCode::SERVICE_UNAVAILABLE, Json(ReadyResponse::not_ready()))
    }
}
