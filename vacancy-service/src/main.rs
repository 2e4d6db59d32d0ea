use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{response::Json, routing::get};
use clap::Parser;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::info;
use vacancy_service::api::{self, AppState};
use vacancy_service::service::VacancyService;

#[derive(Parser)]
#[command(name = "vacancy-service")]
struct Args {
    #[arg(long, env = "INVENTORY_PORT", default_value = "8001")]
    port: u16,

    #[arg(long, env = "INITIAL_STOCK", default_value = "1000")]
    initial_stock: i64,

    #[arg(long, env = "CACHE_TTL_SECONDS", default_value = "1")]
    cache_ttl_seconds: u64,

    /// Replica count of this deployment, as seen by the operator.
    #[arg(long, env = "ENGINE_REPLICAS", default_value = "1")]
    replicas: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    // Each process owns an independent counter. Running more than one
    // replica without an external coordinator sells the same tickets twice.
    if args.replicas > 1 {
        anyhow::bail!(
            "refusing to start with {} replicas: the stock counter is per-process and has no external coordinator",
            args.replicas
        );
    }

    let service = Arc::new(VacancyService::new(
        args.initial_stock,
        Duration::from_secs(args.cache_ttl_seconds),
    ));

    let app = api::router(AppState { service })
        .route("/", get(root))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;

    info!("Starting vacancy service on port {}", args.port);
    info!("Initial stock: {}", args.initial_stock);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "vacancy-service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
    }))
}
