use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{response::Json, routing::get};
use clap::Parser;
use ticket_service::api::{self, AppState};
use ticket_service::clients::{self, DeploymentMode, RemoteSettings};
use ticket_service::service::TicketService;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::info;
use vacancy_service::service::VacancyService;

#[derive(Parser)]
#[command(name = "ticket-service")]
struct Args {
    #[arg(long, env = "DEPLOYMENT_MODE", value_enum, default_value = "split")]
    deployment_mode: DeploymentMode,

    #[arg(long, env = "PURCHASE_PORT", default_value = "8002")]
    purchase_port: u16,

    /// Listen port in co-located mode, where one process serves both the
    /// inventory and purchase endpoints.
    #[arg(long, env = "COMBINED_PORT", default_value = "8000")]
    combined_port: u16,

    #[arg(long, env = "VACANCY_URL", default_value = "http://localhost:8001")]
    vacancy_url: String,

    #[arg(long, env = "VACANCY_TIMEOUT_MS", default_value = "2000")]
    vacancy_timeout_ms: u64,

    #[arg(long, env = "HTTP_MAX_CONNECTIONS", default_value = "100")]
    http_max_connections: usize,

    #[arg(long, env = "HTTP_KEEPALIVE_CONNECTIONS", default_value = "20")]
    http_keepalive_connections: usize,

    /// Stock held by the in-process inventory in co-located mode.
    #[arg(long, env = "INITIAL_STOCK", default_value = "1000")]
    initial_stock: i64,

    #[arg(long, env = "CACHE_TTL_SECONDS", default_value = "1")]
    cache_ttl_seconds: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let remote = RemoteSettings {
        base_url: args.vacancy_url.clone(),
        timeout: Duration::from_millis(args.vacancy_timeout_ms),
        max_connections: args.http_max_connections,
        keepalive_connections: args.http_keepalive_connections,
    };

    let (app, port, mode) = match args.deployment_mode {
        DeploymentMode::CoLocated => {
            let vacancy = Arc::new(VacancyService::new(
                args.initial_stock,
                Duration::from_secs(args.cache_ttl_seconds),
            ));
            let client =
                clients::create_vacancy_client(args.deployment_mode, Some(vacancy.clone()), &remote)?;
            let state = AppState {
                tickets: Arc::new(TicketService::new(client)),
            };

            info!("Deployment mode: co-located, using direct calls");
            info!("Initial stock: {}", args.initial_stock);
            (
                api::combined_router(vacancy, state),
                args.combined_port,
                "co-located",
            )
        }
        DeploymentMode::Split => {
            let client = clients::create_vacancy_client(args.deployment_mode, None, &remote)?;
            let state = AppState {
                tickets: Arc::new(TicketService::new(client)),
            };

            info!("Deployment mode: split, vacancy at {}", args.vacancy_url);
            (api::router(state), args.purchase_port, "split")
        }
    };

    let app = app
        .route("/", get(move || root(mode)))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("Starting ticket service on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root(mode: &'static str) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "ticket-service",
        "version": env!("CARGO_PKG_VERSION"),
        "mode": mode,
        "status": "operational",
    }))
}
