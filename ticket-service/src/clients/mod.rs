//! Vacancy client implementations.
//!
//! The purchase pipeline talks to inventory through the [`VacancyClient`]
//! trait and never learns which transport it got: direct calls in co-located
//! deployments, pooled HTTP in split deployments. The factory picks the
//! implementation once, at startup.

mod local;
mod remote;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use shared::{AvailableResponse, ReserveRequest, ReserveResponse};
use thiserror::Error;
use vacancy_service::service::VacancyService;

pub use local::LocalVacancyClient;
pub use remote::RemoteVacancyClient;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),
    #[error("vacancy service unreachable: {0}")]
    Connect(String),
    #[error("vacancy request exceeded {0:?} deadline")]
    DeadlineExceeded(Duration),
    #[error("vacancy service returned status {0}")]
    PeerStatus(u16),
    #[error("malformed vacancy response: {0}")]
    MalformedBody(String),
}

/// How the purchase process reaches the inventory engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DeploymentMode {
    /// Dispatcher and inventory in one process, direct calls.
    CoLocated,
    /// Inventory runs in its own process, reached over HTTP.
    Split,
}

/// Connection settings for the remote client. The pool outlives every
/// request; nothing is allocated per call.
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub max_connections: usize,
    pub keepalive_connections: usize,
}

#[async_trait]
pub trait VacancyClient: Send + Sync {
    async fn reserve(&self, request: ReserveRequest) -> Result<ReserveResponse, ClientError>;

    async fn available(&self) -> Result<AvailableResponse, ClientError>;

    /// Whether the inventory side is reachable and healthy.
    async fn health_check(&self) -> bool;
}

/// Select the client implementation for the configured deployment mode.
///
/// Reads the mode exactly once; callers hold the result for the life of the
/// process.
pub fn create_vacancy_client(
    mode: DeploymentMode,
    service: Option<Arc<VacancyService>>,
    remote: &RemoteSettings,
) -> anyhow::Result<Arc<dyn VacancyClient>> {
    match mode {
        DeploymentMode::CoLocated => {
            let service =
                service.context("co-located mode needs an in-process vacancy service")?;
            Ok(Arc::new(LocalVacancyClient::new(service)))
        }
        DeploymentMode::Split => Ok(Arc::new(RemoteVacancyClient::new(remote)?)),
    }
}
