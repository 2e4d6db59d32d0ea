use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::{AvailableResponse, ReserveRequest, ReserveResponse};
use tokio::sync::Semaphore;
use tracing::debug;

use super::{ClientError, RemoteSettings, VacancyClient};

/// HTTP client for split deployments.
///
/// One pooled `reqwest::Client` for the life of the process: keep-alive
/// connections are capped by the pool, total in-flight requests by the
/// semaphore. The configured deadline covers the wait for an admission
/// permit as well as the HTTP round trip.
pub struct RemoteVacancyClient {
    http: reqwest::Client,
    base_url: String,
    in_flight: Arc<Semaphore>,
    timeout: Duration,
}

impl RemoteVacancyClient {
    pub fn new(settings: &RemoteSettings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .pool_max_idle_per_host(settings.keepalive_connections)
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            in_flight: Arc::new(Semaphore::new(settings.max_connections)),
            timeout: settings.timeout,
        })
    }

    fn classify(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::DeadlineExceeded(self.timeout)
        } else {
            ClientError::Connect(error.to_string())
        }
    }

    /// Wait for an admission permit, giving up once the request deadline
    /// would be blown anyway.
    async fn admit(&self) -> Result<tokio::sync::SemaphorePermit<'_>, ClientError> {
        tokio::time::timeout(self.timeout, self.in_flight.acquire())
            .await
            .map_err(|_| ClientError::DeadlineExceeded(self.timeout))?
            .map_err(|_| ClientError::Connect("client closed".to_string()))
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::PeerStatus(status.as_u16()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::MalformedBody(e.to_string()))
    }
}

#[async_trait]
impl VacancyClient for RemoteVacancyClient {
    async fn reserve(&self, request: ReserveRequest) -> Result<ReserveResponse, ClientError> {
        let _permit = self.admit().await?;

        debug!("Forwarding reserve qty={} to {}", request.qty, self.base_url);
        let response = self
            .http
            .post(format!("{}/api/v1/reserve", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.decode(response).await
    }

    async fn available(&self) -> Result<AvailableResponse, ClientError> {
        let _permit = self.admit().await?;

        let response = self
            .http
            .get(format!("{}/api/v1/available", self.base_url))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.decode(response).await
    }

    async fn health_check(&self) -> bool {
        let Ok(_permit) = self.admit().await else {
            return false;
        };

        match self
            .http
            .get(format!("{}/api/v1/health", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
