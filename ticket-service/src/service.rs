use std::sync::Arc;

use shared::{AvailableResponse, PurchaseResponse, ReserveRequest};
use thiserror::Error;
use tracing::info;

use crate::clients::{ClientError, VacancyClient};

#[derive(Debug, Error)]
pub enum TicketError {
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),
    #[error("vacancy service unavailable: {0}")]
    Upstream(ClientError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ClientError> for TicketError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::InvalidQuantity(qty) => TicketError::InvalidQuantity(qty),
            other => TicketError::Upstream(other),
        }
    }
}

/// Purchase pipeline: validate, reserve through whichever vacancy client the
/// deployment selected, shape the envelope. Holds no state between requests.
pub struct TicketService {
    client: Arc<dyn VacancyClient>,
}

impl TicketService {
    pub fn new(client: Arc<dyn VacancyClient>) -> Self {
        Self { client }
    }

    pub async fn purchase(&self, qty: i64) -> Result<PurchaseResponse, TicketError> {
        if qty <= 0 {
            return Err(TicketError::InvalidQuantity(qty));
        }

        let outcome = self.client.reserve(ReserveRequest { qty }).await?;

        let message = if outcome.success {
            "Purchase successful".to_string()
        } else {
            info!("Purchase declined: requested {}, {} left", qty, outcome.remaining);
            "Insufficient inventory".to_string()
        };

        Ok(PurchaseResponse {
            success: outcome.success,
            remaining: outcome.remaining,
            message: Some(message),
        })
    }

    pub async fn available(&self) -> Result<AvailableResponse, TicketError> {
        Ok(self.client.available().await?)
    }

    /// Dependency probe for the readiness endpoint.
    pub async fn ready(&self) -> bool {
        self.client.health_check().await
    }
}
