use std::sync::Arc;

use async_trait::async_trait;
use shared::{AvailableResponse, ReserveRequest, ReserveResponse};
use vacancy_service::service::VacancyService;
use vacancy_service::stock::StockError;

use super::{ClientError, VacancyClient};

/// Direct-call client for co-located deployments. No serialization, no
/// sockets; a reservation is a function call into the in-process service.
pub struct LocalVacancyClient {
    service: Arc<VacancyService>,
}

impl LocalVacancyClient {
    pub fn new(service: Arc<VacancyService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl VacancyClient for LocalVacancyClient {
    async fn reserve(&self, request: ReserveRequest) -> Result<ReserveResponse, ClientError> {
        self.service.reserve(request.qty).map_err(|e| match e {
            StockError::InvalidQuantity(qty) => ClientError::InvalidQuantity(qty),
        })
    }

    async fn available(&self) -> Result<AvailableResponse, ClientError> {
        Ok(self.service.available())
    }

    async fn health_check(&self) -> bool {
        // No network between us and the stock.
        true
    }
}
