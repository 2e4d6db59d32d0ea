use std::time::Duration;

use shared::{AvailableResponse, ReserveResponse};

use crate::stock::{StockCell, StockError};

/// Domain API over the stock cell: reserve tickets, read availability.
///
/// The service owns its cell exclusively; every mutation in the process goes
/// through here.
pub struct VacancyService {
    stock: StockCell,
}

impl VacancyService {
    pub fn new(initial_stock: i64, cache_ttl: Duration) -> Self {
        Self {
            stock: StockCell::new(initial_stock, cache_ttl),
        }
    }

    pub fn reserve(&self, qty: i64) -> Result<ReserveResponse, StockError> {
        let (success, remaining) = self.stock.try_decrement(qty)?;
        let message = if success {
            format!("Reserved {qty} tickets")
        } else {
            "Insufficient inventory".to_string()
        };
        Ok(ReserveResponse {
            success,
            remaining,
            message: Some(message),
        })
    }

    pub fn available(&self) -> AvailableResponse {
        AvailableResponse {
            qty: self.stock.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(initial: i64) -> VacancyService {
        VacancyService::new(initial, Duration::ZERO)
    }

    #[test]
    fn successful_reserve_reports_remaining() {
        let svc = service(10);
        let outcome = svc.reserve(4).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.remaining, 6);
        assert_eq!(outcome.message.as_deref(), Some("Reserved 4 tickets"));
    }

    #[test]
    fn declined_reserve_keeps_stock() {
        let svc = service(3);
        let outcome = svc.reserve(4).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.remaining, 3);
        assert_eq!(outcome.message.as_deref(), Some("Insufficient inventory"));
        assert_eq!(svc.available().qty, 3);
    }

    #[test]
    fn invalid_quantity_is_an_error_not_a_decline() {
        let svc = service(3);
        assert_eq!(svc.reserve(0), Err(StockError::InvalidQuantity(0)));
        assert_eq!(svc.available().qty, 3);
    }
}
