use serde::{Deserialize, Serialize};

/// Request to reserve tickets from inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub qty: i64,
}

/// Outcome of a reservation attempt. `success: false` with a remaining count
/// is a normal business result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveResponse {
    pub success: bool,
    pub remaining: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request to purchase tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub qty: i64,
}

/// Outcome of a purchase attempt, same envelope shape as a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseResponse {
    pub success: bool,
    pub remaining: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Currently available inventory. May be stale up to the engine's cache TTL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableResponse {
    pub qty: i64,
}

/// Standardized error body: a stable kind plus a human-readable detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: detail.into(),
        }
    }
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
        }
    }
}

impl ReadyResponse {
    pub fn ready() -> Self {
        Self {
            status: "ready".to_string(),
        }
    }

    pub fn not_ready() -> Self {
        Self {
            status: "not_ready".to_string(),
        }
    }
}
