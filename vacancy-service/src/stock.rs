use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),
}

/// In-memory ticket counter with a short-TTL read cache.
///
/// The counter is guarded by a single mutex; the cache lives in a pair of
/// atomics so reads can take a fast path without the lock. Cache refresh and
/// invalidation both happen while the counter's mutex is held, so a cached
/// value within its TTL always equals the counter at some instant inside
/// that window.
pub struct StockCell {
    total: Mutex<i64>,
    cached_total: AtomicI64,
    // Nanoseconds since `started`; 0 means the cache is invalid.
    cache_valid_until: AtomicU64,
    started: Instant,
    cache_ttl: Duration,
}

impl StockCell {
    pub fn new(initial_stock: i64, cache_ttl: Duration) -> Self {
        Self {
            total: Mutex::new(initial_stock.max(0)),
            cached_total: AtomicI64::new(0),
            cache_valid_until: AtomicU64::new(0),
            started: Instant::now(),
            cache_ttl,
        }
    }

    /// Atomically reserve `qty` units.
    ///
    /// Returns `(true, remaining)` and decrements the counter when enough
    /// stock is left, `(false, remaining)` without touching it otherwise.
    /// A non-positive quantity is a caller bug and is reported as an error,
    /// never clamped.
    pub fn try_decrement(&self, qty: i64) -> Result<(bool, i64), StockError> {
        if qty <= 0 {
            return Err(StockError::InvalidQuantity(qty));
        }

        let mut total = self.total.lock().unwrap_or_else(PoisonError::into_inner);
        if *total >= qty {
            *total -= qty;
            self.cache_valid_until.store(0, Ordering::Release);
            Ok((true, *total))
        } else {
            Ok((false, *total))
        }
    }

    /// Current stock, served from the cache when it is still fresh.
    ///
    /// The fast path reads the expiry first: seeing a live expiry guarantees
    /// the value read afterwards was published no earlier than that refresh,
    /// so staleness stays bounded by the TTL.
    pub fn snapshot(&self) -> i64 {
        let valid_until = self.cache_valid_until.load(Ordering::Acquire);
        if valid_until != 0 && self.clock_nanos() < valid_until {
            return self.cached_total.load(Ordering::Acquire);
        }

        let total = self.total.lock().unwrap_or_else(PoisonError::into_inner);
        self.cached_total.store(*total, Ordering::Release);
        self.cache_valid_until.store(
            self.clock_nanos() + self.cache_ttl.as_nanos() as u64,
            Ordering::Release,
        );
        *total
    }

    fn clock_nanos(&self) -> u64 {
        self.started.elapsed().as_nanos() as u64
    }
}
