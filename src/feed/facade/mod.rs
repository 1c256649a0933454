//! Public client facades over the connection pool.
//!
//! Each facade validates credentials up front, builds the correct connect
//! URL for its feed, and is backed by one [`crate::feed::fleet::ConnectionPool`].
//! A pool with `MaxConnections` clamped to 1 behaves exactly like a
//! dedicated single-connection client, so these facades cover both the
//! single-connection and pooled use cases without duplicating the
//! connect/subscribe/reconnect machinery — see `DESIGN.md`.

pub mod depth;
pub mod market;
pub mod order;

pub use depth::DepthFeedClient;
pub use market::MarketFeedClient;
pub use order::OrderFeedClient;

use crate::error::{BrokerError, Result};

/// Validate that a credential field is non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BrokerError::InvalidCredential(format!("{field} must not be empty")));
    }
    Ok(())
}
