//! JSON order-update feed client.
//!
//! Unlike the market and depth feeds, the order feed carries no instrument
//! subscription model — the upstream pushes every status change for the
//! authenticated account once the post-open authorization frame is
//! accepted. `subscribe`/`unsubscribe` therefore have no equivalent here.

use std::sync::Arc;
use std::time::Duration;

use crate::constants::WS_ORDER_UPDATE_URL;
use crate::error::Result;
use crate::feed::config::FeedConfig;
use crate::feed::connection::{AuthMode, ErrorCallback, FeedKind, OrderCallback};
use crate::feed::envelope::OrderAlert;
use crate::feed::facade::require_non_empty;
use crate::feed::fleet::{ConnectionPool, PoolStats};

/// Client for the JSON order-update feed. Always a single connection in
/// practice, but shares the same pool machinery as the market/depth
/// facades for consistent reconnect and stats behavior.
pub struct OrderFeedClient {
    pool: ConnectionPool,
}

impl OrderFeedClient {
    /// Construct a client for the given access token.
    pub fn new(access_token: impl AsRef<str>) -> Result<Self> {
        Self::with_config(access_token, FeedConfig::default())
    }

    /// Construct a client with a custom [`FeedConfig`].
    pub fn with_config(access_token: impl AsRef<str>, mut config: FeedConfig) -> Result<Self> {
        require_non_empty(access_token.as_ref(), "access_token")?;
        config.max_connections = 1;
        Ok(Self {
            pool: ConnectionPool::new(
                FeedKind::Order,
                WS_ORDER_UPDATE_URL,
                AuthMode::PostOpenFrame(access_token.as_ref().to_string()),
                config,
            ),
        })
    }

    /// Open the connection and send the authorization frame.
    pub async fn connect(&self, deadline: Duration) -> Result<()> {
        tokio::time::timeout(deadline, self.pool.ensure_connected())
            .await
            .map_err(|_| crate::error::BrokerError::ConnectFailed(format!("connect timed out after {deadline:?}")))??;
        Ok(())
    }

    /// Register a callback invoked for every order status change.
    pub fn on_order_update(&self, cb: impl Fn(&OrderAlert) + Send + Sync + 'static) {
        self.set_on_order(Arc::new(cb));
    }

    fn set_on_order(&self, cb: OrderCallback) {
        *self.pool.callbacks().order.write().unwrap() = Some(cb);
    }

    /// Register a callback invoked on dispatch error or handler panic.
    pub fn on_error(&self, cb: impl Fn(&crate::error::BrokerError) + Send + Sync + 'static) {
        self.set_on_error(Arc::new(cb));
    }

    fn set_on_error(&self, cb: ErrorCallback) {
        *self.pool.callbacks().error.write().unwrap() = Some(cb);
    }

    /// Disconnect.
    pub async fn disconnect(&self) {
        self.pool.close_all().await;
    }

    /// Snapshot of connection stats.
    pub async fn stats(&self) -> PoolStats {
        self.pool.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_access_token() {
        let err = OrderFeedClient::new("").unwrap_err();
        assert!(matches!(err, crate::error::BrokerError::InvalidCredential(_)));
    }
}
