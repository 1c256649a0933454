//! 20-level and 200-level market-depth feed client.

use std::sync::Arc;
use std::time::Duration;

use crate::constants::{WS_DEPTH_20_URL, WS_DEPTH_200_URL};
use crate::error::Result;
use crate::feed::codec::DepthRecord;
use crate::feed::config::FeedConfig;
use crate::feed::connection::{AuthMode, DepthCallback, ErrorCallback, FeedKind};
use crate::feed::facade::require_non_empty;
use crate::feed::fleet::{ConnectionPool, PoolStats};
use crate::feed::instrument::Instrument;
use crate::types::enums::FeedRequestCode;

/// Which depth endpoint to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthLevelCount {
    Twenty,
    TwoHundred,
}

impl DepthLevelCount {
    fn url(self) -> &'static str {
        match self {
            Self::Twenty => WS_DEPTH_20_URL,
            Self::TwoHundred => WS_DEPTH_200_URL,
        }
    }
}

/// Client for the full market-depth feed (20-level or 200-level).
pub struct DepthFeedClient {
    pool: ConnectionPool,
}

impl DepthFeedClient {
    /// Construct a client for the given depth tier and credentials.
    pub fn new(levels: DepthLevelCount, client_id: impl AsRef<str>, access_token: impl AsRef<str>) -> Result<Self> {
        Self::with_config(levels, client_id, access_token, FeedConfig::default())
    }

    /// Construct a client with a custom [`FeedConfig`].
    pub fn with_config(
        levels: DepthLevelCount,
        client_id: impl AsRef<str>,
        access_token: impl AsRef<str>,
        config: FeedConfig,
    ) -> Result<Self> {
        require_non_empty(client_id.as_ref(), "client_id")?;
        require_non_empty(access_token.as_ref(), "access_token")?;
        let url = format!(
            "{}?version=2&token={}&clientId={}&authType=2",
            levels.url(),
            access_token.as_ref(),
            client_id.as_ref()
        );
        Ok(Self {
            pool: ConnectionPool::new(FeedKind::Depth, url, AuthMode::QueryString, config),
        })
    }

    /// Open the first connection.
    pub async fn connect(&self, deadline: Duration) -> Result<()> {
        tokio::time::timeout(deadline, self.pool.ensure_connected())
            .await
            .map_err(|_| crate::error::BrokerError::ConnectFailed(format!("connect timed out after {deadline:?}")))??;
        Ok(())
    }

    /// Subscribe `instruments` to full market depth.
    pub async fn subscribe(&self, instruments: &[Instrument]) -> Result<()> {
        self.pool.subscribe(instruments, FeedRequestCode::SubscribeFullMarketDepth).await
    }

    /// Unsubscribe `instruments`.
    pub async fn unsubscribe(&self, instruments: &[Instrument]) -> Result<()> {
        self.pool.unsubscribe(instruments).await
    }

    /// Register a callback for depth snapshots.
    pub fn on_depth(&self, cb: impl Fn(&DepthRecord) + Send + Sync + 'static) {
        self.set_on_depth(Arc::new(cb));
    }

    fn set_on_depth(&self, cb: DepthCallback) {
        self.pool.callbacks().market.write().unwrap().on_depth = Some(cb);
    }

    /// Register a callback invoked on dispatch error or handler panic.
    pub fn on_error(&self, cb: impl Fn(&crate::error::BrokerError) + Send + Sync + 'static) {
        self.set_on_error(Arc::new(cb));
    }

    fn set_on_error(&self, cb: ErrorCallback) {
        *self.pool.callbacks().error.write().unwrap() = Some(cb);
    }

    /// Disconnect every underlying connection.
    pub async fn disconnect(&self) {
        self.pool.close_all().await;
    }

    /// Snapshot of pool-wide and per-connection stats.
    pub async fn stats(&self) -> PoolStats {
        self.pool.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_credentials() {
        let err = DepthFeedClient::new(DepthLevelCount::Twenty, "", "token").unwrap_err();
        assert!(matches!(err, crate::error::BrokerError::InvalidCredential(_)));
    }

    #[test]
    fn twenty_and_two_hundred_use_distinct_endpoints() {
        assert_ne!(DepthLevelCount::Twenty.url(), DepthLevelCount::TwoHundred.url());
    }
}
