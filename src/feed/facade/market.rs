//! Binary market-data feed client (Ticker / Quote / Full).

use std::sync::Arc;
use std::time::Duration;

use crate::constants::WS_MARKET_FEED_URL;
use crate::error::Result;
use crate::feed::codec::{FullRecord, OiRecord, PrevCloseRecord, QuoteRecord, TickerRecord};
use crate::feed::config::FeedConfig;
use crate::feed::connection::{AuthMode, ErrorCallback, FeedKind, FullCallback, OiCallback, PrevCloseCallback, QuoteCallback, TickerCallback};
use crate::feed::facade::require_non_empty;
use crate::feed::fleet::{ConnectionPool, PoolStats};
use crate::feed::instrument::Instrument;
use crate::types::enums::FeedRequestCode;

/// Which variant to subscribe an instrument under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketDataMode {
    Ticker,
    Quote,
    Full,
}

impl MarketDataMode {
    fn request_code(self) -> FeedRequestCode {
        match self {
            Self::Ticker => FeedRequestCode::SubscribeTicker,
            Self::Quote => FeedRequestCode::SubscribeQuote,
            Self::Full => FeedRequestCode::SubscribeFull,
        }
    }
}

/// Client for the binary market-data feed. Backed by a [`ConnectionPool`]
/// that grows lazily as subscriptions are placed.
///
/// Callback registration (`on_ticker`, `on_quote`, ...) takes effect
/// synchronously, before the call returns, so registering handlers before
/// `connect()` guarantees no frame is dispatched with a callback slot still
/// empty.
pub struct MarketFeedClient {
    pool: ConnectionPool,
}

impl MarketFeedClient {
    /// Construct a client for the given credentials. Fails fast if either
    /// is empty; does not open a socket yet.
    pub fn new(client_id: impl AsRef<str>, access_token: impl AsRef<str>) -> Result<Self> {
        Self::with_config(client_id, access_token, FeedConfig::default())
    }

    /// Construct a client with a custom [`FeedConfig`].
    pub fn with_config(client_id: impl AsRef<str>, access_token: impl AsRef<str>, config: FeedConfig) -> Result<Self> {
        require_non_empty(client_id.as_ref(), "client_id")?;
        require_non_empty(access_token.as_ref(), "access_token")?;
        let url = format!(
            "{WS_MARKET_FEED_URL}?version=2&token={}&clientId={}&authType=2",
            access_token.as_ref(),
            client_id.as_ref()
        );
        Ok(Self {
            pool: ConnectionPool::new(FeedKind::Market, url, AuthMode::QueryString, config),
        })
    }

    /// Open the first connection. Subsequent connections are opened lazily
    /// as subscriptions fill up existing ones.
    pub async fn connect(&self, deadline: Duration) -> Result<()> {
        let _ = tokio::time::timeout(deadline, self.pool.ensure_connected()).await.map_err(|_| {
            crate::error::BrokerError::ConnectFailed(format!("connect timed out after {deadline:?}"))
        })??;
        Ok(())
    }

    /// Subscribe `instruments` under `mode`, placed across the pool.
    pub async fn subscribe(&self, instruments: &[Instrument], mode: MarketDataMode) -> Result<()> {
        self.pool.subscribe(instruments, mode.request_code()).await
    }

    /// Unsubscribe `instruments` from whichever mode they were subscribed under.
    pub async fn unsubscribe(&self, instruments: &[Instrument]) -> Result<()> {
        self.pool.unsubscribe(instruments).await
    }

    /// Register a callback for Ticker packets (LTP + trade time).
    pub fn on_ticker(&self, cb: impl Fn(&TickerRecord) + Send + Sync + 'static) {
        self.set_on_ticker(Arc::new(cb));
    }

    fn set_on_ticker(&self, cb: TickerCallback) {
        self.pool.callbacks().market.write().unwrap().on_ticker = Some(cb);
    }

    /// Register a callback for Quote packets.
    pub fn on_quote(&self, cb: impl Fn(&QuoteRecord) + Send + Sync + 'static) {
        self.set_on_quote(Arc::new(cb));
    }

    fn set_on_quote(&self, cb: QuoteCallback) {
        self.pool.callbacks().market.write().unwrap().on_quote = Some(cb);
    }

    /// Register a callback for Full packets (quote + 5-level depth).
    pub fn on_full(&self, cb: impl Fn(&FullRecord) + Send + Sync + 'static) {
        self.set_on_full(Arc::new(cb));
    }

    fn set_on_full(&self, cb: FullCallback) {
        self.pool.callbacks().market.write().unwrap().on_full = Some(cb);
    }

    /// Register a callback for Open Interest packets.
    pub fn on_oi(&self, cb: impl Fn(&OiRecord) + Send + Sync + 'static) {
        self.set_on_oi(Arc::new(cb));
    }

    fn set_on_oi(&self, cb: OiCallback) {
        self.pool.callbacks().market.write().unwrap().on_oi = Some(cb);
    }

    /// Register a callback for previous-close packets.
    pub fn on_prev_close(&self, cb: impl Fn(&PrevCloseRecord) + Send + Sync + 'static) {
        self.set_on_prev_close(Arc::new(cb));
    }

    fn set_on_prev_close(&self, cb: PrevCloseCallback) {
        self.pool.callbacks().market.write().unwrap().on_prev_close = Some(cb);
    }

    /// Register a callback invoked when a dispatch error or handler panic
    /// occurs. The connection that raised it continues running.
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
    fn rejects_empty_client_id() {
        let err = MarketFeedClient::new("", "token").unwrap_err();
        assert!(matches!(err, crate::error::BrokerError::InvalidCredential(_)));
    }

    #[test]
    fn rejects_empty_access_token() {
        let err = MarketFeedClient::new("1000000001", "").unwrap_err();
        assert!(matches!(err, crate::error::BrokerError::InvalidCredential(_)));
    }

    #[test]
    fn mode_maps_to_expected_request_code() {
        assert_eq!(MarketDataMode::Ticker.request_code(), FeedRequestCode::SubscribeTicker);
        assert_eq!(MarketDataMode::Quote.request_code(), FeedRequestCode::SubscribeQuote);
        assert_eq!(MarketDataMode::Full.request_code(), FeedRequestCode::SubscribeFull);
    }
}
