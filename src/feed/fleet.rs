//! Connection pool (fleet) — lazily grows a set of [`Connection`]s up to
//! `MaxConnections` and places subscriptions across them.
//!
//! Placement picks, among connections with spare instrument capacity, the
//! one currently carrying the fewest instruments (load balancing), and only
//! opens a new connection once every existing one is full, growing the
//! connection list on demand rather than pre-allocating a fixed set.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex as AsyncMutex;

use crate::error::{BrokerError, Result};
use crate::feed::config::FeedConfig;
use crate::feed::connection::{AuthMode, CallbackRegistry, Connection, ConnectionStats, FeedKind};
use crate::feed::instrument::Instrument;
use crate::feed::limiter::RateLimiter;
use crate::types::enums::FeedRequestCode;

/// Aggregate stats across every connection in the pool.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    pub connection_count: usize,
    pub total_subscriptions: usize,
    pub per_connection: Vec<(u64, ConnectionStats)>,
}

/// Owns and grows a set of [`Connection`]s sharing one callback registry.
pub struct ConnectionPool {
    kind: FeedKind,
    url: String,
    auth: AuthMode,
    config: FeedConfig,
    limiter: Arc<RateLimiter>,
    connections: AsyncMutex<Vec<Connection>>,
    placement: AsyncMutex<HashMap<Instrument, (u64, FeedRequestCode)>>,
    callbacks: CallbackRegistry,
    next_id: AtomicU64,
}

impl ConnectionPool {
    /// Construct an empty pool. No socket is opened until the first
    /// [`Self::subscribe`] call.
    pub fn new(kind: FeedKind, url: impl Into<String>, auth: AuthMode, config: FeedConfig) -> Self {
        let limiter = Arc::new(RateLimiter::new(
            config.max_connections,
            config.max_instruments_per_conn,
            config.max_batch_size,
        ));
        Self {
            kind,
            url: url.into(),
            auth,
            config,
            limiter,
            connections: AsyncMutex::new(Vec::new()),
            placement: AsyncMutex::new(HashMap::new()),
            callbacks: CallbackRegistry::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// The shared callback registry. Registering a callback here applies to
    /// every connection the pool has opened or will open.
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    async fn spawn_connection(&self) -> Result<Connection> {
        self.limiter.acquire_connection()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let conn = Connection::with_callbacks(id, self.url.clone(), self.kind, self.auth.clone(), self.config, self.callbacks.clone());
        if let Err(e) = conn.connect(self.config.connect_timeout).await {
            self.limiter.release_connection(id);
            return Err(e);
        }
        Ok(conn)
    }

    /// Ensure at least one connection exists and is reachable, without
    /// subscribing anything. Used by facades that need a connected socket
    /// up front (e.g. the order feed, which has no instrument list).
    pub async fn ensure_connected(&self) -> Result<u64> {
        let mut conns = self.connections.lock().await;
        if let Some(conn) = conns.first() {
            return Ok(conn.id);
        }
        let conn = self.spawn_connection().await?;
        let id = conn.id;
        conns.push(conn);
        Ok(id)
    }

    /// Place `instruments` onto the fewest-instruments-with-room connection,
    /// opening a new one only once every existing connection is full, up to
    /// `MaxConnections`. Each connection further chunks its share into
    /// `MaxBatchSize` frames.
    pub async fn subscribe(&self, instruments: &[Instrument], request_code: FeedRequestCode) -> Result<()> {
        let mut remaining = instruments;
        let mut conns = self.connections.lock().await;
        let mut placement = self.placement.lock().await;

        while !remaining.is_empty() {
            let existing_with_room = conns
                .iter()
                .map(|c| (c.id, self.limiter.instrument_count(c.id)))
                .filter(|(_, used)| *used < self.config.max_instruments_per_conn)
                .min_by_key(|(_, used)| *used);

            let idx = match existing_with_room {
                Some((id, _)) => conns.iter().position(|c| c.id == id).unwrap(),
                None => {
                    if conns.len() >= self.config.max_connections {
                        return Err(BrokerError::LimitExceeded(
                            "all connections are at capacity and MaxConnections is reached".into(),
                        ));
                    }
                    let conn = self.spawn_connection().await?;
                    conns.push(conn);
                    conns.len() - 1
                }
            };

            let conn_id = conns[idx].id;
            let used = self.limiter.instrument_count(conn_id);
            let room = self.config.max_instruments_per_conn - used;
            let take = remaining.len().min(room).max(1);
            let (chunk, rest) = remaining.split_at(take.min(remaining.len()));

            self.limiter.reserve_instruments(conn_id, chunk.len())?;
            conns[idx].send_subscription(chunk, request_code, true).await?;
            for inst in chunk {
                placement.insert(*inst, (conn_id, request_code));
            }
            remaining = rest;
        }
        Ok(())
    }

    /// Unsubscribe `instruments`, grouping by the connection each was
    /// originally placed on.
    pub async fn unsubscribe(&self, instruments: &[Instrument]) -> Result<()> {
        let conns = self.connections.lock().await;
        let mut placement = self.placement.lock().await;

        let mut by_conn: HashMap<(u64, FeedRequestCode), Vec<Instrument>> = HashMap::new();
        for inst in instruments {
            if let Some((conn_id, sub_code)) = placement.remove(inst) {
                by_conn.entry((conn_id, sub_code)).or_default().push(*inst);
            }
        }
        for ((conn_id, sub_code), group) in by_conn {
            if let Some(conn) = conns.iter().find(|c| c.id == conn_id) {
                conn.send_subscription(&group, unsubscribe_code_for(sub_code), false).await?;
                self.limiter.release(conn_id, group.len());
            }
        }
        Ok(())
    }

    /// Disconnect every connection and release their connection slots.
    pub async fn close_all(&self) {
        let mut conns = self.connections.lock().await;
        for conn in conns.drain(..) {
            conn.disconnect().await;
            self.limiter.release_connection(conn.id);
        }
        self.placement.lock().await.clear();
    }

    /// Snapshot of pool-wide and per-connection stats.
    pub async fn stats(&self) -> PoolStats {
        let conns = self.connections.lock().await;
        let placement = self.placement.lock().await;
        PoolStats {
            connection_count: conns.len(),
            total_subscriptions: placement.len(),
            per_connection: conns.iter().map(|c| (c.id, c.stats())).collect(),
        }
    }
}

fn unsubscribe_code_for(subscribe_code: FeedRequestCode) -> FeedRequestCode {
    match subscribe_code {
        FeedRequestCode::SubscribeTicker => FeedRequestCode::UnsubscribeTicker,
        FeedRequestCode::SubscribeQuote => FeedRequestCode::UnsubscribeQuote,
        FeedRequestCode::SubscribeFull => FeedRequestCode::UnsubscribeFull,
        FeedRequestCode::SubscribeFullMarketDepth => FeedRequestCode::UnsubscribeFullMarketDepth,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_stats_start_empty() {
        let config = FeedConfig::default();
        let pool = ConnectionPool::new(FeedKind::Market, "wss://example.invalid/feed", AuthMode::QueryString, config);
        assert_eq!(pool.limiter.active_connections(), 0);
    }
}
