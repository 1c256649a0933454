//! Integration tests for subscription placement and batching across the
//! connection pool, driven against a local mock WebSocket server rather than
//! the real upstream.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use marketlink_rs::error::BrokerError;
use marketlink_rs::feed::config::FeedConfig;
use marketlink_rs::feed::connection::{AuthMode, FeedKind};
use marketlink_rs::feed::fleet::ConnectionPool;
use marketlink_rs::feed::instrument::Instrument;
use marketlink_rs::types::enums::{ExchangeSegment, FeedRequestCode};

/// Accepts any number of connections, assigning each an index in accept
/// order, and forwards every text frame it receives as `(conn_index, text)`.
/// Pings are answered with a pong so the connection's liveness check never
/// fires mid-test.
async fn spawn_mock_server() -> (SocketAddr, mpsc::UnboundedReceiver<(usize, String)>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock server");
    let addr = listener.local_addr().expect("local_addr");
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut next_index = 0usize;
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(pair) => pair,
                Err(_) => return,
            };
            let index = next_index;
            next_index += 1;
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut ws = match tokio_tungstenite::accept_async(stream).await {
                    Ok(ws) => ws,
                    Err(_) => return,
                };
                while let Some(msg) = ws.next().await {
                    match msg {
                        Ok(Message::Text(text)) => {
                            if tx.send((index, text.to_string())).is_err() {
                                return;
                            }
                        }
                        Ok(Message::Ping(payload)) => {
                            if ws.send(Message::Pong(payload)).await.is_err() {
                                return;
                            }
                        }
                        Ok(Message::Close(_)) | Err(_) => return,
                        _ => {}
                    }
                }
            });
        }
    });

    (addr, rx)
}

fn instruments(n: i32) -> Vec<Instrument> {
    (0..n).map(|i| Instrument::new(ExchangeSegment::NSE_EQ, i)).collect()
}

async fn recv_frame(rx: &mut mpsc::UnboundedReceiver<(usize, String)>) -> (usize, usize) {
    let (index, text) = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for a subscribe frame")
        .expect("server channel closed unexpectedly");
    let parsed: Value = serde_json::from_str(&text).expect("subscribe frame must be valid JSON");
    let count = parsed["InstrumentCount"].as_u64().expect("InstrumentCount field") as usize;
    (index, count)
}

/// Subscribing 250 instruments with MaxBatchSize=100 on a connection with
/// plenty of room produces three outbound frames of sizes 100, 100, 50, in
/// order, on the same connection.
#[tokio::test]
async fn batch_chunking_splits_into_max_batch_size_groups() {
    let (addr, mut rx) = spawn_mock_server().await;
    let config = FeedConfig {
        max_connections: 1,
        max_instruments_per_conn: 1000,
        max_batch_size: 100,
        ..FeedConfig::default()
    };
    let pool = ConnectionPool::new(FeedKind::Market, format!("ws://{addr}"), AuthMode::QueryString, config);

    pool.subscribe(&instruments(250), FeedRequestCode::SubscribeTicker)
        .await
        .expect("subscribe should succeed");

    let (c0, n0) = recv_frame(&mut rx).await;
    let (c1, n1) = recv_frame(&mut rx).await;
    let (c2, n2) = recv_frame(&mut rx).await;

    assert_eq!((c0, c1, c2), (0, 0, 0), "all frames land on the single connection");
    assert_eq!((n0, n1, n2), (100, 100, 50));
}

/// With MaxConnections=2 and MaxInstrumentsPerConn=1000, subscribing 2500
/// instruments fills both connections to 1000 each and returns
/// LimitExceeded for the remainder, leaving exactly 2000 placed.
#[tokio::test]
async fn pool_overflow_returns_limit_exceeded_after_capacity() {
    let (addr, _rx) = spawn_mock_server().await;
    let config = FeedConfig {
        max_connections: 2,
        max_instruments_per_conn: 1000,
        max_batch_size: 100,
        ..FeedConfig::default()
    };
    let pool = ConnectionPool::new(FeedKind::Market, format!("ws://{addr}"), AuthMode::QueryString, config);

    let err = pool
        .subscribe(&instruments(2500), FeedRequestCode::SubscribeTicker)
        .await
        .expect_err("the 2001st instrument should exceed pool capacity");
    assert!(matches!(err, BrokerError::LimitExceeded(_)));

    let stats = pool.stats().await;
    assert_eq!(stats.connection_count, 2);
    assert_eq!(stats.total_subscriptions, 2000);
}

/// Subscribing fewer instruments than one connection's room never opens a
/// second connection.
#[tokio::test]
async fn subscribe_within_one_connections_room_does_not_grow_pool() {
    let (addr, mut rx) = spawn_mock_server().await;
    let config = FeedConfig {
        max_connections: 5,
        max_instruments_per_conn: 1000,
        max_batch_size: 100,
        ..FeedConfig::default()
    };
    let pool = ConnectionPool::new(FeedKind::Market, format!("ws://{addr}"), AuthMode::QueryString, config);

    pool.subscribe(&instruments(10), FeedRequestCode::SubscribeTicker)
        .await
        .expect("subscribe should succeed");
    let _ = recv_frame(&mut rx).await;

    let stats = pool.stats().await;
    assert_eq!(stats.connection_count, 1);
    assert_eq!(stats.total_subscriptions, 10);
}
