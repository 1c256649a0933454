//! Integration test for automatic reconnect, re-auth, and subscription
//! replay, driven against a local mock WebSocket server that deliberately
//! kills the first connection.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use marketlink_rs::feed::config::FeedConfig;
use marketlink_rs::feed::connection::{AuthMode, FeedKind};
use marketlink_rs::feed::fleet::ConnectionPool;
use marketlink_rs::feed::instrument::Instrument;
use marketlink_rs::types::enums::{ExchangeSegment, FeedRequestCode};

/// Accepts connections and forwards every text frame as `(conn_index, text)`.
/// The first accepted connection is dropped as soon as it sends its first
/// frame, simulating the upstream killing the socket; later connections stay
/// open and answer pings with pongs.
async fn spawn_killing_mock_server() -> (SocketAddr, mpsc::UnboundedReceiver<(usize, String)>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock server");
    let addr = listener.local_addr().expect("local_addr");
    let (tx, rx) = mpsc::unbounded_channel();
    let next_index = Arc::new(AtomicUsize::new(0));

    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(pair) => pair,
                Err(_) => return,
            };
            let index = next_index.fetch_add(1, Ordering::SeqCst);
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
                            if index == 0 {
                                // Simulate the upstream killing the socket right
                                // after accepting a subscribe frame.
                                let _ = ws.close(None).await;
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

/// A connection that gets killed after subscribing 100 instruments
/// reconnects, re-sends the auth/open frame, and replays the full
/// subscription set on the new socket, all within the configured backoff.
/// Pool-level bookkeeping (placement, subscription count) survives the
/// reconnect untouched.
#[tokio::test]
async fn killed_connection_reconnects_and_replays_subscriptions() {
    let (addr, mut rx) = spawn_killing_mock_server().await;
    let config = FeedConfig {
        max_connections: 1,
        max_instruments_per_conn: 1000,
        max_batch_size: 100,
        connect_timeout: Duration::from_secs(5),
        reconnect_delay: Duration::from_millis(50),
        ping_interval: Duration::from_secs(30),
        pong_wait: Duration::from_secs(60),
        ..FeedConfig::default()
    };
    let pool = ConnectionPool::new(FeedKind::Market, format!("ws://{addr}"), AuthMode::QueryString, config);

    pool.subscribe(&instruments(100), FeedRequestCode::SubscribeTicker)
        .await
        .expect("initial subscribe should succeed");

    let (first_conn, first_count) = recv_frame(&mut rx).await;
    assert_eq!((first_conn, first_count), (0, 100));

    // The mock server killed connection 0 right after that frame; the
    // connection's read loop should notice, back off briefly, reconnect on
    // a fresh socket, and replay the stored subscription set.
    let (second_conn, second_count) = recv_frame(&mut rx).await;
    assert_eq!(second_conn, 1, "replay lands on the reconnected socket");
    assert_eq!(second_count, 100, "the full subscription set is replayed");

    let stats = pool.stats().await;
    assert_eq!(stats.connection_count, 1, "the pool still tracks a single logical connection");
    assert_eq!(stats.total_subscriptions, 100, "placement bookkeeping is untouched by reconnect");

    let (_, conn_stats) = &stats.per_connection[0];
    assert!(conn_stats.reconnect_count >= 1, "the connection recorded at least one reconnect");
}
