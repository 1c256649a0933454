//! A single upstream WebSocket connection.
//!
//! `Connection` is the shared core behind every client facade
//! ([`crate::feed::facade`]) and the connection pool
//! ([`crate::feed::fleet`]). It owns one socket at a time, reconnects with
//! backoff on fault, and dispatches inbound frames to user callbacks
//! through a bounded worker pool so a slow callback never starves the read
//! loop's ability to keep up with ping/pong liveness.
//!
//! Subscription-cap and connection-cap enforcement (the [`RateLimiter`] in
//! [`crate::feed::limiter`]) is the caller's responsibility — a single
//! connection just sends what it's told to send in `MaxBatchSize` chunks
//! and remembers it for replay after reconnect.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex, RwLock};
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use rand::Rng;
use serde::Serialize;
use tokio::net::TcpStream;
use tokio::sync::{Mutex as AsyncMutex, Notify, mpsc};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{BrokerError, Result};
use crate::feed::codec::{self, DepthRecord, FullRecord, OiRecord, PrevCloseRecord, QuoteRecord, TickerRecord};
use crate::feed::config::{FeedConfig, RECONNECT_BACKOFF_CAP, RECONNECT_BACKOFF_FACTOR};
use crate::feed::envelope::{self, OrderAlert};
use crate::feed::health::{HealthMonitor, HealthSignal};
use crate::feed::instrument::{Instrument, WireInstrument};
use crate::feed::middleware::MiddlewareChain;
use crate::feed::pool::{DepthPool, FullPool, OiPool, PrevClosePool, QuotePool, RecordPool, TickerPool};
use crate::types::enums::FeedRequestCode;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Lifecycle state of a [`Connection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    Closing,
    Closed,
}

/// Per-connection counters surfaced via `stats()`.
#[derive(Debug, Clone, Default)]
pub struct ConnectionStats {
    pub messages_received: u64,
    pub bytes_received: u64,
    pub reconnect_count: u64,
    pub last_error: Option<String>,
}

/// How the upstream expects authorization.
#[derive(Clone)]
pub enum AuthMode {
    /// Credentials are already baked into the connect URL's query string.
    QueryString,
    /// Send `{"Authorization":"<token>"}` as the first frame after open.
    PostOpenFrame(String),
}

/// Which decode/dispatch path a connection's frames take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Market,
    Depth,
    Order,
}

// ---------------------------------------------------------------------------
// Callback registry
// ---------------------------------------------------------------------------

pub type TickerCallback = Arc<dyn Fn(&TickerRecord) + Send + Sync>;
pub type QuoteCallback = Arc<dyn Fn(&QuoteRecord) + Send + Sync>;
pub type OiCallback = Arc<dyn Fn(&OiRecord) + Send + Sync>;
pub type PrevCloseCallback = Arc<dyn Fn(&PrevCloseRecord) + Send + Sync>;
pub type FullCallback = Arc<dyn Fn(&FullRecord) + Send + Sync>;
pub type DepthCallback = Arc<dyn Fn(&DepthRecord) + Send + Sync>;
pub type OrderCallback = Arc<dyn Fn(&OrderAlert) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(&BrokerError) + Send + Sync>;

/// Binary market/depth-feed callbacks, registered by variant.
#[derive(Clone, Default)]
pub struct MarketCallbacks {
    pub on_ticker: Option<TickerCallback>,
    pub on_quote: Option<QuoteCallback>,
    pub on_oi: Option<OiCallback>,
    pub on_prev_close: Option<PrevCloseCallback>,
    pub on_full: Option<FullCallback>,
    pub on_depth: Option<DepthCallback>,
}

/// Shared registry of user callbacks for one connection.
#[derive(Clone)]
pub struct CallbackRegistry {
    pub market: Arc<RwLock<MarketCallbacks>>,
    pub order: Arc<RwLock<Option<OrderCallback>>>,
    pub error: Arc<RwLock<Option<ErrorCallback>>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self {
            market: Arc::new(RwLock::new(MarketCallbacks::default())),
            order: Arc::new(RwLock::new(None)),
            error: Arc::new(RwLock::new(None)),
        }
    }

    async fn report_error(&self, err: BrokerError) {
        warn!(error = %err, "feed error");
        let handler = self.error.read().unwrap().clone();
        if let Some(cb) = handler {
            cb(&err);
        }
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Object pools shared by every decode on this connection
// ---------------------------------------------------------------------------

/// Per-variant object pools backing zero-allocation decode on the hot path.
pub struct PacketPools {
    pub ticker: TickerPool,
    pub quote: QuotePool,
    pub oi: OiPool,
    pub prev_close: PrevClosePool,
    pub full: FullPool,
    pub depth: DepthPool,
}

impl PacketPools {
    pub fn new(capacity: usize) -> Self {
        Self {
            ticker: RecordPool::new(capacity),
            quote: RecordPool::new(capacity),
            oi: RecordPool::new(capacity),
            prev_close: RecordPool::new(capacity),
            full: RecordPool::new(capacity),
            depth: RecordPool::new(capacity),
        }
    }
}

// ---------------------------------------------------------------------------
// Bounded, drop-oldest work queue feeding the callback worker pool
// ---------------------------------------------------------------------------

enum WorkItem {
    Binary(Vec<u8>),
    Text(String),
}

/// A bounded queue of decoded-but-not-yet-dispatched frames. When full, the
/// oldest entry is dropped to make room rather than growing unbounded or
/// blocking the read loop — see the dispatch policy discussion in
/// `DESIGN.md`.
struct WorkQueue {
    capacity: usize,
    items: AsyncMutex<VecDeque<WorkItem>>,
    notify: Notify,
}

impl WorkQueue {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            items: AsyncMutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }

    async fn push(&self, item: WorkItem) {
        let mut guard = self.items.lock().await;
        if guard.len() >= self.capacity {
            guard.pop_front();
            warn!("callback queue full, dropping oldest queued frame");
        }
        guard.push_back(item);
        drop(guard);
        self.notify.notify_one();
    }

    async fn pop(&self) -> WorkItem {
        loop {
            {
                let mut guard = self.items.lock().await;
                if let Some(item) = guard.pop_front() {
                    return item;
                }
            }
            self.notify.notified().await;
        }
    }
}

// ---------------------------------------------------------------------------
// Outgoing subscribe/unsubscribe frame shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[allow(non_snake_case)]
struct FeedSubscribeRequest {
    RequestCode: u8,
    InstrumentCount: usize,
    InstrumentList: Vec<WireInstrument>,
}

#[derive(Debug, Serialize)]
#[allow(non_snake_case)]
struct AuthorizationFrame<'a> {
    Authorization: &'a str,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Split a socket message that may contain multiple self-delimited packets
/// (each carrying its own `message_length`) into individual packet slices.
fn split_frames(mut data: &[u8]) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    while data.len() >= codec::HEADER_LEN {
        let message_length = u16::from_le_bytes([data[1], data[2]]) as usize;
        if message_length < codec::HEADER_LEN || message_length > data.len() {
            // Can't trust the declared length; surface the remainder as one
            // (likely malformed) chunk and stop.
            out.push(data.to_vec());
            break;
        }
        out.push(data[..message_length].to_vec());
        data = &data[message_length..];
    }
    out
}

fn dispatch_binary(pools: &PacketPools, callbacks: &MarketCallbacks, frame: &[u8]) -> Result<()> {
    let header = codec::parse_header(frame)?;
    let payload = &frame[codec::HEADER_LEN..];
    use crate::types::enums::FeedResponseCode::*;
    match header.response_code {
        Ticker => {
            crate::feed::pool::with_ticker(&pools.ticker, header, payload, |rec| {
                if let Some(cb) = &callbacks.on_ticker {
                    cb(rec);
                }
                Ok(())
            })?;
        }
        Quote => {
            crate::feed::pool::with_quote(&pools.quote, header, payload, |rec| {
                if let Some(cb) = &callbacks.on_quote {
                    cb(rec);
                }
                Ok(())
            })?;
        }
        OI => {
            crate::feed::pool::with_oi(&pools.oi, header, payload, |rec| {
                if let Some(cb) = &callbacks.on_oi {
                    cb(rec);
                }
                Ok(())
            })?;
        }
        PrevClose => {
            crate::feed::pool::with_prev_close(&pools.prev_close, header, payload, |rec| {
                if let Some(cb) = &callbacks.on_prev_close {
                    cb(rec);
                }
                Ok(())
            })?;
        }
        Full => {
            crate::feed::pool::with_full(&pools.full, header, payload, |rec| {
                if let Some(cb) = &callbacks.on_full {
                    cb(rec);
                }
                Ok(())
            })?;
        }
        Depth20 | Depth200 => {
            crate::feed::pool::with_depth(&pools.depth, header, payload, |rec| {
                if let Some(cb) = &callbacks.on_depth {
                    cb(rec);
                }
                Ok(())
            })?;
        }
        Disconnect | MarketStatus | Index => {
            debug!(code = ?header.response_code, "unhandled feed packet kind");
        }
    }
    Ok(())
}

fn dispatch_text(order_callback: &Option<OrderCallback>, text: &str) -> Result<()> {
    let alert = envelope::parse_order_alert(text)?;
    if let Some(cb) = order_callback {
        cb(&alert);
    }
    Ok(())
}

async fn run_worker(
    queue: Arc<WorkQueue>,
    pools: Arc<PacketPools>,
    callbacks: CallbackRegistry,
    shutdown: CancellationToken,
) {
    loop {
        let item = tokio::select! {
            _ = shutdown.cancelled() => return,
            item = queue.pop() => item,
        };
        let market = callbacks.market.read().unwrap().clone();
        let order = callbacks.order.read().unwrap().clone();

        let outcome = match &item {
            WorkItem::Binary(bytes) => {
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| dispatch_binary(&pools, &market, bytes)))
            }
            WorkItem::Text(text) => {
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| dispatch_text(&order, text)))
            }
        };

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => callbacks.report_error(e).await,
            Err(_panic) => {
                callbacks
                    .report_error(BrokerError::HandlerFault("callback panicked".into()))
                    .await
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// A handle to a managed WebSocket connection. Cloning shares the
/// underlying socket, callbacks, and subscription state.
#[derive(Clone)]
pub struct Connection {
    pub id: u64,
    url: String,
    kind: FeedKind,
    auth: AuthMode,
    config: FeedConfig,
    state: Arc<StdMutex<ConnectionState>>,
    stats: Arc<StdMutex<ConnectionStats>>,
    subscriptions: Arc<AsyncMutex<HashMap<Instrument, u8>>>,
    write_tx: Arc<StdMutex<Option<mpsc::UnboundedSender<Message>>>>,
    pools: Arc<PacketPools>,
    pub callbacks: CallbackRegistry,
    middleware: MiddlewareChain,
    shutdown: CancellationToken,
    /// Cancellation handle for the currently running read/write/ping/health/
    /// worker task set. Replaced (and the old one cancelled) at the start of
    /// every `connect()`, so a reconnect tears down the prior generation's
    /// tasks instead of leaving them running against an orphaned socket.
    generation: Arc<StdMutex<CancellationToken>>,
    reconnect_attempt: Arc<AtomicU32>,
}

impl Connection {
    /// Construct an unconnected handle. Call [`Self::connect`] to open the
    /// socket; the first attempt's failure is surfaced synchronously.
    pub fn new(id: u64, url: impl Into<String>, kind: FeedKind, auth: AuthMode, config: FeedConfig) -> Self {
        Self::with_callbacks(id, url, kind, auth, config, CallbackRegistry::new())
    }

    /// Construct a connection that shares its callback registry with an
    /// existing one — used by [`crate::feed::fleet::ConnectionPool`] so a
    /// callback registered once applies to every connection it opens,
    /// including ones opened later.
    pub fn with_callbacks(
        id: u64,
        url: impl Into<String>,
        kind: FeedKind,
        auth: AuthMode,
        config: FeedConfig,
        callbacks: CallbackRegistry,
    ) -> Self {
        let shutdown = CancellationToken::new();
        let generation = shutdown.child_token();
        Self {
            id,
            url: url.into(),
            kind,
            auth,
            config,
            state: Arc::new(StdMutex::new(ConnectionState::Disconnected)),
            stats: Arc::new(StdMutex::new(ConnectionStats::default())),
            subscriptions: Arc::new(AsyncMutex::new(HashMap::new())),
            write_tx: Arc::new(StdMutex::new(None)),
            pools: Arc::new(PacketPools::new(256)),
            callbacks,
            middleware: MiddlewareChain::new(),
            shutdown,
            generation: Arc::new(StdMutex::new(generation)),
            reconnect_attempt: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.lock().unwrap()
    }

    pub fn stats(&self) -> ConnectionStats {
        self.stats.lock().unwrap().clone()
    }

    fn set_state(&self, s: ConnectionState) {
        *self.state.lock().unwrap() = s;
    }

    /// Open the socket, perform the auth handshake, and spawn the read,
    /// write, ping, health, and callback-worker tasks. Reconnects after
    /// this succeeds are handled internally and never surface an error.
    pub async fn connect(&self, deadline: Duration) -> Result<()> {
        self.set_state(ConnectionState::Connecting);
        let ws = self.open_socket(deadline).await.map_err(|e| {
            self.set_state(ConnectionState::Disconnected);
            e
        })?;
        self.set_state(ConnectionState::Connected);
        info!(id = self.id, url = %self.url, "feed connection established");

        // Retire the previous generation's read/write/ping/health/worker
        // tasks before spawning this one's, so a reconnect doesn't leave
        // them running against a socket nobody reads from anymore.
        let generation = {
            let mut current = self.generation.lock().unwrap();
            current.cancel();
            let next = self.shutdown.child_token();
            *current = next.clone();
            next
        };

        let (sink, source) = ws.split();
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        *self.write_tx.lock().unwrap() = Some(write_tx.clone());

        if let AuthMode::PostOpenFrame(token) = &self.auth {
            let frame = serde_json::to_string(&AuthorizationFrame { Authorization: token })
                .map_err(BrokerError::from)?;
            write_tx
                .send(Message::Text(frame.into()))
                .map_err(|_| BrokerError::SocketIO("auth frame send failed".into()))?;
        }

        let queue = Arc::new(WorkQueue::new(self.config.callback_queue_capacity));
        for _ in 0..self.config.callback_workers {
            tokio::spawn(run_worker(
                queue.clone(),
                self.pools.clone(),
                self.callbacks.clone(),
                generation.clone(),
            ));
        }

        let (health_tx, health_rx) = mpsc::channel(4);
        let health_monitor = Arc::new(HealthMonitor::new(self.config.pong_wait, health_tx));
        let health_shutdown = generation.clone();
        let health_monitor_task = health_monitor.clone();
        tokio::spawn(async move {
            health_monitor_task.run(health_shutdown).await;
        });

        self.spawn_write_loop(sink, write_rx, generation.clone());
        self.spawn_ping_loop(write_tx.clone(), generation.clone());
        self.spawn_read_loop(source, queue, health_monitor, health_rx, generation);

        // The socket is up regardless of whether replaying old subscriptions
        // succeeds, so a resubscribe failure is reported, not treated as a
        // failed connect.
        if let Err(e) = self.resubscribe_all().await {
            self.callbacks.report_error(e).await;
        }
        Ok(())
    }

    async fn open_socket(&self, deadline: Duration) -> Result<WsStream> {
        let attempt = tokio::time::timeout(deadline, connect_async(&self.url)).await;
        match attempt {
            Ok(Ok((ws, _resp))) => Ok(ws),
            Ok(Err(e)) => Err(BrokerError::ConnectFailed(e.to_string())),
            Err(_) => Err(BrokerError::ConnectFailed(format!(
                "connect timed out after {deadline:?}"
            ))),
        }
    }

    fn spawn_write_loop(&self, mut sink: WsSink, mut rx: mpsc::UnboundedReceiver<Message>, shutdown: CancellationToken) {
        let write_timeout = self.config.write_timeout;
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        let _ = sink.close().await;
                        return;
                    }
                    msg = rx.recv() => {
                        let Some(msg) = msg else { return };
                        match tokio::time::timeout(write_timeout, sink.send(msg)).await {
                            Ok(Ok(())) => {}
                            Ok(Err(e)) => {
                                warn!(error = %e, "write failed, closing send half");
                                return;
                            }
                            Err(_) => {
                                warn!("write timed out, closing send half");
                                return;
                            }
                        }
                    }
                }
            }
        });
    }

    fn spawn_ping_loop(&self, write_tx: mpsc::UnboundedSender<Message>, shutdown: CancellationToken) {
        let interval = self.config.ping_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => return,
                    _ = ticker.tick() => {
                        if write_tx.send(Message::Ping(Vec::new().into())).is_err() {
                            return;
                        }
                    }
                }
            }
        });
    }

    fn spawn_read_loop(
        &self,
        mut source: WsSource,
        queue: Arc<WorkQueue>,
        health_monitor: Arc<HealthMonitor>,
        mut health_rx: mpsc::Receiver<HealthSignal>,
        shutdown: CancellationToken,
    ) {
        let this = self.clone();
        let middleware = self.middleware.clone();
        let kind = self.kind;
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        this.set_state(ConnectionState::Closed);
                        return;
                    }
                    signal = health_rx.recv() => {
                        // `None` means the health monitor task ended (e.g. on
                        // shutdown); either way there's nothing more to wait on.
                        if signal.is_some() {
                            this.begin_reconnect().await;
                        }
                        return;
                    }
                    msg = source.next() => {
                        match msg {
                            Some(Ok(Message::Pong(_))) => health_monitor.record_pong(),
                            Some(Ok(Message::Ping(_))) => health_monitor.record_pong(),
                            Some(Ok(Message::Binary(bytes))) if kind != FeedKind::Order => {
                                this.record_receive(bytes.len());
                                if middleware.admit(&bytes) {
                                    for frame in split_frames(&bytes) {
                                        queue.push(WorkItem::Binary(frame)).await;
                                    }
                                }
                            }
                            Some(Ok(Message::Text(text))) if kind == FeedKind::Order => {
                                this.record_receive(text.len());
                                let bytes = text.as_bytes();
                                if middleware.admit(bytes) {
                                    queue.push(WorkItem::Text(text.to_string())).await;
                                }
                            }
                            Some(Ok(Message::Close(_))) | None => {
                                info!(id = this.id, "feed connection closed by peer");
                                this.begin_reconnect().await;
                                return;
                            }
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                this.stats.lock().unwrap().last_error = Some(e.to_string());
                                warn!(error = %e, "socket read error");
                                this.begin_reconnect().await;
                                return;
                            }
                        }
                    }
                }
            }
        });
    }

    fn record_receive(&self, bytes: usize) {
        let mut stats = self.stats.lock().unwrap();
        stats.messages_received += 1;
        stats.bytes_received += bytes as u64;
    }

    async fn begin_reconnect(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.set_state(ConnectionState::Reconnecting);
        *self.write_tx.lock().unwrap() = None;

        loop {
            let attempt = self.reconnect_attempt.fetch_add(1, Ordering::SeqCst) + 1;
            if self.config.max_reconnect_attempts != 0 && attempt > self.config.max_reconnect_attempts {
                warn!(id = self.id, attempt, "giving up after max reconnect attempts");
                self.set_state(ConnectionState::Closed);
                return;
            }
            let delay = backoff_duration(attempt, self.config.reconnect_delay);
            info!(id = self.id, attempt, ?delay, "reconnecting after backoff");
            tokio::time::sleep(delay).await;

            match self.connect(self.config.connect_timeout).await {
                Ok(()) => {
                    self.reconnect_attempt.store(0, Ordering::SeqCst);
                    self.stats.lock().unwrap().reconnect_count += 1;
                    return;
                }
                Err(e) => {
                    warn!(error = %e, "reconnect attempt failed, retrying");
                    continue;
                }
            }
        }
    }

    /// Send a subscribe or unsubscribe frame for `instruments`, chunked
    /// into groups of at most `MaxBatchSize`. Persists the set for replay
    /// after reconnect (subscribe) or removes it (unsubscribe), keyed by
    /// `request_code` rather than a separate bool so re-subscription
    /// always uses the originally requested mode.
    pub async fn send_subscription(&self, instruments: &[Instrument], request_code: FeedRequestCode, is_subscribe: bool) -> Result<()> {
        if self.state() != ConnectionState::Connected {
            return Err(BrokerError::NotConnected);
        }
        {
            let mut subs = self.subscriptions.lock().await;
            for inst in instruments {
                if is_subscribe {
                    subs.insert(*inst, request_code as u8);
                } else {
                    subs.remove(inst);
                }
            }
        }
        for chunk in instruments.chunks(self.config.max_batch_size) {
            self.send_chunk(chunk, request_code)?;
        }
        Ok(())
    }

    fn send_chunk(&self, chunk: &[Instrument], request_code: FeedRequestCode) -> Result<()> {
        let request = FeedSubscribeRequest {
            RequestCode: request_code as u8,
            InstrumentCount: chunk.len(),
            InstrumentList: chunk.iter().map(WireInstrument::from).collect(),
        };
        let text = serde_json::to_string(&request)?;
        let tx = self.write_tx.lock().unwrap().clone().ok_or(BrokerError::NotConnected)?;
        tx.send(Message::Text(text.into()))
            .map_err(|_| BrokerError::SocketIO("send queue closed".into()))
    }

    /// Replay the persisted subscription set, grouped by request code and
    /// re-chunked, after a (re)connect.
    async fn resubscribe_all(&self) -> Result<()> {
        let subs = self.subscriptions.lock().await;
        if subs.is_empty() {
            return Ok(());
        }
        let mut by_code: HashMap<u8, Vec<Instrument>> = HashMap::new();
        for (inst, code) in subs.iter() {
            by_code.entry(*code).or_default().push(*inst);
        }
        drop(subs);
        for (code, instruments) in by_code {
            let request_code = request_code_from_u8(code);
            for chunk in instruments.chunks(self.config.max_batch_size) {
                self.send_chunk(chunk, request_code)?;
            }
        }
        Ok(())
    }

    pub async fn subscribed_count(&self) -> usize {
        self.subscriptions.lock().await.len()
    }

    /// Gracefully close: stop accepting new callbacks, drain the send
    /// queue, and close the socket. After this returns, no further user
    /// callback will be invoked.
    pub async fn disconnect(&self) {
        self.set_state(ConnectionState::Closing);
        self.shutdown.cancel();
        *self.write_tx.lock().unwrap() = None;
        self.set_state(ConnectionState::Closed);
    }
}

fn request_code_from_u8(code: u8) -> FeedRequestCode {
    match code {
        x if x == FeedRequestCode::SubscribeTicker as u8 => FeedRequestCode::SubscribeTicker,
        x if x == FeedRequestCode::SubscribeQuote as u8 => FeedRequestCode::SubscribeQuote,
        x if x == FeedRequestCode::SubscribeFull as u8 => FeedRequestCode::SubscribeFull,
        x if x == FeedRequestCode::SubscribeFullMarketDepth as u8 => FeedRequestCode::SubscribeFullMarketDepth,
        _ => FeedRequestCode::SubscribeTicker,
    }
}

/// Exponential backoff with a multiplicative factor and cap, plus full
/// jitter (the delay is sampled uniformly from `[0, computed_cap]`) so a
/// fleet of connections doesn't retry in lockstep.
fn backoff_duration(attempt: u32, base: Duration) -> Duration {
    let exp = base.as_secs_f64() * RECONNECT_BACKOFF_FACTOR.powi(attempt.saturating_sub(1) as i32);
    let capped = exp.min(RECONNECT_BACKOFF_CAP.as_secs_f64());
    let jittered = rand::thread_rng().gen_range(0.0..=capped.max(0.001));
    Duration::from_secs_f64(jittered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_frames_handles_multiple_packets_in_one_message() {
        let header_bytes = |code: u8, len: u16| -> Vec<u8> {
            let mut v = vec![code];
            v.extend_from_slice(&len.to_le_bytes());
            v.push(1);
            v.extend_from_slice(&1i32.to_le_bytes());
            v
        };
        let mut first = header_bytes(2, 16);
        first.extend_from_slice(&[0u8; 8]);
        let mut second = header_bytes(5, 12);
        second.extend_from_slice(&[0u8; 4]);

        let mut combined = first.clone();
        combined.extend_from_slice(&second);

        let frames = split_frames(&combined);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], first);
        assert_eq!(frames[1], second);
    }

    #[test]
    fn backoff_respects_cap() {
        let d = backoff_duration(20, Duration::from_secs(5));
        assert!(d <= RECONNECT_BACKOFF_CAP);
    }

    #[test]
    fn backoff_grows_with_attempt_before_cap() {
        // First attempt's upper bound should be well under the cap.
        let first_cap = 5.0 * RECONNECT_BACKOFF_FACTOR.powi(0);
        assert!(first_cap < RECONNECT_BACKOFF_CAP.as_secs_f64());
    }
}
