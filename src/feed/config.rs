//! Feed configuration, shared by every facade and the connection pool.
//!
//! A plain data struct with a `Default` impl matching the documented
//! defaults, plus a builder whose setters clamp out-of-range values instead
//! of rejecting them outright.

use std::time::Duration;

/// Tunable limits and timeouts for a feed client or pool.
#[derive(Debug, Clone, Copy)]
pub struct FeedConfig {
    /// Hard cap on pool size. Default 5.
    pub max_connections: usize,
    /// Per-connection subscription cap. Default 5000.
    pub max_instruments_per_conn: usize,
    /// Max instruments per subscribe/unsubscribe frame. Default 100.
    pub max_batch_size: usize,
    /// Abort `connect()` after this long. Default 30s.
    pub connect_timeout: Duration,
    /// Per-frame send timeout. Default 10s.
    pub write_timeout: Duration,
    /// Ping cadence. Default 10s.
    pub ping_interval: Duration,
    /// Liveness bound: reconnect if no pong within this long. Default 40s.
    pub pong_wait: Duration,
    /// Initial reconnect backoff. Default 5s.
    pub reconnect_delay: Duration,
    /// 0 means unlimited reconnect attempts.
    pub max_reconnect_attempts: u32,
    /// Socket read buffer size in bytes. Default 4096.
    pub read_buffer_size: usize,
    /// Socket write buffer size in bytes. Default 4096.
    pub write_buffer_size: usize,
    /// Number of worker tasks draining the per-connection callback queue.
    /// Derived from `read_buffer_size` by default; see `DESIGN.md` for why
    /// callback dispatch is bounded rather than fire-and-forget per message.
    pub callback_workers: usize,
    /// Capacity of the bounded channel feeding `callback_workers`.
    pub callback_queue_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            max_instruments_per_conn: 5_000,
            max_batch_size: 100,
            connect_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(10),
            ping_interval: Duration::from_secs(10),
            pong_wait: Duration::from_secs(40),
            reconnect_delay: Duration::from_secs(5),
            max_reconnect_attempts: 0,
            read_buffer_size: 4096,
            write_buffer_size: 4096,
            callback_workers: 4,
            callback_queue_capacity: 1024,
        }
    }
}

/// Multiplicative backoff factor applied to `reconnect_delay` on each
/// successive failed reconnect attempt.
pub const RECONNECT_BACKOFF_FACTOR: f64 = 2.0;

/// Upper bound on reconnect backoff, regardless of attempt count.
pub const RECONNECT_BACKOFF_CAP: Duration = Duration::from_secs(60);

/// Builder for [`FeedConfig`] that clamps values into documented ranges
/// instead of panicking or erroring.
#[derive(Debug, Clone, Copy)]
pub struct FeedConfigBuilder {
    config: FeedConfig,
}

impl FeedConfigBuilder {
    /// Start from the documented defaults.
    pub fn new() -> Self {
        Self {
            config: FeedConfig::default(),
        }
    }

    /// Set the connection cap, clamped to 1..=5.
    pub fn max_connections(mut self, n: usize) -> Self {
        self.config.max_connections = n.clamp(1, 5);
        self
    }

    /// Set the per-connection instrument cap, clamped to 1..=5000.
    pub fn max_instruments_per_conn(mut self, n: usize) -> Self {
        self.config.max_instruments_per_conn = n.clamp(1, 5_000);
        self
    }

    /// Set the max batch size, clamped to 1..=100.
    pub fn max_batch_size(mut self, n: usize) -> Self {
        self.config.max_batch_size = n.clamp(1, 100);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, d: Duration) -> Self {
        self.config.connect_timeout = d;
        self
    }

    /// Set the per-frame write timeout.
    pub fn write_timeout(mut self, d: Duration) -> Self {
        self.config.write_timeout = d;
        self
    }

    /// Set the ping cadence.
    pub fn ping_interval(mut self, d: Duration) -> Self {
        self.config.ping_interval = d;
        self
    }

    /// Set the pong-wait liveness bound.
    pub fn pong_wait(mut self, d: Duration) -> Self {
        self.config.pong_wait = d;
        self
    }

    /// Set the initial reconnect backoff delay.
    pub fn reconnect_delay(mut self, d: Duration) -> Self {
        self.config.reconnect_delay = d;
        self
    }

    /// Set the max reconnect attempts (0 = unlimited).
    pub fn max_reconnect_attempts(mut self, n: u32) -> Self {
        self.config.max_reconnect_attempts = n;
        self
    }

    /// Set the number of callback worker tasks per connection, clamped to
    /// at least 1.
    pub fn callback_workers(mut self, n: usize) -> Self {
        self.config.callback_workers = n.max(1);
        self
    }

    /// Set the bounded callback queue capacity, clamped to at least 1.
    pub fn callback_queue_capacity(mut self, n: usize) -> Self {
        self.config.callback_queue_capacity = n.max(1);
        self
    }

    /// Finish building.
    pub fn build(self) -> FeedConfig {
        self.config
    }
}

impl Default for FeedConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = FeedConfig::default();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.max_instruments_per_conn, 5_000);
        assert_eq!(config.max_batch_size, 100);
        assert_eq!(config.ping_interval, Duration::from_secs(10));
        assert_eq!(config.pong_wait, Duration::from_secs(40));
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
        assert_eq!(config.max_reconnect_attempts, 0);
    }

    #[test]
    fn builder_clamps_out_of_range_values() {
        let config = FeedConfigBuilder::new()
            .max_connections(99)
            .max_instruments_per_conn(999_999)
            .max_batch_size(0)
            .build();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.max_instruments_per_conn, 5_000);
        assert_eq!(config.max_batch_size, 1);
    }
}
