//! Real-time WebSocket feed: binary market data, market depth, and JSON
//! order updates.
//!
//! Three public facades ([`facade::MarketFeedClient`], [`facade::DepthFeedClient`],
//! [`facade::OrderFeedClient`]) compose the same [`connection::Connection`]
//! core through [`fleet::ConnectionPool`]. The wire codec ([`codec`]), object
//! pool ([`pool`]), and envelope parser ([`envelope`]) are allocation-free
//! or near-allocation-free on the hot path; [`limiter`] and [`config`] hold
//! the capacity caps and timeouts that bound it; [`health`] and
//! [`middleware`] are the liveness and receive-path plumbing each
//! connection runs.

pub mod codec;
pub mod config;
pub mod connection;
pub mod envelope;
pub mod facade;
pub mod fleet;
pub mod health;
pub mod instrument;
pub mod limiter;
pub mod middleware;
pub mod pool;

pub use config::{FeedConfig, FeedConfigBuilder};
pub use facade::{DepthFeedClient, MarketFeedClient, OrderFeedClient};
pub use instrument::Instrument;
