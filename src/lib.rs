//! # marketlink-rs
//!
//! A Rust client library for a brokerage's REST order API and real-time
//! WebSocket feeds.
//!
//! - [`client`] / [`api`] / [`types`] — a thin REST wrapper over order
//!   lifecycle, funds, and account endpoints.
//! - [`feed`] — the real-time core: a pool of up to five WebSocket
//!   connections streaming binary market data and JSON order updates, with
//!   health-monitored auto-reconnect and zero-allocation packet decoding on
//!   the hot path.
//!
//! ## Quick Start
//!
//! ```no_run
//! use marketlink_rs::client::BrokerClient;
//!
//! #[tokio::main]
//! async fn main() -> marketlink_rs::error::Result<()> {
//!     let client = BrokerClient::new("your-client-id", "your-access-token");
//!     // Use client.get(), client.post(), etc. to interact with the API.
//!     Ok(())
//! }
//! ```
//!
//! See [`feed::facade::MarketFeedClient`] and [`feed::facade::OrderFeedClient`]
//! for the real-time entry points.

pub mod api;
pub mod client;
pub mod constants;
pub mod error;
pub mod feed;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::BrokerClient;
/// Re-export the error type and Result alias.
pub use error::{BrokerError, Result};
