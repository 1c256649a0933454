//! Receive-path middleware chain.
//!
//! Middleware sees every raw frame before it is decoded and dispatched to a
//! user callback, and can short-circuit a frame (returning `false` drops
//! it silently — used by rate-limiting or filtering middleware, none of
//! which ship by default). A chain starts empty; [`MetricsMiddleware`] is
//! provided as an optional stage callers can `push` when they want
//! frame/byte counters independent of [`crate::feed::connection::ConnectionStats`].
//! Recovery from a faulting callback is not a middleware stage at all — it's
//! handled at the dispatch site in [`crate::feed::connection`] via
//! `catch_unwind`, reported through the same `on_error` path.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A single stage in the receive-path middleware chain.
pub trait Middleware: Send + Sync {
    /// Inspect a raw frame before it is decoded. Returning `false` drops
    /// the frame without dispatching it to any callback.
    fn before_dispatch(&self, raw: &[u8]) -> bool;
}

/// Counts frames and bytes seen on the receive path.
#[derive(Debug, Default)]
pub struct MetricsMiddleware {
    frames_seen: AtomicU64,
    bytes_seen: AtomicU64,
}

impl MetricsMiddleware {
    /// Total frames observed so far.
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen.load(Ordering::Relaxed)
    }

    /// Total bytes observed so far.
    pub fn bytes_seen(&self) -> u64 {
        self.bytes_seen.load(Ordering::Relaxed)
    }
}

impl Middleware for MetricsMiddleware {
    fn before_dispatch(&self, raw: &[u8]) -> bool {
        self.frames_seen.fetch_add(1, Ordering::Relaxed);
        self.bytes_seen.fetch_add(raw.len() as u64, Ordering::Relaxed);
        true
    }
}

/// An ordered chain of middleware run on every inbound frame.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    stages: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    /// An empty chain.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a middleware stage to the end of the chain.
    pub fn push(&mut self, middleware: Arc<dyn Middleware>) {
        self.stages.push(middleware);
    }

    /// Run every stage in order; returns `false` as soon as any stage
    /// short-circuits the frame.
    pub fn admit(&self, raw: &[u8]) -> bool {
        self.stages.iter().all(|stage| stage.before_dispatch(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectAll;
    impl Middleware for RejectAll {
        fn before_dispatch(&self, _raw: &[u8]) -> bool {
            false
        }
    }

    #[test]
    fn empty_chain_admits_everything() {
        let chain = MiddlewareChain::new();
        assert!(chain.admit(b"anything"));
    }

    #[test]
    fn metrics_middleware_counts_frames_and_bytes() {
        let metrics = Arc::new(MetricsMiddleware::default());
        let mut chain = MiddlewareChain::new();
        chain.push(metrics.clone());

        assert!(chain.admit(b"hello"));
        assert!(chain.admit(b"world!"));

        assert_eq!(metrics.frames_seen(), 2);
        assert_eq!(metrics.bytes_seen(), 11);
    }

    #[test]
    fn a_short_circuiting_stage_drops_the_frame() {
        let mut chain = MiddlewareChain::new();
        chain.push(Arc::new(RejectAll));
        assert!(!chain.admit(b"dropped"));
    }
}
