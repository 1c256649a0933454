//! Per-connection liveness monitor.
//!
//! One [`HealthMonitor`] is created per [`crate::feed::connection::Connection`].
//! It tracks the last observed pong and, when `PongWait` is exceeded,
//! requests a reconnect. It holds only a cloneable channel sender back to
//! the connection rather than the connection itself, breaking the cyclic
//! ownership a direct back-reference would create — the same
//! bounded-capability pattern the teacher's manager uses for its stats
//! handles, generalized here to liveness signaling.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, warn};

use crate::error::BrokerError;

/// Three-valued health status for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Pong observed well within the liveness window.
    Healthy,
    /// More than half of `PongWait` has elapsed since the last pong.
    Degraded,
    /// `PongWait` has elapsed with no pong.
    Unhealthy,
}

/// A signal the health monitor sends back to its owning connection.
#[derive(Debug)]
pub enum HealthSignal {
    /// No pong observed within `PongWait`; the connection should reconnect.
    LivenessLost(Duration),
}

/// Tracks last-pong time for a single connection and raises
/// [`HealthSignal::LivenessLost`] when the liveness bound is exceeded.
pub struct HealthMonitor {
    last_pong: Mutex<Instant>,
    pong_wait: Duration,
    signal_tx: mpsc::Sender<HealthSignal>,
}

impl HealthMonitor {
    /// Construct a monitor that reports to `signal_tx` when liveness is lost.
    pub fn new(pong_wait: Duration, signal_tx: mpsc::Sender<HealthSignal>) -> Self {
        Self {
            last_pong: Mutex::new(Instant::now()),
            pong_wait,
            signal_tx,
        }
    }

    /// Record that a pong was just observed.
    pub fn record_pong(&self) {
        *self.last_pong.lock().unwrap() = Instant::now();
    }

    /// Time elapsed since the last recorded pong.
    pub fn elapsed_since_pong(&self) -> Duration {
        self.last_pong.lock().unwrap().elapsed()
    }

    /// Current three-valued health status.
    pub fn status(&self) -> HealthStatus {
        let elapsed = self.elapsed_since_pong();
        if elapsed > self.pong_wait {
            HealthStatus::Unhealthy
        } else if elapsed > self.pong_wait / 2 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }

    /// Run the monitoring loop until `shutdown` fires. Checks liveness at
    /// a quarter of `PongWait` so the `LivenessLost` signal fires close to
    /// the bound rather than up to a full tick late.
    pub async fn run(&self, shutdown: tokio_util::sync::CancellationToken) {
        let check_interval = (self.pong_wait / 4).max(Duration::from_millis(100));
        let mut ticker = interval(check_interval);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("health monitor shutting down");
                    return;
                }
                _ = ticker.tick() => {
                    if self.status() == HealthStatus::Unhealthy {
                        let elapsed = self.elapsed_since_pong();
                        warn!(?elapsed, pong_wait = ?self.pong_wait, "liveness lost, requesting reconnect");
                        if self
                            .signal_tx
                            .send(HealthSignal::LivenessLost(elapsed))
                            .await
                            .is_err()
                        {
                            // Connection already gone; nothing left to signal.
                            return;
                        }
                        // Give the connection a chance to reconnect and
                        // record a fresh pong before checking again.
                        self.record_pong();
                    }
                }
            }
        }
    }
}

impl From<HealthSignal> for BrokerError {
    fn from(signal: HealthSignal) -> Self {
        match signal {
            HealthSignal::LivenessLost(d) => BrokerError::LivenessLost(d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn status_starts_healthy() {
        let (tx, _rx) = mpsc::channel(1);
        let monitor = HealthMonitor::new(Duration::from_secs(40), tx);
        assert_eq!(monitor.status(), HealthStatus::Healthy);
    }

    #[tokio::test(start_paused = true)]
    async fn status_transitions_to_degraded_then_unhealthy() {
        let (tx, _rx) = mpsc::channel(1);
        let monitor = HealthMonitor::new(Duration::from_secs(40), tx);

        tokio::time::advance(Duration::from_secs(21)).await;
        assert_eq!(monitor.status(), HealthStatus::Degraded);

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(monitor.status(), HealthStatus::Unhealthy);
    }

    #[tokio::test(start_paused = true)]
    async fn run_signals_liveness_lost_after_pong_wait() {
        let (tx, mut rx) = mpsc::channel(1);
        let monitor = HealthMonitor::new(Duration::from_secs(40), tx);
        let shutdown = tokio_util::sync::CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        let handle = tokio::spawn(async move {
            monitor.run(shutdown_clone).await;
        });

        tokio::time::advance(Duration::from_secs(41)).await;
        let signal = rx.recv().await.expect("expected a liveness signal");
        assert!(matches!(signal, HealthSignal::LivenessLost(_)));

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn record_pong_resets_elapsed() {
        let (tx, _rx) = mpsc::channel(1);
        let monitor = HealthMonitor::new(Duration::from_secs(40), tx);
        monitor.record_pong();
        assert!(monitor.elapsed_since_pong() < Duration::from_millis(50));
    }
}
