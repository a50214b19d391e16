//! Request and render metrics.
//!
//! Every reply is counted twice: as a Prometheus counter through the
//! `metrics` facade, and in local atomics that back the JSON snapshot at
//! `/api/metrics`.

use metrics::{counter, histogram};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::reply::{Reply, ReplyKind, Status};

/// Metrics collector for the tile server.
#[derive(Debug)]
pub struct MetricsCollector {
    images: AtomicU64,
    informational: AtomicU64,
    bad_requests: AtomicU64,
    server_errors: AtomicU64,

    renders_total: AtomicU64,
    render_time_us: AtomicU64,
    render_max_us: AtomicU64,

    start_time: Instant,
}

/// Point-in-time view of the collector.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub images: u64,
    pub informational: u64,
    pub bad_requests: u64,
    pub server_errors: u64,
    pub renders_total: u64,
    pub render_avg_ms: f64,
    pub render_max_ms: f64,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            images: AtomicU64::new(0),
            informational: AtomicU64::new(0),
            bad_requests: AtomicU64::new(0),
            server_errors: AtomicU64::new(0),
            renders_total: AtomicU64::new(0),
            render_time_us: AtomicU64::new(0),
            render_max_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Count a finished reply by its outcome.
    pub fn record_reply(&self, reply: &Reply) {
        let (slot, outcome) = match (reply.kind, reply.status) {
            (ReplyKind::Image, _) => (&self.images, "image"),
            (ReplyKind::Informational, _) => (&self.informational, "informational"),
            (ReplyKind::Stock, Status::InternalServerError) => {
                (&self.server_errors, "server_error")
            }
            (ReplyKind::Stock, _) => (&self.bad_requests, "bad_request"),
        };
        slot.fetch_add(1, Ordering::Relaxed);
        counter!("tile_requests_total", "outcome" => outcome).increment(1);
    }

    /// Record the wall time of one renderer call.
    pub fn record_render(&self, elapsed: Duration) {
        let us = elapsed.as_micros() as u64;
        self.renders_total.fetch_add(1, Ordering::Relaxed);
        self.render_time_us.fetch_add(us, Ordering::Relaxed);
        self.render_max_us.fetch_max(us, Ordering::Relaxed);
        histogram!("tile_render_duration_ms").record(elapsed.as_secs_f64() * 1000.0);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let renders = self.renders_total.load(Ordering::Relaxed);
        let total_us = self.render_time_us.load(Ordering::Relaxed);
        let render_avg_ms = if renders == 0 {
            0.0
        } else {
            total_us as f64 / renders as f64 / 1000.0
        };

        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            images: self.images.load(Ordering::Relaxed),
            informational: self.informational.load(Ordering::Relaxed),
            bad_requests: self.bad_requests.load(Ordering::Relaxed),
            server_errors: self.server_errors.load(Ordering::Relaxed),
            renders_total: renders,
            render_avg_ms,
            render_max_ms: self.render_max_us.load(Ordering::Relaxed) as f64 / 1000.0,
        }
    }
}
