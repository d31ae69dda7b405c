//! Prometheus-compatible operation metrics for the bigo server.
//!
//! Counters and latency sums are lock-free `AtomicU64` fields. The `/metrics`
//! endpoint calls [`OperationMetrics::to_prometheus`] to emit Prometheus text
//! exposition format.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Lock-free request counters.
pub struct OperationMetrics {
    // ── Analysis ──
    pub analyze_count:      AtomicU64,
    pub analyze_latency_us: AtomicU64,

    // ── Storage ──
    pub save_count:         AtomicU64,
    pub save_latency_us:    AtomicU64,
    pub retrieve_count:     AtomicU64,
    pub list_count:         AtomicU64,

    // ── Errors ──
    pub client_error_count: AtomicU64,
    pub server_error_count: AtomicU64,

    // ── Startup ──
    pub start_time:         Instant,
}

impl Default for OperationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationMetrics {
    pub fn new() -> Self {
        Self {
            analyze_count:      AtomicU64::new(0),
            analyze_latency_us: AtomicU64::new(0),
            save_count:         AtomicU64::new(0),
            save_latency_us:    AtomicU64::new(0),
            retrieve_count:     AtomicU64::new(0),
            list_count:         AtomicU64::new(0),
            client_error_count: AtomicU64::new(0),
            server_error_count: AtomicU64::new(0),
            start_time:         Instant::now(),
        }
    }

    /// Increment a counter by 1.
    #[inline]
    pub fn inc(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment a counter and accumulate latency.
    #[inline]
    pub fn record(&self, counter: &AtomicU64, latency: &AtomicU64, elapsed_us: u64) {
        counter.fetch_add(1, Ordering::Relaxed);
        latency.fetch_add(elapsed_us, Ordering::Relaxed);
    }

    /// Format all metrics as Prometheus text exposition. `stored` is the
    /// current number of persisted analyses.
    pub fn to_prometheus(&self, stored: usize) -> String {
        let uptime = self.start_time.elapsed().as_secs();

        let avg = |sum: u64, count: u64| -> f64 {
            if count == 0 { 0.0 } else { sum as f64 / count as f64 }
        };

        let analyze_n   = self.analyze_count.load(Ordering::Relaxed);
        let analyze_lat = self.analyze_latency_us.load(Ordering::Relaxed);
        let save_n      = self.save_count.load(Ordering::Relaxed);
        let save_lat    = self.save_latency_us.load(Ordering::Relaxed);

        format!(
            "\
# HELP bigo_stored_analyses Analyses currently persisted
# TYPE bigo_stored_analyses gauge
bigo_stored_analyses {stored}
# HELP bigo_uptime_seconds Server uptime in seconds
# TYPE bigo_uptime_seconds gauge
bigo_uptime_seconds {uptime}
# HELP bigo_analyze_total Total completed /analyze runs
# TYPE bigo_analyze_total counter
bigo_analyze_total {analyze_n}
# HELP bigo_analyze_latency_avg_us Average /analyze latency in microseconds
# TYPE bigo_analyze_latency_avg_us gauge
bigo_analyze_latency_avg_us {avg_analyze}
# HELP bigo_save_total Total saved analyses
# TYPE bigo_save_total counter
bigo_save_total {save_n}
# HELP bigo_save_latency_avg_us Average /save_analysis latency in microseconds
# TYPE bigo_save_latency_avg_us gauge
bigo_save_latency_avg_us {avg_save}
# HELP bigo_retrieve_total Total successful /retrieve_analysis lookups
# TYPE bigo_retrieve_total counter
bigo_retrieve_total {retrieve}
# HELP bigo_list_total Total /all_analyses calls
# TYPE bigo_list_total counter
bigo_list_total {list}
# HELP bigo_client_error_total Responses with a 4xx status
# TYPE bigo_client_error_total counter
bigo_client_error_total {client_errors}
# HELP bigo_server_error_total Responses with a 5xx status
# TYPE bigo_server_error_total counter
bigo_server_error_total {server_errors}
",
            avg_analyze   = format!("{:.1}", avg(analyze_lat, analyze_n)),
            avg_save      = format!("{:.1}", avg(save_lat, save_n)),
            retrieve      = self.retrieve_count.load(Ordering::Relaxed),
            list          = self.list_count.load(Ordering::Relaxed),
            client_errors = self.client_error_count.load(Ordering::Relaxed),
            server_errors = self.server_error_count.load(Ordering::Relaxed),
        )
    }
}
