//! Optional metrics instrumentation for the gateway.
//!
//! When the `observe` feature is enabled, gateway operations emit counters
//! and histograms via the [`metrics`] crate. A downstream application must
//! install a metrics recorder to collect the data.
//!
//! When the feature is **not** enabled every function in this module is a
//! zero-cost no-op.

/// Record a query (counter + latency histogram + rows returned).
///
/// - `shelf.query.total` – counter
/// - `shelf.query.duration_seconds` – histogram
/// - `shelf.query.rows` – histogram
#[inline]
pub fn record_query(duration: std::time::Duration, rows: usize) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("shelf.query.total").increment(1);
        metrics::histogram!("shelf.query.duration_seconds").record(duration.as_secs_f64());
        metrics::histogram!("shelf.query.rows").record(rows as f64);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (duration, rows);
    }
}

/// Record a write that reached storage.
///
/// - `shelf.write.total` – counter with `op` label (`insert` / `update` / `delete`)
/// - `shelf.write.duration_seconds` – histogram with `op` label
/// - `shelf.write.rows_affected_total` – counter with `op` label
#[inline]
pub fn record_write(op: &'static str, duration: std::time::Duration, affected: usize) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("shelf.write.total", "op" => op).increment(1);
        metrics::histogram!("shelf.write.duration_seconds", "op" => op)
            .record(duration.as_secs_f64());
        metrics::counter!("shelf.write.rows_affected_total", "op" => op).increment(affected as u64);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (op, duration, affected);
    }
}

/// Record a payload refused by validation.
///
/// - `shelf.validation.rejected_total` – counter with `op` label
#[inline]
pub fn record_rejection(op: &'static str) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("shelf.validation.rejected_total", "op" => op).increment(1);
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = op;
    }
}

/// Record a change notification fan-out.
///
/// - `shelf.notify.total` – counter
#[inline]
pub fn record_notification() {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("shelf.notify.total").increment(1);
    }
}
