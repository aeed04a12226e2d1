//! Metric recording helpers.
//!
//! Counters only; the host application decides how (and whether) to expose
//! them. Without an installed recorder these are no-ops.

use metrics::counter;

/// Count a rejected request.
pub fn record_rate_limited(reason: &'static str) {
    counter!("security_rate_limited_total", "reason" => reason).increment(1);
}

/// Count an audit event by severity.
pub fn record_audit_event(severity: &'static str) {
    counter!("security_audit_events_total", "severity" => severity).increment(1);
}
