//! Observability for the security layer.
//!
//! Structured logs via `tracing`, cheap counters via `metrics`. The audit
//! logger and the rate-limit middleware are the producers; exposition (a
//! Prometheus endpoint, log shipping) belongs to the host application.

pub mod logging;
pub mod metrics;
