//! Security audit logging.
//!
//! Every security-relevant action becomes a structured, severity-tagged
//! event: a tracing record plus a metrics counter, and optionally a copy to
//! an external sink. Logging never propagates a failure into the caller's
//! request path, and the external sink is dispatched fire-and-forget so a
//! slow backend cannot stall request handling.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::clock::Clock;
use crate::observability::metrics;

/// Heuristic patterns for obviously hostile input. Not a completeness
/// contract; a match is a signal, not a verdict.
static SUSPICIOUS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)union\s+select",
        r"(?i)drop\s+table",
        r"(?i)insert\s+into",
        r"(?i)delete\s+from",
        r"(?i)or\s+1\s*=\s*1",
        r"(?i)<script",
        r"(?i)javascript:",
        r"\.\./",
        r"(?i)\badmin\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Event severity, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// A structured audit record.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityEvent {
    pub id: Uuid,
    pub timestamp_ms: u64,
    pub event: String,
    pub details: Map<String, Value>,
    pub severity: Severity,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Destination for audit events beyond the process log, e.g. an external
/// monitoring service. Implementations must not block; slow delivery should
/// happen on the sink's own tasks.
pub trait AuditSink: Send + Sync + 'static {
    fn record(&self, event: SecurityEvent);
}

/// Security event logger.
pub struct SecurityAudit {
    clock: Arc<dyn Clock>,
    sink: Option<Arc<dyn AuditSink>>,
}

impl SecurityAudit {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock, sink: None }
    }

    /// Attach an external sink; events are copied to it off the caller's
    /// path.
    pub fn with_sink(clock: Arc<dyn Clock>, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            clock,
            sink: Some(sink),
        }
    }

    /// Record an event with no client attribution.
    pub fn log_event(&self, event: &str, details: Map<String, Value>, severity: Severity) {
        self.log_event_with_client(event, details, severity, None, None);
    }

    /// Record an event attributed to a client IP and user agent.
    pub fn log_event_with_client(
        &self,
        event: &str,
        details: Map<String, Value>,
        severity: Severity,
        ip: Option<String>,
        user_agent: Option<String>,
    ) {
        let record = SecurityEvent {
            id: Uuid::new_v4(),
            timestamp_ms: self.clock.now_millis(),
            event: event.to_string(),
            details,
            severity,
            ip,
            user_agent,
        };

        emit(&record);
        metrics::record_audit_event(severity.as_str());

        if let Some(sink) = &self.sink {
            let sink = sink.clone();
            // Spawn when a runtime is available; record inline when the
            // caller is synchronous (tests, setup code).
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move { sink.record(record) });
                }
                Err(_) => sink.record(record),
            }
        }
    }

    /// Check free-form activity text against the hostile-input denylist.
    /// A match is logged as a high severity event and returns `true`.
    pub fn detect_suspicious_activity(&self, user_id: &str, activity: &str) -> bool {
        let matched = SUSPICIOUS_PATTERNS.iter().any(|p| p.is_match(activity));
        if matched {
            let mut details = Map::new();
            details.insert("user_id".to_string(), Value::from(user_id));
            details.insert("activity".to_string(), Value::from(activity));
            self.log_event("suspicious_activity", details, Severity::High);
        }
        matched
    }
}

/// Write the event to the process log at a level matching its severity.
/// Serialization problems degrade to an empty details field rather than
/// reaching the caller.
fn emit(record: &SecurityEvent) {
    let details = serde_json::to_string(&record.details).unwrap_or_default();
    let ip = record.ip.as_deref().unwrap_or("-");
    let user_agent = record.user_agent.as_deref().unwrap_or("-");

    match record.severity {
        Severity::Low => tracing::info!(
            id = %record.id,
            event = %record.event,
            %details,
            ip,
            user_agent,
            "security event"
        ),
        Severity::Medium => tracing::warn!(
            id = %record.id,
            event = %record.event,
            %details,
            ip,
            user_agent,
            "security event"
        ),
        Severity::High => tracing::error!(
            id = %record.id,
            event = %record.event,
            %details,
            ip,
            user_agent,
            "security event"
        ),
    }
}
