//! Structured JSON logging, one record per line on stderr.

use serde_json::{json, Value};

/// Logging handle constructed with a component name and passed into the
/// handler; there is no process-wide logger state.
#[derive(Debug, Clone, Copy)]
pub struct HandlerLog {
    component: &'static str,
}

impl HandlerLog {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn info(&self, event: &str, details: Value) {
        self.emit(None, event, details);
    }

    pub fn error(&self, event: &str, details: Value) {
        self.emit(Some("error"), event, details);
    }

    fn emit(&self, level: Option<&str>, event: &str, details: Value) {
        let mut record = json!({
            "component": self.component,
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        });
        if let Some(level) = level {
            record["level"] = Value::from(level);
        }
        eprintln!("{record}");
    }
}
