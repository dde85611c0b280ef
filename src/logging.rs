use std::time::Duration;

use serde_json::{Map, Value};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the process-wide subscriber. Output goes to stderr because
/// stdout carries the protocol.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("custom_tools_mcp=info,warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

pub fn audit_dispatch(
    method: &str,
    id: &Value,
    params: &Map<String, Value>,
    failed: bool,
    elapsed: Duration,
) {
    info!(
        method = %method,
        id = %id,
        params = %redact_audit_params(params),
        outcome = if failed { "failure" } else { "success" },
        duration_ms = elapsed.as_millis() as u64,
        "mcp action audited"
    );
}

pub fn redact_audit_params(params: &Map<String, Value>) -> Value {
    Value::Object(redact_map(params))
}

fn redact_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, item)| {
            if is_sensitive_key(key) {
                (key.clone(), Value::String("[REDACTED]".to_string()))
            } else {
                (key.clone(), redact_audit_value(item))
            }
        })
        .collect()
}

pub fn redact_audit_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(redact_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(redact_audit_value).collect()),
        _ => value.clone(),
    }
}

pub fn is_sensitive_key(key: &str) -> bool {
    let normalized = key.trim().to_ascii_lowercase();
    matches!(
        normalized.as_str(),
        "authorization" | "bearer" | "api_key" | "apikey"
    ) || normalized.contains("token")
        || normalized.contains("secret")
        || normalized.contains("password")
        || normalized.contains("credential")
}
