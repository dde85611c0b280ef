//! JSON-RPC message and envelope representations
//!
//! Inbound lines decode into [`Message`]; every message is answered by one
//! [`Response`] carrying either a result or an error, never both.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

pub const JSONRPC_VERSION: &str = "2.0";

/// One inbound request. Only the outer shape is checked at decode time:
/// any JSON object is a message, so its id can always be echoed.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Correlation token echoed verbatim; a missing id reads as `null`.
    pub id: Value,
    method: Value,
    params: Value,
}

impl Message {
    pub fn new(id: Value, method: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            id,
            method: Value::String(method.into()),
            params: Value::Object(params),
        }
    }

    /// Decodes one line. Fails only for invalid JSON or a non-object value.
    pub fn decode(line: &str) -> Result<Self, serde_json::Error> {
        let object: Map<String, Value> = serde_json::from_str(line)?;
        Ok(Self::from(object))
    }

    /// The method name, if the request carried a string `method`.
    pub fn method(&self) -> Option<&str> {
        self.method.as_str()
    }

    /// Splits the message into its id, raw method and params. Params that
    /// are absent or not an object read as empty.
    pub fn into_parts(self) -> (Value, Value, Map<String, Value>) {
        let params = match self.params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        (self.id, self.method, params)
    }
}

impl From<Map<String, Value>> for Message {
    fn from(mut object: Map<String, Value>) -> Self {
        Self {
            id: object.remove("id").unwrap_or(Value::Null),
            method: object.remove("method").unwrap_or(Value::Null),
            params: object.remove("params").unwrap_or(Value::Null),
        }
    }
}

/// Renders a request-supplied name for an error message: strings as-is,
/// anything else as its JSON text (`null`, `5`, ...).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl From<&AppError> for RpcError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(RpcError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: Outcome::Result(result),
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: Outcome::Error(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}
