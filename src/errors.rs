use thiserror::Error;

pub const TOOL_EXECUTION_FAILED: i32 = -32000;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INTERNAL_ERROR: i32 = -32603;

/// Failure raised by a tool body. Any error type converts into it with `?`.
pub type ToolError = Box<dyn std::error::Error + Send + Sync>;

/// Per-request failures. Each one becomes a JSON-RPC error envelope; none
/// of them stops the server loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method '{0}' not found.")]
    MethodNotFound(String),
    #[error("Tool '{0}' not found.")]
    ToolNotFound(String),
    #[error("Error executing tool: {0}")]
    ToolExecution(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> i32 {
        match self {
            Self::MethodNotFound(_) | Self::ToolNotFound(_) => METHOD_NOT_FOUND,
            Self::ToolExecution(_) => TOOL_EXECUTION_FAILED,
            Self::Internal(_) => INTERNAL_ERROR,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Failures of the line transport. Only decode failures are recoverable;
/// everything else ends the session.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
    #[error("malformed message: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl TransportError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_rpc_codes() {
        assert_eq!(AppError::MethodNotFound("x".into()).code(), -32601);
        assert_eq!(AppError::ToolNotFound("x".into()).code(), -32601);
        assert_eq!(AppError::ToolExecution("x".into()).code(), -32000);
        assert_eq!(AppError::internal("x").code(), -32603);
    }

    #[test]
    fn messages_name_the_missing_target() {
        assert_eq!(
            AppError::MethodNotFound("foo/bar".into()).to_string(),
            "Method 'foo/bar' not found."
        );
        assert_eq!(
            AppError::ToolNotFound("missing".into()).to_string(),
            "Tool 'missing' not found."
        );
        assert_eq!(
            AppError::ToolExecution("boom".into()).to_string(),
            "Error executing tool: boom"
        );
    }

    #[test]
    fn only_decode_errors_are_recoverable() {
        let decode = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert!(TransportError::Decode(decode).is_recoverable());

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(!TransportError::Write(io).is_recoverable());
    }
}
