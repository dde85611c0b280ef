//! Bridges a registered tool to the wire: runs it and turns whatever it
//! returns, fails with, or panics with into a `tools/call` outcome.

use std::{any::Any, sync::Arc};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::domain::{content::ContentBlock, registry::ToolDescriptor};
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToolResult {
    pub content: Vec<ContentBlock>,
}

/// Runs `tool` once with the raw `arguments` value from the request.
///
/// The body executes on its own task which is joined before returning, so
/// calls stay strictly sequential while a panic stays inside the task.
/// No schema validation happens here.
pub async fn invoke_tool(
    tool: &ToolDescriptor,
    arguments: Value,
) -> Result<CallToolResult, AppError> {
    let arguments = match arguments {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        other => {
            return Err(fail(
                &tool.name,
                format!("arguments must be a JSON object, got {}", json_kind(&other)),
            ))
        }
    };

    debug!(tool = %tool.name, "invoking tool");
    let handler = Arc::clone(&tool.handler);
    let joined = tokio::spawn(async move { handler.call(arguments).await }).await;

    match joined {
        Ok(Ok(content)) => Ok(CallToolResult { content }),
        Ok(Err(err)) => Err(fail(&tool.name, err.to_string())),
        Err(join_err) if join_err.is_panic() => Err(fail(
            &tool.name,
            format!("tool panicked: {}", panic_message(join_err.into_panic())),
        )),
        Err(join_err) => Err(fail(&tool.name, join_err.to_string())),
    }
}

fn fail(tool: &str, message: String) -> AppError {
    error!(tool = %tool, error = %message, "tool execution failed");
    AppError::ToolExecution(message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde_json::json;

    use super::*;

    fn echo_args() -> ToolDescriptor {
        ToolDescriptor::from_fn("args", "echoes its arguments", |arguments| {
            Ok(vec![ContentBlock::text(Value::Object(arguments).to_string())])
        })
    }

    #[tokio::test]
    async fn wraps_content_in_order() {
        let tool = ToolDescriptor::from_fn("multi", "two blocks", |_| {
            Ok(vec![
                ContentBlock::text("first"),
                ContentBlock::image_base64("AAAA", "image/png"),
            ])
        });

        let result = invoke_tool(&tool, json!({})).await.expect("tool call");
        assert_eq!(
            serde_json::to_value(result).expect("serialize"),
            json!({"content": [
                {"type": "text", "text": "first"},
                {"type": "image", "data": "AAAA", "mimeType": "image/png"}
            ]})
        );
    }

    #[tokio::test]
    async fn passes_unknown_arguments_through() {
        let result = invoke_tool(&echo_args(), json!({"city": "Tokyo", "extra": 1}))
            .await
            .expect("tool call");
        assert_eq!(
            result.content,
            vec![ContentBlock::text(r#"{"city":"Tokyo","extra":1}"#)]
        );
    }

    #[tokio::test]
    async fn null_arguments_become_empty_object() {
        let result = invoke_tool(&echo_args(), Value::Null).await.expect("tool call");
        assert_eq!(result.content, vec![ContentBlock::text("{}")]);
    }

    #[tokio::test]
    async fn non_object_arguments_fail_the_call() {
        let err = invoke_tool(&echo_args(), json!([1, 2]))
            .await
            .expect_err("array arguments");
        assert_eq!(err.code(), -32000);
        assert!(err.to_string().contains("arguments must be a JSON object, got array"));
    }

    #[tokio::test]
    async fn tool_error_is_captured() {
        let tool = ToolDescriptor::from_fn("failing", "always fails", |_| {
            Err(io::Error::new(io::ErrorKind::Other, "boom").into())
        });

        let err = invoke_tool(&tool, json!({})).await.expect_err("tool fails");
        assert_eq!(err.code(), -32000);
        assert_eq!(err.to_string(), "Error executing tool: boom");
    }

    #[tokio::test]
    async fn tool_panic_is_captured() {
        let tool = ToolDescriptor::from_fn("panicky", "panics", |_| panic!("kaboom"));

        let err = invoke_tool(&tool, json!({})).await.expect_err("tool panics");
        assert_eq!(err.code(), -32000);
        assert!(err.to_string().contains("tool panicked: kaboom"));
    }
}
